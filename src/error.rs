//! Unified error type for price lookups
//!
//! Every fetch failure reaches the caller as a single [`DataFetchError`].
//! The kind and the underlying cause are kept for logging, but the
//! caller-visible message only names the operation and the currency.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The failed lookup, as named in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Price,
    MarketCap,
    Volume,
    PriceChange,
}

impl Operation {
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Price => "price",
            Operation::MarketCap => "market cap",
            Operation::Volume => "volume",
            Operation::PriceChange => "price change",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    /// Connection refused, DNS failure, timeout, broken body
    Network,
    /// Non-2xx response
    Status,
    /// Body is not JSON, or a field is not a decimal
    Parse,
    /// Expected JSON field is absent
    MissingField,
    /// Price series too short, starts at zero, or overflows
    InvalidSeries,
}

/// Error raised by every `PriceClient` operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFetchError {
    pub kind: FetchErrorKind,
    pub operation: Operation,
    pub currency_id: String,
    pub details: Option<String>,
}

impl DataFetchError {
    pub fn new(kind: FetchErrorKind, operation: Operation, currency_id: impl Into<String>) -> Self {
        Self {
            kind,
            operation,
            currency_id: currency_id.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors
    pub fn network(operation: Operation, currency_id: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Network, operation, currency_id)
    }

    pub fn parse(operation: Operation, currency_id: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Parse, operation, currency_id)
    }

    pub fn invalid_series(operation: Operation, currency_id: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::InvalidSeries, operation, currency_id)
    }

    /// Message shown to the user; never includes `details`
    pub fn message(&self) -> String {
        format!(
            "Error occurred while fetching {} data for cryptocurrency: {}",
            self.operation, self.currency_id
        )
    }
}

impl fmt::Display for DataFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for DataFetchError {}

/// Result type alias for fetch operations
pub type FetchResult<T> = Result<T, DataFetchError>;
