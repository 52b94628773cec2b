//! JSON field extraction
//!
//! Decimal-aware helpers over `serde_json::Value`. With the
//! `arbitrary_precision` feature a number's text is kept verbatim, so
//! decimals never pass through `f64`.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("JSON parse error: {0}")]
    Parse(String),

    #[error("Missing field '{0}'")]
    MissingField(String),

    #[error("Field '{field}' is not a decimal: {found}")]
    NotDecimal { field: String, found: String },

    #[error("Unexpected shape at '{field}': expected {expected}")]
    Shape { field: String, expected: &'static str },
}

/// Parse a response body into a JSON value
pub fn parse_json_value(body: &str) -> Result<Value, ExtractError> {
    serde_json::from_str(body).map_err(|e| ExtractError::Parse(e.to_string()))
}

/// Walk `path` through nested objects
pub fn get_path<'a>(value: &'a Value, path: &[&str]) -> Result<&'a Value, ExtractError> {
    let mut current = value;
    for (depth, key) in path.iter().enumerate() {
        current = current
            .get(*key)
            .ok_or_else(|| ExtractError::MissingField(path[..=depth].join(".")))?;
    }
    Ok(current)
}

/// Read a JSON number or numeric string as a decimal
pub fn as_decimal(value: &Value, field: &str) -> Result<Decimal, ExtractError> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        Value::Null => return Err(ExtractError::MissingField(field.to_string())),
        other => {
            return Err(ExtractError::NotDecimal {
                field: field.to_string(),
                found: other.to_string(),
            })
        }
    };

    parse_decimal(&text).ok_or_else(|| ExtractError::NotDecimal {
        field: field.to_string(),
        found: text,
    })
}

/// Decimal from plain or exponent notation
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.contains(['e', 'E']) {
        Decimal::from_scientific(text).ok()
    } else {
        Decimal::from_str(text).ok()
    }
}

/// Extract the decimal at `path`
pub fn get_decimal(value: &Value, path: &[&str]) -> Result<Decimal, ExtractError> {
    let field = get_path(value, path)?;
    as_decimal(field, &path.join("."))
}

/// Extract a decimal that may be flattened or keyed by currency
///
/// `{"market_cap": 1.0}` and `{"market_cap": {"usd": 1.0}}` both yield 1.0.
pub fn get_decimal_in_currency(
    value: &Value,
    path: &[&str],
    currency: &str,
) -> Result<Decimal, ExtractError> {
    let field = get_path(value, path)?;
    let joined = path.join(".");
    match field {
        Value::Object(map) => {
            let entry = map
                .get(currency)
                .ok_or_else(|| ExtractError::MissingField(format!("{}.{}", joined, currency)))?;
            as_decimal(entry, &format!("{}.{}", joined, currency))
        }
        other => as_decimal(other, &joined),
    }
}
