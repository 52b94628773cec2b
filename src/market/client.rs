//! Price client
//!
//! Each operation issues exactly one GET, parses the body and pulls one
//! decimal out of it. Any failure becomes a [`DataFetchError`] naming the
//! operation and currency.

use rust_decimal::Decimal;
use std::time::Instant;

use super::calculator::{PriceChangeCalculator, SeriesError};
use super::coingecko::{parse_market_chart, parse_market_data_field, parse_simple_price, CoinGeckoEndpoints};
use crate::config::TrackerConfig;
use crate::error::{DataFetchError, FetchErrorKind, FetchResult, Operation};
use crate::utils::{ExtractError, HttpTransport, ReqwestTransport, TransportError};
use crate::log_debug;

const LOG_MODULE: &str = "market";

pub struct PriceClient<T: HttpTransport = ReqwestTransport> {
    endpoints: CoinGeckoEndpoints,
    transport: T,
}

impl PriceClient<ReqwestTransport> {
    /// Client on the reqwest transport
    pub fn from_config(config: &TrackerConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(config, transport))
    }
}

impl<T: HttpTransport> PriceClient<T> {
    pub fn new(config: &TrackerConfig, transport: T) -> Self {
        Self {
            endpoints: CoinGeckoEndpoints::new(config.base_url().clone()),
            transport,
        }
    }

    pub fn endpoints(&self) -> &CoinGeckoEndpoints {
        &self.endpoints
    }

    /// Current USD price
    pub fn get_price(&self, currency_id: &str) -> FetchResult<Decimal> {
        let op = Operation::Price;
        let body = self.fetch(op, currency_id, &self.endpoints.simple_price_url(currency_id))?;
        parse_simple_price(&body, currency_id).map_err(|e| extract_failure(op, currency_id, e))
    }

    /// USD market capitalization from `market_data.market_cap`
    pub fn get_market_cap(&self, currency_id: &str) -> FetchResult<Decimal> {
        let op = Operation::MarketCap;
        let body = self.fetch(op, currency_id, &self.endpoints.coin_url(currency_id))?;
        parse_market_data_field(&body, "market_cap").map_err(|e| extract_failure(op, currency_id, e))
    }

    /// USD volume from `market_data.total_volume`
    pub fn get_volume(&self, currency_id: &str) -> FetchResult<Decimal> {
        let op = Operation::Volume;
        let body = self.fetch(op, currency_id, &self.endpoints.coin_url(currency_id))?;
        parse_market_data_field(&body, "total_volume").map_err(|e| extract_failure(op, currency_id, e))
    }

    /// Percent change between the first and last price over `days`
    pub fn get_price_change(&self, currency_id: &str, days: u32) -> FetchResult<Decimal> {
        let op = Operation::PriceChange;
        let body = self.fetch(op, currency_id, &self.endpoints.market_chart_url(currency_id, days))?;
        let series = parse_market_chart(&body).map_err(|e| extract_failure(op, currency_id, e))?;
        PriceChangeCalculator::percent_change(&series).map_err(|e| series_failure(op, currency_id, e))
    }

    fn fetch(&self, op: Operation, currency_id: &str, url: &str) -> FetchResult<String> {
        let started = Instant::now();
        let result = self.transport.get_text(url);
        let elapsed_ms = started.elapsed().as_millis();

        match result {
            Ok(body) => {
                log_debug!(LOG_MODULE, "response received", operation = op, url = url, bytes = body.len(), elapsed_ms = elapsed_ms);
                Ok(body)
            }
            Err(e) => {
                log_debug!(LOG_MODULE, "request failed", operation = op, url = url, error = e, elapsed_ms = elapsed_ms);
                Err(transport_failure(op, currency_id, e))
            }
        }
    }
}

fn transport_failure(op: Operation, currency_id: &str, err: TransportError) -> DataFetchError {
    let kind = match err {
        TransportError::Status { .. } => FetchErrorKind::Status,
        _ => FetchErrorKind::Network,
    };
    DataFetchError::new(kind, op, currency_id).with_details(err.to_string())
}

fn extract_failure(op: Operation, currency_id: &str, err: ExtractError) -> DataFetchError {
    let kind = match err {
        ExtractError::MissingField(_) => FetchErrorKind::MissingField,
        ExtractError::Parse(_) | ExtractError::NotDecimal { .. } | ExtractError::Shape { .. } => {
            FetchErrorKind::Parse
        }
    };
    log_debug!(LOG_MODULE, "unexpected response", operation = op, error = err);
    DataFetchError::new(kind, op, currency_id).with_details(err.to_string())
}

fn series_failure(op: Operation, currency_id: &str, err: SeriesError) -> DataFetchError {
    DataFetchError::invalid_series(op, currency_id).with_details(err.to_string())
}
