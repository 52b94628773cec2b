//! Crypto Tracker Library
//!
//! Fetches price, market cap, volume and recent price change for one
//! cryptocurrency from a CoinGecko-compatible API.
//!
//! # Architecture
//!
//! This crate provides:
//! - **market**: the price client, percent change calculation and summary rendering
//! - **config**: the process-wide API base URL and timeout
//! - **error**: the unified `DataFetchError`
//! - **utils**: HTTP transport, JSON extraction, logging
//!
//! # Example
//!
//! ```rust,no_run
//! use crypto_tracker::{fetch_snapshot, render_summary, PriceClient, TrackerConfig};
//!
//! let client = PriceClient::from_config(&TrackerConfig::default()).unwrap();
//! match fetch_snapshot(&client, "bitcoin", 7) {
//!     Ok(snapshot) => print!("{}", render_summary(&snapshot)),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

pub mod error;
pub mod config;
pub mod market;
pub mod utils;

// Re-export key types for convenience
pub use error::{DataFetchError, FetchErrorKind, FetchResult, Operation};
pub use config::{ConfigError, TrackerConfig};
pub use market::{
    fetch_snapshot, render_failure, render_json, render_summary, CurrencySnapshot,
    KnownTokenIds, PriceChangeCalculator, PriceClient, PriceSeries,
};
