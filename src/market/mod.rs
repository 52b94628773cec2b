//! Market data module
//!
//! Provides:
//! - CoinGecko endpoint URLs and response parsing
//! - The blocking price client (price, market cap, volume, price change)
//! - Percent change calculation
//! - Snapshot assembly and summary rendering

pub mod types;
pub mod coingecko;
pub mod calculator;
pub mod client;
pub mod report;

pub use types::*;
pub use coingecko::*;
pub use calculator::*;
pub use client::*;
pub use report::*;
