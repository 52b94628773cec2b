//! Snapshot and series types

use rust_decimal::Decimal;
use serde::Serialize;

/// One currency's fetched market data, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencySnapshot {
    currency_id: String,
    price: Decimal,
    market_cap: Decimal,
    volume: Decimal,
    price_change_percent: Decimal,
    lookback_days: u32,
}

impl CurrencySnapshot {
    pub fn new(
        currency_id: impl Into<String>,
        price: Decimal,
        market_cap: Decimal,
        volume: Decimal,
        price_change_percent: Decimal,
        lookback_days: u32,
    ) -> Self {
        Self {
            currency_id: currency_id.into(),
            price,
            market_cap,
            volume,
            price_change_percent,
            lookback_days,
        }
    }

    pub fn currency_id(&self) -> &str {
        &self.currency_id
    }

    /// USD price
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// USD market capitalization
    pub fn market_cap(&self) -> Decimal {
        self.market_cap
    }

    /// USD trading volume
    pub fn volume(&self) -> Decimal {
        self.volume
    }

    /// Signed percent change over `lookback_days`, scale 4
    pub fn price_change_percent(&self) -> Decimal {
        self.price_change_percent
    }

    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }
}

/// Ordered USD price samples, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceSeries {
    pub points: Vec<Decimal>,
}

impl PriceSeries {
    pub fn new(points: Vec<Decimal>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Decimal> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Decimal> {
        self.points.last().copied()
    }
}

impl From<Vec<Decimal>> for PriceSeries {
    fn from(points: Vec<Decimal>) -> Self {
        Self::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_snapshot_serializes_decimals_as_strings() {
        let snapshot = CurrencySnapshot::new(
            "bitcoin",
            Decimal::from_str("50000.12").unwrap(),
            Decimal::from(850_000_000_000u64),
            Decimal::from(25_000_000_000u64),
            Decimal::from_str("20.0000").unwrap(),
            7,
        );

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["currency_id"], "bitcoin");
        assert_eq!(json["price"], "50000.12");
        assert_eq!(json["price_change_percent"], "20.0000");
        assert_eq!(json["lookback_days"], 7);
    }

    #[test]
    fn test_series_ends() {
        let series = PriceSeries::from(vec![Decimal::from(100), Decimal::from(120)]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.first(), Some(Decimal::from(100)));
        assert_eq!(series.last(), Some(Decimal::from(120)));
        assert!(PriceSeries::default().is_empty());
    }
}
