//! Snapshot assembly and summary rendering

use super::client::PriceClient;
use super::types::CurrencySnapshot;
use crate::error::{DataFetchError, FetchResult};
use crate::utils::HttpTransport;

/// Run all four lookups in order; the first failure aborts the rest
pub fn fetch_snapshot<T: HttpTransport>(
    client: &PriceClient<T>,
    currency_id: &str,
    lookback_days: u32,
) -> FetchResult<CurrencySnapshot> {
    let price = client.get_price(currency_id)?;
    let market_cap = client.get_market_cap(currency_id)?;
    let volume = client.get_volume(currency_id)?;
    let price_change = client.get_price_change(currency_id, lookback_days)?;

    Ok(CurrencySnapshot::new(
        currency_id,
        price,
        market_cap,
        volume,
        price_change,
        lookback_days,
    ))
}

/// Five labeled lines, newline-terminated
pub fn render_summary(snapshot: &CurrencySnapshot) -> String {
    format!(
        "Cryptocurrency: {}\nPrice: ${}\nMarket Cap: ${}\nVolume: ${}\nPrice Change ({}d): {}%\n",
        snapshot.currency_id(),
        snapshot.price(),
        snapshot.market_cap(),
        snapshot.volume(),
        snapshot.lookback_days(),
        snapshot.price_change_percent(),
    )
}

pub fn render_failure(err: &DataFetchError) -> String {
    format!("Error occurred while fetching cryptocurrency data: {}\n", err)
}

pub fn render_json(snapshot: &CurrencySnapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot).map(|mut s| {
        s.push('\n');
        s
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Operation;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn snapshot() -> CurrencySnapshot {
        CurrencySnapshot::new(
            "bitcoin",
            Decimal::from_str("50000.12").unwrap(),
            Decimal::from_str("850000000000").unwrap(),
            Decimal::from_str("25000000000").unwrap(),
            Decimal::from_str("-3.1250").unwrap(),
            7,
        )
    }

    #[test]
    fn test_render_summary_order_and_format() {
        let text = render_summary(&snapshot());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Cryptocurrency: bitcoin",
                "Price: $50000.12",
                "Market Cap: $850000000000",
                "Volume: $25000000000",
                "Price Change (7d): -3.1250%",
            ]
        );
    }

    #[test]
    fn test_render_failure() {
        let err = DataFetchError::network(Operation::Price, "bitcoin");
        assert_eq!(
            render_failure(&err),
            "Error occurred while fetching cryptocurrency data: \
             Error occurred while fetching price data for cryptocurrency: bitcoin\n"
        );
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&snapshot()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["market_cap"], "850000000000");
        assert_eq!(value["price_change_percent"], "-3.1250");
    }
}
