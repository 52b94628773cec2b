//! CoinGecko API endpoints and response parsing
//!
//! API Endpoints used:
//! - /simple/price - Simple price lookup
//! - /coins/{id} - Market data (market cap, volume)
//! - /coins/{id}/market_chart - Historical prices

use rust_decimal::Decimal;
use serde_json::Value;
use url::Url;

use super::types::PriceSeries;
use crate::utils::{as_decimal, get_decimal, get_decimal_in_currency, parse_json_value, ExtractError};

/// Quote currency for every lookup
pub const VS_CURRENCY: &str = "usd";

/// URL builder rooted at the configured base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinGeckoEndpoints {
    base_url: Url,
}

impl CoinGeckoEndpoints {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET /simple/price?ids={id}&vs_currencies=usd
    pub fn simple_price_url(&self, token_id: &str) -> String {
        self.build(
            &["simple", "price"],
            &[("ids", token_id), ("vs_currencies", VS_CURRENCY)],
        )
    }

    /// GET /coins/{id}
    pub fn coin_url(&self, token_id: &str) -> String {
        self.build(&["coins", token_id], &[])
    }

    /// GET /coins/{id}/market_chart?vs_currency=usd&days={days}
    pub fn market_chart_url(&self, token_id: &str, days: u32) -> String {
        let days = days.to_string();
        self.build(
            &["coins", token_id, "market_chart"],
            &[("vs_currency", VS_CURRENCY), ("days", days.as_str())],
        )
    }

    fn build(&self, segments: &[&str], query: &[(&str, &str)]) -> String {
        let mut url = self.base_url.clone();
        // http(s) URLs always have path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url.into()
    }
}

/// `{"<id>": {"usd": <number>}}` → price
pub fn parse_simple_price(body: &str, token_id: &str) -> Result<Decimal, ExtractError> {
    let parsed = parse_json_value(body)?;
    get_decimal(&parsed, &[token_id, VS_CURRENCY])
}

/// `market_data.<field>` from a /coins/{id} body
///
/// The field may be a bare number or keyed by currency; the USD entry wins.
pub fn parse_market_data_field(body: &str, field: &str) -> Result<Decimal, ExtractError> {
    let parsed = parse_json_value(body)?;
    get_decimal_in_currency(&parsed, &["market_data", field], VS_CURRENCY)
}

/// Price samples from a market_chart body
///
/// Accepts `{"prices": [[ts, price], ...]}`, `[[ts, price], ...]` or
/// `[price, ...]`.
pub fn parse_market_chart(body: &str) -> Result<PriceSeries, ExtractError> {
    let parsed = parse_json_value(body)?;

    let samples = match &parsed {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("prices") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(ExtractError::Shape {
                    field: "prices".to_string(),
                    expected: "array",
                })
            }
            None => return Err(ExtractError::MissingField("prices".to_string())),
        },
        _ => {
            return Err(ExtractError::Shape {
                field: "$".to_string(),
                expected: "array or object with prices",
            })
        }
    };

    let points = samples
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            let field = format!("prices[{}]", i);
            match sample {
                Value::Array(pair) => match pair.as_slice() {
                    [_, price, ..] => as_decimal(price, &field),
                    _ => Err(ExtractError::Shape {
                        field,
                        expected: "[timestamp, price]",
                    }),
                },
                other => as_decimal(other, &field),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PriceSeries::new(points))
}

/// Known CoinGecko token IDs for common assets
pub struct KnownTokenIds;

impl KnownTokenIds {
    pub const BITCOIN: &'static str = "bitcoin";
    pub const ETHEREUM: &'static str = "ethereum";
    pub const TETHER: &'static str = "tether";
    pub const BNB: &'static str = "binancecoin";
    pub const SOLANA: &'static str = "solana";
    pub const XRP: &'static str = "ripple";
    pub const USDC: &'static str = "usd-coin";
    pub const CARDANO: &'static str = "cardano";
    pub const AVALANCHE: &'static str = "avalanche-2";
    pub const DOGECOIN: &'static str = "dogecoin";
    pub const POLKADOT: &'static str = "polkadot";
    pub const POLYGON: &'static str = "matic-network";
    pub const CHAINLINK: &'static str = "chainlink";
    pub const LITECOIN: &'static str = "litecoin";

    /// Get token ID from symbol
    pub fn from_symbol(symbol: &str) -> Option<&'static str> {
        match symbol.to_uppercase().as_str() {
            "BTC" => Some(Self::BITCOIN),
            "ETH" => Some(Self::ETHEREUM),
            "USDT" => Some(Self::TETHER),
            "BNB" => Some(Self::BNB),
            "SOL" => Some(Self::SOLANA),
            "XRP" => Some(Self::XRP),
            "USDC" => Some(Self::USDC),
            "ADA" => Some(Self::CARDANO),
            "AVAX" => Some(Self::AVALANCHE),
            "DOGE" => Some(Self::DOGECOIN),
            "DOT" => Some(Self::POLKADOT),
            "MATIC" | "POL" => Some(Self::POLYGON),
            "LINK" => Some(Self::CHAINLINK),
            "LTC" => Some(Self::LITECOIN),
            _ => None,
        }
    }

    /// Symbol → id, anything else passes through trimmed
    pub fn resolve(input: &str) -> String {
        let trimmed = input.trim();
        match Self::from_symbol(trimmed) {
            Some(id) => id.to_string(),
            None => trimmed.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn endpoints(base: &str) -> CoinGeckoEndpoints {
        CoinGeckoEndpoints::new(Url::parse(base).unwrap())
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_simple_price_url() {
        let urls = endpoints("https://api.coingecko.com/api/v3");
        assert_eq!(
            urls.simple_price_url("bitcoin"),
            "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin&vs_currencies=usd"
        );
    }

    #[test]
    fn test_coin_and_chart_urls() {
        let urls = endpoints("http://127.0.0.1:8080");
        assert_eq!(urls.coin_url("ethereum"), "http://127.0.0.1:8080/coins/ethereum");
        assert_eq!(
            urls.market_chart_url("ethereum", 30),
            "http://127.0.0.1:8080/coins/ethereum/market_chart?vs_currency=usd&days=30"
        );
    }

    #[test]
    fn test_ids_are_escaped() {
        let urls = endpoints("https://api.coingecko.com/api/v3");
        assert_eq!(
            urls.coin_url("bad/id"),
            "https://api.coingecko.com/api/v3/coins/bad%2Fid"
        );
        assert!(urls.simple_price_url("a&b").contains("ids=a%26b"));
    }

    #[test]
    fn test_parse_simple_price() {
        let price = parse_simple_price(r#"{"bitcoin": {"usd": 50000.12}}"#, "bitcoin").unwrap();
        assert_eq!(price, dec("50000.12"));

        assert_eq!(
            parse_simple_price(r#"{}"#, "bitcoin"),
            Err(ExtractError::MissingField("bitcoin".into()))
        );
    }

    #[test]
    fn test_parse_market_data_field() {
        let body = r#"{
            "id": "bitcoin",
            "market_data": {
                "market_cap": {"usd": 850000000000, "eur": 780000000000},
                "total_volume": 25000000000
            }
        }"#;
        assert_eq!(parse_market_data_field(body, "market_cap").unwrap(), dec("850000000000"));
        assert_eq!(parse_market_data_field(body, "total_volume").unwrap(), dec("25000000000"));
        assert!(matches!(
            parse_market_data_field(body, "circulating_supply"),
            Err(ExtractError::MissingField(_))
        ));
    }

    #[test]
    fn test_parse_market_chart_shapes() {
        let bare = parse_market_chart("[100, 110, 90, 120]").unwrap();
        assert_eq!(bare.points, vec![dec("100"), dec("110"), dec("90"), dec("120")]);

        let upstream = parse_market_chart(
            r#"{
                "prices": [[1704067200000, 42000.5], [1704153600000, 43500.75]],
                "total_volumes": [[1704067200000, 25000000000]],
                "market_caps": []
            }"#,
        )
        .unwrap();
        assert_eq!(upstream.points, vec![dec("42000.5"), dec("43500.75")]);

        let pairs = parse_market_chart("[[1, \"1.5\"], [2, 2.5]]").unwrap();
        assert_eq!(pairs.points, vec![dec("1.5"), dec("2.5")]);
    }

    #[test]
    fn test_parse_market_chart_rejects_bad_shapes() {
        assert!(matches!(parse_market_chart(r#"{"error": "coin not found"}"#), Err(ExtractError::MissingField(_))));
        assert!(matches!(parse_market_chart(r#"{"prices": 5}"#), Err(ExtractError::Shape { .. })));
        assert!(matches!(parse_market_chart("[[1]]"), Err(ExtractError::Shape { .. })));
        assert!(matches!(parse_market_chart("[\"x\"]"), Err(ExtractError::NotDecimal { .. })));
        assert!(matches!(parse_market_chart("42"), Err(ExtractError::Shape { .. })));
    }

    #[test]
    fn test_known_token_ids() {
        assert_eq!(KnownTokenIds::from_symbol("BTC"), Some("bitcoin"));
        assert_eq!(KnownTokenIds::from_symbol("eth"), Some("ethereum"));
        assert_eq!(KnownTokenIds::from_symbol("UNKNOWN"), None);
        assert_eq!(KnownTokenIds::resolve(" sol "), "solana");
        assert_eq!(KnownTokenIds::resolve("bitcoin"), "bitcoin");
    }
}
