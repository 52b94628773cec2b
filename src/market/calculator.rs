//! Price change calculation

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use super::types::PriceSeries;

/// Decimal places kept in a percent change
pub const PERCENT_CHANGE_SCALE: u32 = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    #[error("Price series needs at least 2 points, got {0}")]
    TooShort(usize),

    #[error("Price series starts at zero")]
    ZeroStart,

    #[error("Arithmetic overflow computing price change")]
    Overflow,
}

pub struct PriceChangeCalculator;

impl PriceChangeCalculator {
    /// `(last - first) / first * 100`, half-up to 4 places, always scale 4
    pub fn percent_change(series: &PriceSeries) -> Result<Decimal, SeriesError> {
        let (first, last) = match (series.first(), series.last()) {
            (Some(first), Some(last)) if series.len() >= 2 => (first, last),
            _ => return Err(SeriesError::TooShort(series.len())),
        };

        if first.is_zero() {
            return Err(SeriesError::ZeroStart);
        }

        let ratio = last
            .checked_sub(first)
            .and_then(|diff| diff.checked_div(first))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or(SeriesError::Overflow)?;

        Ok(Self::round_percent(ratio))
    }

    /// Round half away from zero, then pad to the fixed scale
    pub fn round_percent(value: Decimal) -> Decimal {
        let mut rounded =
            value.round_dp_with_strategy(PERCENT_CHANGE_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(PERCENT_CHANGE_SCALE);
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn series(values: &[&str]) -> PriceSeries {
        PriceSeries::new(values.iter().map(|v| dec(v)).collect())
    }

    #[test]
    fn test_uses_only_first_and_last() {
        let change = PriceChangeCalculator::percent_change(&series(&["100", "110", "90", "120"])).unwrap();
        assert_eq!(change.to_string(), "20.0000");
    }

    #[test]
    fn test_negative_change() {
        let change = PriceChangeCalculator::percent_change(&series(&["200", "150"])).unwrap();
        assert_eq!(change.to_string(), "-25.0000");
    }

    #[test]
    fn test_half_up_boundary() {
        // raw 12.34565 exactly
        let up = PriceChangeCalculator::percent_change(&series(&["100000", "112345.65"])).unwrap();
        assert_eq!(up.to_string(), "12.3457");

        let down = PriceChangeCalculator::percent_change(&series(&["100000", "87654.35"])).unwrap();
        assert_eq!(down.to_string(), "-12.3457");

        // just below the midpoint
        let below = PriceChangeCalculator::percent_change(&series(&["100000", "112345.649"])).unwrap();
        assert_eq!(below.to_string(), "12.3456");
    }

    #[test]
    fn test_repeating_ratio() {
        // 1/3 * 100
        let change = PriceChangeCalculator::percent_change(&series(&["3", "4"])).unwrap();
        assert_eq!(change.to_string(), "33.3333");
    }

    #[test]
    fn test_too_short() {
        assert_eq!(
            PriceChangeCalculator::percent_change(&series(&["100"])),
            Err(SeriesError::TooShort(1))
        );
        assert_eq!(
            PriceChangeCalculator::percent_change(&PriceSeries::default()),
            Err(SeriesError::TooShort(0))
        );
    }

    #[test]
    fn test_zero_start() {
        assert_eq!(
            PriceChangeCalculator::percent_change(&series(&["0", "50"])),
            Err(SeriesError::ZeroStart)
        );
    }

    #[test]
    fn test_overflow_is_an_error() {
        let huge = series(&["0.0000000000000000000000000001", "79228162514264337593543950335"]);
        assert_eq!(
            PriceChangeCalculator::percent_change(&huge),
            Err(SeriesError::Overflow)
        );
    }
}
