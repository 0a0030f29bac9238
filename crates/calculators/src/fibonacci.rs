use crate::Calculator;
use crate::input::all_positive;
use core_types::TrendDirection;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Retracement percentages, from the swing origin to the full swing.
pub const RETRACEMENT_LEVELS: [Decimal; 7] = [
    dec!(0),
    dec!(23.6),
    dec!(38.2),
    dec!(50),
    dec!(61.8),
    dec!(78.6),
    dec!(100),
];

/// Extension percentages projected beyond the swing.
pub const EXTENSION_LEVELS: [Decimal; 4] = [dec!(127.2), dec!(161.8), dec!(200), dec!(261.8)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FibLevelKind {
    Retracement,
    Extension,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibLevel {
    /// The Fibonacci percentage (e.g., 61.8).
    pub level: Decimal,
    /// Display label (e.g., "61.8%").
    pub label: String,
    pub price: Decimal,
    #[serde(rename = "type")]
    pub kind: FibLevelKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FibonacciInput {
    pub swing_high: Decimal,
    pub swing_low: Decimal,
    #[serde(default)]
    pub direction: TrendDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FibonacciResult {
    pub direction: TrendDirection,
    pub range: Decimal,
    pub levels: Vec<FibLevel>,
}

/// Computes retracement and extension levels for a swing.
///
/// In an uptrend retracements are measured down from the high and extensions project
/// above it; a downtrend mirrors both around the low. Returns an empty list when
/// `high <= low`, either price is not positive, or an extension does not fit a `Decimal`.
pub fn fibonacci_levels(high: Decimal, low: Decimal, direction: TrendDirection) -> Vec<FibLevel> {
    if !all_positive(&[high, low]) || high <= low {
        return Vec::new();
    }

    let diff = high - low;
    let retracements = RETRACEMENT_LEVELS.iter().map(|percent| {
        let offset = diff.checked_mul(percent / Decimal::ONE_HUNDRED)?;
        let price = match direction {
            TrendDirection::Uptrend => high - offset,
            TrendDirection::Downtrend => low.checked_add(offset)?,
        };
        Some(level(*percent, price, FibLevelKind::Retracement))
    });

    let extensions = EXTENSION_LEVELS.iter().map(|percent| {
        let offset = diff.checked_mul((percent - Decimal::ONE_HUNDRED) / Decimal::ONE_HUNDRED)?;
        let price = match direction {
            TrendDirection::Uptrend => high.checked_add(offset)?,
            TrendDirection::Downtrend => low - offset,
        };
        Some(level(*percent, price, FibLevelKind::Extension))
    });

    retracements
        .chain(extensions)
        .collect::<Option<Vec<FibLevel>>>()
        .unwrap_or_default()
}

fn level(percent: Decimal, price: Decimal, kind: FibLevelKind) -> FibLevel {
    FibLevel {
        level: percent,
        label: format!("{}%", percent.normalize()),
        price,
        kind,
    }
}

impl Calculator for FibonacciInput {
    type Output = FibonacciResult;

    fn calculate(&self) -> Option<FibonacciResult> {
        let levels = fibonacci_levels(self.swing_high, self.swing_low, self.direction);
        if levels.is_empty() {
            return None;
        }
        Some(FibonacciResult {
            direction: self.direction,
            range: self.swing_high - self.swing_low,
            levels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prices(levels: &[FibLevel], kind: FibLevelKind) -> Vec<Decimal> {
        levels
            .iter()
            .filter(|l| l.kind == kind)
            .map(|l| l.price)
            .collect()
    }

    #[test]
    fn test_uptrend_endpoints() {
        let levels = fibonacci_levels(dec!(1.09500), dec!(1.08000), TrendDirection::Uptrend);
        assert_eq!(levels.len(), 11);
        assert_eq!(levels[0].price, dec!(1.09500));
        assert_eq!(levels[0].label, "0%");
        assert_eq!(levels[6].price, dec!(1.08000));
        assert_eq!(levels[6].label, "100%");
        // 61.8% retracement of a 150 pip swing.
        assert_eq!(levels[4].price, dec!(1.08573));
        // 161.8% extension.
        assert_eq!(levels[8].price, dec!(1.10427));
        assert_eq!(levels[8].label, "161.8%");
    }

    #[test]
    fn test_downtrend_is_mirrored() {
        let levels = fibonacci_levels(dec!(200), dec!(100), TrendDirection::Downtrend);
        assert_eq!(levels[0].price, dec!(100));
        assert_eq!(levels[6].price, dec!(200));
        assert_eq!(levels[3].price, dec!(150));
        // 200% extension lies a full range below the low.
        assert_eq!(levels[9].price, dec!(0));
    }

    #[test]
    fn test_levels_are_monotonic() {
        for (high, low) in [(dec!(10), dec!(9)), (dec!(3150), dec!(3050)), (dec!(0.5), dec!(0.01))] {
            let up = fibonacci_levels(high, low, TrendDirection::Uptrend);
            let retr = prices(&up, FibLevelKind::Retracement);
            assert!(retr.windows(2).all(|w| w[0] > w[1]));
            let ext = prices(&up, FibLevelKind::Extension);
            assert!(ext.windows(2).all(|w| w[0] < w[1]));
            assert!(ext[0] > high);

            let down = fibonacci_levels(high, low, TrendDirection::Downtrend);
            let retr = prices(&down, FibLevelKind::Retracement);
            assert!(retr.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_invalid_swing_yields_nothing() {
        assert!(fibonacci_levels(dec!(1), dec!(1), TrendDirection::Uptrend).is_empty());
        assert!(fibonacci_levels(dec!(1), dec!(2), TrendDirection::Uptrend).is_empty());
        assert!(fibonacci_levels(dec!(1), dec!(-2), TrendDirection::Uptrend).is_empty());
        let input = FibonacciInput {
            swing_high: dec!(1),
            swing_low: dec!(2),
            direction: TrendDirection::Uptrend,
        };
        assert!(input.calculate().is_none());
    }

    #[test]
    fn test_extension_overflow_yields_nothing() {
        let high = dec!(70000000000000000000000000000);
        assert!(fibonacci_levels(high, dec!(1), TrendDirection::Uptrend).is_empty());
        let input = FibonacciInput {
            swing_high: high,
            swing_low: dec!(1),
            direction: TrendDirection::Uptrend,
        };
        assert!(input.calculate().is_none());
    }
}
