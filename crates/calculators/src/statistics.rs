use crate::Calculator;
use crate::input::{checked_sum, decimal_list};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Trading days per year used to annualise daily volatility.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    checked_sum(values)?.checked_div(Decimal::from(values.len()))
}

// ==============================================================================
// Correlation
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationStrength {
    Strong,
    Moderate,
    Weak,
    Negligible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationDirection {
    Positive,
    Negative,
    None,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationInput {
    #[serde(alias = "asset1Returns", deserialize_with = "decimal_list")]
    pub series_a: Vec<Decimal>,
    #[serde(alias = "asset2Returns", deserialize_with = "decimal_list")]
    pub series_b: Vec<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationResult {
    pub coefficient: Decimal,
    pub strength: CorrelationStrength,
    pub direction: CorrelationDirection,
    pub sample_size: usize,
}

/// Pearson correlation of two equally long series. `None` for fewer than two points, when
/// either series is constant, or when the sums of squares overflow.
pub fn pearson(xs: &[Decimal], ys: &[Decimal]) -> Option<Decimal> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let (mean_x, mean_y) = (mean(xs)?, mean(ys)?);

    let mut covariance = Decimal::ZERO;
    let mut var_x = Decimal::ZERO;
    let mut var_y = Decimal::ZERO;
    for (x, y) in xs.iter().zip(ys) {
        let (dx, dy) = (x.checked_sub(mean_x)?, y.checked_sub(mean_y)?);
        covariance = covariance.checked_add(dx.checked_mul(dy)?)?;
        var_x = var_x.checked_add(dx.checked_mul(dx)?)?;
        var_y = var_y.checked_add(dy.checked_mul(dy)?)?;
    }

    // Taking the roots first keeps large series (volumes, notionals) in range.
    let denominator = var_x.sqrt()?.checked_mul(var_y.sqrt()?)?;
    let r = covariance.checked_div(denominator)?;
    // sqrt rounding can push a perfect fit just past the bound.
    Some(r.clamp(-Decimal::ONE, Decimal::ONE))
}

impl Calculator for CorrelationInput {
    type Output = CorrelationResult;

    fn calculate(&self) -> Option<CorrelationResult> {
        let coefficient = pearson(&self.series_a, &self.series_b)?;
        let magnitude = coefficient.abs();

        let strength = if magnitude >= dec!(0.7) {
            CorrelationStrength::Strong
        } else if magnitude >= dec!(0.4) {
            CorrelationStrength::Moderate
        } else if magnitude >= dec!(0.2) {
            CorrelationStrength::Weak
        } else {
            CorrelationStrength::Negligible
        };
        let direction = if strength == CorrelationStrength::Negligible {
            CorrelationDirection::None
        } else if coefficient > Decimal::ZERO {
            CorrelationDirection::Positive
        } else {
            CorrelationDirection::Negative
        };

        Some(CorrelationResult {
            coefficient,
            strength,
            direction,
            sample_size: self.series_a.len(),
        })
    }
}

// ==============================================================================
// Volatility
// ==============================================================================

fn default_periods() -> u32 {
    TRADING_DAYS_PER_YEAR
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolatilityInput {
    /// Closing prices, oldest first.
    #[serde(deserialize_with = "decimal_list")]
    pub prices: Vec<Decimal>,
    #[serde(default = "default_periods")]
    pub periods_per_year: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolatilityResult {
    pub mean_return_percent: Decimal,
    pub period_volatility_percent: Decimal,
    pub annualized_volatility_percent: Decimal,
    pub observations: usize,
}

impl Calculator for VolatilityInput {
    type Output = VolatilityResult;

    fn calculate(&self) -> Option<VolatilityResult> {
        if self.prices.len() < 3
            || self.periods_per_year == 0
            || self.prices.iter().any(|p| *p <= Decimal::ZERO)
        {
            return None;
        }

        let returns = self
            .prices
            .windows(2)
            .map(|pair| pair[1].checked_div(pair[0]).map(|ratio| ratio - Decimal::ONE))
            .collect::<Option<Vec<Decimal>>>()?;
        let average = mean(&returns)?;
        let squared = returns.iter().try_fold(Decimal::ZERO, |total, r| {
            let deviation = r - average;
            total.checked_add(deviation.checked_mul(deviation)?)
        })?;
        let variance = squared / Decimal::from(returns.len() - 1);
        let std_dev = variance.sqrt()?;
        let annualized = std_dev.checked_mul(Decimal::from(self.periods_per_year).sqrt()?)?;

        Some(VolatilityResult {
            mean_return_percent: average.checked_mul(Decimal::ONE_HUNDRED)?,
            period_volatility_percent: std_dev.checked_mul(Decimal::ONE_HUNDRED)?,
            annualized_volatility_percent: annualized.checked_mul(Decimal::ONE_HUNDRED)?,
            observations: returns.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close_to(actual: Decimal, expected: Decimal) -> bool {
        (actual - expected).abs() < dec!(0.0001)
    }

    #[test]
    fn test_perfect_correlations() {
        let xs = [dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)];
        let up = [dec!(2), dec!(4), dec!(6), dec!(8), dec!(10)];
        let down = [dec!(10), dec!(8), dec!(6), dec!(4), dec!(2)];
        assert!(close_to(pearson(&xs, &up).unwrap(), Decimal::ONE));
        assert!(close_to(pearson(&xs, &down).unwrap(), -Decimal::ONE));
    }

    #[test]
    fn test_correlation_from_text_series() {
        let input: CorrelationInput = serde_json::from_str(
            r#"{"asset1Returns": "1.2, -0.5, 0.8, 2.1", "asset2Returns": "1.0, -0.7, 0.9, 1.8"}"#,
        )
        .unwrap();
        let result = input.calculate().unwrap();
        assert_eq!(result.sample_size, 4);
        assert_eq!(result.strength, CorrelationStrength::Strong);
        assert_eq!(result.direction, CorrelationDirection::Positive);
    }

    #[test]
    fn test_correlation_guards() {
        assert!(pearson(&[dec!(1)], &[dec!(2)]).is_none());
        assert!(pearson(&[dec!(1), dec!(2)], &[dec!(1)]).is_none());
        assert!(pearson(&[dec!(3), dec!(3)], &[dec!(1), dec!(2)]).is_none());
    }

    #[test]
    fn test_correlation_of_volume_scale_series() {
        let input: CorrelationInput =
            serde_json::from_str(r#"{"seriesA": [1e8, -1e8, 5], "seriesB": [1e8, -1e8, 7]}"#)
                .unwrap();
        let result = input.calculate().unwrap();
        assert!(close_to(result.coefficient, Decimal::ONE));
        assert_eq!(result.strength, CorrelationStrength::Strong);
    }

    #[test]
    fn test_correlation_overflow_has_no_result() {
        assert!(pearson(&[Decimal::MAX, Decimal::MAX], &[dec!(1), dec!(2)]).is_none());
        assert!(pearson(&[Decimal::MAX, -Decimal::MAX], &[dec!(1), dec!(2)]).is_none());
    }

    #[test]
    fn test_volatility() {
        let result = VolatilityInput {
            prices: vec![dec!(100), dec!(110), dec!(99)],
            periods_per_year: TRADING_DAYS_PER_YEAR,
        }
        .calculate()
        .unwrap();
        assert_eq!(result.observations, 2);
        assert!(close_to(result.mean_return_percent, Decimal::ZERO));
        assert!(close_to(result.period_volatility_percent, dec!(14.1421)));
        assert!(close_to(result.annualized_volatility_percent, dec!(224.4994)));
    }

    #[test]
    fn test_flat_prices_have_no_volatility() {
        let result = VolatilityInput {
            prices: vec![dec!(50); 5],
            periods_per_year: 12,
        }
        .calculate()
        .unwrap();
        assert_eq!(result.annualized_volatility_percent, Decimal::ZERO);
    }

    #[test]
    fn test_volatility_guards() {
        let short = VolatilityInput {
            prices: vec![dec!(1), dec!(2)],
            periods_per_year: 252,
        };
        assert!(short.calculate().is_none());
        let negative = VolatilityInput {
            prices: vec![dec!(1), dec!(-2), dec!(3)],
            periods_per_year: 252,
        };
        assert!(negative.calculate().is_none());
    }
}
