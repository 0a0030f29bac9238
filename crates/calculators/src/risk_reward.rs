use crate::Calculator;
use crate::input::{all_positive, checked_sum, percent_of};
use core_types::TradeDirection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reward distance over risk distance. `None` when there is no risk to divide by.
pub fn rr_ratio(risk_distance: Decimal, reward_distance: Decimal) -> Option<Decimal> {
    if risk_distance <= Decimal::ZERO || reward_distance < Decimal::ZERO {
        return None;
    }
    reward_distance.checked_div(risk_distance)
}

// ==============================================================================
// Risk-Reward
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRewardInput {
    pub entry_price: Decimal,
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
    /// With `risk_percent`, turns the price distances into money at risk and potential profit.
    #[serde(default)]
    pub account_size: Option<Decimal>,
    #[serde(default)]
    pub risk_percent: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRewardResult {
    /// Long when the target sits above the entry.
    pub trade_type: TradeDirection,
    /// Price distance between entry and stop.
    pub risk_amount: Decimal,
    /// Price distance between target and entry.
    pub reward_amount: Decimal,
    pub risk_percent: Decimal,
    pub reward_percent: Decimal,
    pub rr_ratio: Decimal,
    pub r_multiple: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub money_at_risk: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potential_profit: Option<Decimal>,
}

impl Calculator for RiskRewardInput {
    type Output = RiskRewardResult;

    fn calculate(&self) -> Option<RiskRewardResult> {
        if !all_positive(&[self.entry_price, self.stop_loss, self.take_profit]) {
            return None;
        }
        if let Some(account) = self.account_size {
            if account <= Decimal::ZERO {
                return None;
            }
        }

        let trade_type = if self.take_profit > self.entry_price {
            TradeDirection::Long
        } else {
            TradeDirection::Short
        };
        let risk_amount = (self.entry_price - self.stop_loss).abs();
        let reward_amount = (self.take_profit - self.entry_price).abs();
        let ratio = rr_ratio(risk_amount, reward_amount)?;

        let money_at_risk = match (self.account_size, self.risk_percent) {
            (Some(account), Some(risk)) if risk > Decimal::ZERO => {
                Some(account.checked_mul(risk)? / Decimal::ONE_HUNDRED)
            }
            _ => None,
        };
        let potential_profit = match money_at_risk {
            Some(money) => Some(money.checked_mul(ratio)?),
            None => None,
        };

        Some(RiskRewardResult {
            trade_type,
            risk_amount,
            reward_amount,
            risk_percent: percent_of(risk_amount, self.entry_price)?,
            reward_percent: percent_of(reward_amount, self.entry_price)?,
            rr_ratio: ratio,
            r_multiple: ratio,
            money_at_risk,
            potential_profit,
        })
    }
}

// ==============================================================================
// R-Multiples
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RMultiplesInput {
    /// The amount risked per trade (1R).
    pub initial_risk: Decimal,
    /// Realised profit (positive) or loss (negative) of each trade.
    #[serde(deserialize_with = "crate::input::decimal_list")]
    pub results: Vec<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RMultiplesResult {
    pub r_multiples: Vec<Decimal>,
    pub total_r: Decimal,
    pub average_r: Decimal,
    pub winning_trades: usize,
    pub losing_trades: usize,
}

impl Calculator for RMultiplesInput {
    type Output = RMultiplesResult;

    fn calculate(&self) -> Option<RMultiplesResult> {
        if self.initial_risk <= Decimal::ZERO || self.results.is_empty() {
            return None;
        }

        let r_multiples = self
            .results
            .iter()
            .map(|pnl| pnl.checked_div(self.initial_risk))
            .collect::<Option<Vec<Decimal>>>()?;
        let total_r = checked_sum(&r_multiples)?;

        Some(RMultiplesResult {
            average_r: total_r / Decimal::from(r_multiples.len()),
            total_r,
            winning_trades: r_multiples.iter().filter(|r| **r > Decimal::ZERO).count(),
            losing_trades: r_multiples.iter().filter(|r| **r < Decimal::ZERO).count(),
            r_multiples,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(entry: Decimal, stop: Decimal, target: Decimal) -> RiskRewardInput {
        RiskRewardInput {
            entry_price: entry,
            stop_loss: stop,
            take_profit: target,
            account_size: None,
            risk_percent: None,
        }
    }

    #[test]
    fn test_long_setup() {
        let result = input(dec!(1.09000), dec!(1.08500), dec!(1.10000)).calculate().unwrap();
        assert_eq!(result.trade_type, TradeDirection::Long);
        assert_eq!(result.risk_amount, dec!(0.005));
        assert_eq!(result.reward_amount, dec!(0.01));
        assert_eq!(result.rr_ratio, dec!(2));
        assert_eq!(result.r_multiple, dec!(2));
        assert!(result.money_at_risk.is_none());
    }

    #[test]
    fn test_short_setup_with_money() {
        let mut i = input(dec!(100), dec!(102), dec!(94));
        i.account_size = Some(dec!(10000));
        i.risk_percent = Some(dec!(1));
        let result = i.calculate().unwrap();
        assert_eq!(result.trade_type, TradeDirection::Short);
        assert_eq!(result.rr_ratio, dec!(3));
        assert_eq!(result.money_at_risk, Some(dec!(100)));
        assert_eq!(result.potential_profit, Some(dec!(300)));
        assert_eq!(result.risk_percent, dec!(2));
    }

    #[test]
    fn test_ratio_is_scale_invariant() {
        for (risk, reward) in [(dec!(0.005), dec!(0.01)), (dec!(3), dec!(7)), (dec!(12.5), dec!(1))] {
            let base = rr_ratio(risk, reward).unwrap();
            let doubled = rr_ratio(risk * dec!(2), reward * dec!(2)).unwrap();
            assert!((base - doubled).abs() < dec!(0.0000000001));
        }
    }

    #[test]
    fn test_zero_risk_yields_nothing() {
        assert!(input(dec!(100), dec!(100), dec!(110)).calculate().is_none());
        assert!(input(dec!(0), dec!(1), dec!(2)).calculate().is_none());
        assert_eq!(rr_ratio(Decimal::ZERO, dec!(1)), None);
    }

    #[test]
    fn test_r_multiples() {
        let result = RMultiplesInput {
            initial_risk: dec!(100),
            results: vec![dec!(200), dec!(-100), dec!(350), dec!(-50)],
        }
        .calculate()
        .unwrap();
        assert_eq!(result.r_multiples, vec![dec!(2), dec!(-1), dec!(3.5), dec!(-0.5)]);
        assert_eq!(result.total_r, dec!(4));
        assert_eq!(result.average_r, dec!(1));
        assert_eq!(result.winning_trades, 2);
        assert_eq!(result.losing_trades, 2);
    }

    #[test]
    fn test_overflow_has_no_result() {
        let mut i = input(dec!(100), dec!(99), dec!(150));
        i.account_size = Some(Decimal::MAX);
        i.risk_percent = Some(dec!(50));
        assert!(i.calculate().is_none());

        let r = RMultiplesInput {
            initial_risk: dec!(0.001),
            results: vec![Decimal::MAX],
        };
        assert!(r.calculate().is_none());
        let r = RMultiplesInput {
            initial_risk: Decimal::ONE,
            results: vec![Decimal::MAX, Decimal::MAX],
        };
        assert!(r.calculate().is_none());
    }
}
