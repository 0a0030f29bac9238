use crate::Calculator;
use crate::input::{all_positive, percent_of};
use core_types::TradeDirection;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Gold moves 0.10 per pip and pays 10 per pip per standard lot.
pub const GOLD_PIPS_PER_POINT: Decimal = dec!(10);
pub const GOLD_PIP_VALUE_PER_LOT: Decimal = dec!(10);

fn default_pip_size() -> Decimal {
    dec!(0.0001)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLossInput {
    pub entry_price: Decimal,
    pub exit_price: Decimal,
    pub position_size: Decimal,
    #[serde(default)]
    pub direction: TradeDirection,
    /// Price increment of one pip (0.01 for JPY pairs).
    #[serde(default = "default_pip_size")]
    pub pip_size: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLossResult {
    pub pips: Decimal,
    pub profit: Decimal,
    pub return_percent: Decimal,
    pub is_profit: bool,
}

impl Calculator for ProfitLossInput {
    type Output = ProfitLossResult;

    fn calculate(&self) -> Option<ProfitLossResult> {
        if !all_positive(&[self.entry_price, self.exit_price, self.position_size, self.pip_size]) {
            return None;
        }

        let move_in_favour = match self.direction {
            TradeDirection::Long => self.exit_price - self.entry_price,
            TradeDirection::Short => self.entry_price - self.exit_price,
        };
        let profit = move_in_favour.checked_mul(self.position_size)?;

        Some(ProfitLossResult {
            pips: move_in_favour.checked_div(self.pip_size)?,
            profit,
            return_percent: percent_of(move_in_favour, self.entry_price)?,
            is_profit: profit > Decimal::ZERO,
        })
    }
}

// ==============================================================================
// Gold (XAUUSD) profit
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoldProfitInput {
    pub entry_price: Decimal,
    pub exit_price: Decimal,
    #[serde(alias = "lot")]
    pub lot_size: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoldProfitResult {
    /// Signed pip move from entry to exit.
    pub pips: Decimal,
    pub profit: Decimal,
}

impl Calculator for GoldProfitInput {
    type Output = GoldProfitResult;

    fn calculate(&self) -> Option<GoldProfitResult> {
        if !all_positive(&[self.entry_price, self.exit_price, self.lot_size]) {
            return None;
        }
        let pips = (self.exit_price - self.entry_price).checked_mul(GOLD_PIPS_PER_POINT)?;
        let profit = pips
            .checked_mul(self.lot_size)?
            .checked_mul(GOLD_PIP_VALUE_PER_LOT)?;
        Some(GoldProfitResult { pips, profit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(entry: Decimal, exit: Decimal, direction: TradeDirection) -> ProfitLossInput {
        ProfitLossInput {
            entry_price: entry,
            exit_price: exit,
            position_size: dec!(100000),
            direction,
            pip_size: default_pip_size(),
        }
    }

    #[test]
    fn test_long_winner() {
        let result = input(dec!(1.0900), dec!(1.0950), TradeDirection::Long).calculate().unwrap();
        assert_eq!(result.pips, dec!(50));
        assert_eq!(result.profit, dec!(500));
        assert!(result.is_profit);
    }

    #[test]
    fn test_short_sign_is_flipped() {
        let result = input(dec!(1.0900), dec!(1.0950), TradeDirection::Short).calculate().unwrap();
        assert_eq!(result.pips, dec!(-50));
        assert_eq!(result.profit, dec!(-500));
        assert!(!result.is_profit);
    }

    #[test]
    fn test_jpy_pip_size() {
        let mut i = input(dec!(150.00), dec!(150.25), TradeDirection::Long);
        i.pip_size = dec!(0.01);
        i.position_size = dec!(1000);
        let result = i.calculate().unwrap();
        assert_eq!(result.pips, dec!(25));
        assert_eq!(result.profit, dec!(250));
    }

    #[test]
    fn test_gold_profit_default_form() {
        let result = GoldProfitInput {
            entry_price: dec!(3100),
            exit_price: dec!(3120),
            lot_size: dec!(0.1),
        }
        .calculate()
        .unwrap();
        assert_eq!(result.pips, dec!(200));
        assert_eq!(result.profit, dec!(200));
    }

    #[test]
    fn test_gold_loss_and_guards() {
        let result = GoldProfitInput {
            entry_price: dec!(3120),
            exit_price: dec!(3100),
            lot_size: dec!(1),
        }
        .calculate()
        .unwrap();
        assert_eq!(result.profit, dec!(-2000));
        let invalid = GoldProfitInput {
            entry_price: dec!(3120),
            exit_price: dec!(3100),
            lot_size: Decimal::ZERO,
        };
        assert!(invalid.calculate().is_none());
    }

    #[test]
    fn test_overflowing_profit_has_no_result() {
        let gold = GoldProfitInput {
            entry_price: dec!(1),
            exit_price: dec!(10000000000000000000000000000),
            lot_size: dec!(1),
        };
        assert!(gold.calculate().is_none());
    }
}
