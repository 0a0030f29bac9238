use crate::Calculator;
use crate::input::{all_positive, percent_of};
use core_types::Market;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The smallest tradable forex lot (a micro lot).
pub const MIN_LOT: Decimal = dec!(0.01);
/// Units in one standard forex lot.
pub const STANDARD_LOT_UNITS: Decimal = dec!(100000);

fn default_market() -> Market {
    Market::Forex
}

fn default_pip_value_per_lot() -> Decimal {
    dec!(10)
}

// ==============================================================================
// Position Size
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSizeInput {
    pub account_size: Decimal,
    pub risk_percent: Decimal,
    /// Stop-loss distance in pips (or price units for non-forex instruments).
    #[serde(alias = "stopLossDistance")]
    pub stop_loss_pips: Decimal,
    /// Value of one pip for one lot/unit, in account currency.
    pub pip_value: Decimal,
    #[serde(default = "default_market")]
    pub instrument: Market,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSizeResult {
    pub risk_amount: Decimal,
    /// Exact size such that `size * stop * pip_value == risk_amount`.
    pub position_size: Decimal,
    /// Size floored to two decimals, never below the minimum lot.
    pub rounded_lots: Decimal,
    /// "lots" for forex, "units" otherwise.
    pub unit: String,
    pub pip_value: Decimal,
}

impl Calculator for PositionSizeInput {
    type Output = PositionSizeResult;

    fn calculate(&self) -> Option<PositionSizeResult> {
        // A zero risk is allowed and sizes to nothing.
        if !all_positive(&[self.account_size, self.stop_loss_pips, self.pip_value])
            || self.risk_percent < Decimal::ZERO
        {
            return None;
        }

        let risk_amount = self.account_size.checked_mul(self.risk_percent)? / Decimal::ONE_HUNDRED;
        let position_size =
            risk_amount.checked_div(self.stop_loss_pips.checked_mul(self.pip_value)?)?;
        let rounded_lots = position_size
            .round_dp_with_strategy(2, RoundingStrategy::ToZero)
            .max(MIN_LOT);
        let unit = match self.instrument {
            Market::Forex => "lots",
            _ => "units",
        };

        Some(PositionSizeResult {
            risk_amount,
            position_size,
            rounded_lots,
            unit: unit.to_string(),
            pip_value: self.pip_value,
        })
    }
}

// ==============================================================================
// Lot Size (Forex)
// ==============================================================================

/// Lot sizing from a per-standard-lot pip value. Gold (XAUUSD) uses the default of
/// 10 per pip per lot.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotSizeInput {
    pub account_balance: Decimal,
    pub risk_percent: Decimal,
    pub stop_loss_pips: Decimal,
    #[serde(default = "default_pip_value_per_lot")]
    pub pip_value_per_lot: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LotSizeResult {
    pub risk_amount: Decimal,
    pub standard_lots: Decimal,
    pub mini_lots: Decimal,
    pub micro_lots: Decimal,
    pub units: Decimal,
    pub pip_value_per_lot: Decimal,
}

impl Calculator for LotSizeInput {
    type Output = LotSizeResult;

    fn calculate(&self) -> Option<LotSizeResult> {
        if !all_positive(&[
            self.account_balance,
            self.risk_percent,
            self.stop_loss_pips,
            self.pip_value_per_lot,
        ]) {
            return None;
        }

        let risk_amount = self.account_balance.checked_mul(self.risk_percent)? / Decimal::ONE_HUNDRED;
        let standard_lots =
            risk_amount.checked_div(self.stop_loss_pips.checked_mul(self.pip_value_per_lot)?)?;

        Some(LotSizeResult {
            risk_amount,
            standard_lots,
            mini_lots: standard_lots.checked_mul(Decimal::TEN)?,
            micro_lots: standard_lots.checked_mul(Decimal::ONE_HUNDRED)?,
            units: standard_lots
                .checked_mul(STANDARD_LOT_UNITS)?
                .round_dp_with_strategy(0, RoundingStrategy::ToZero),
            pip_value_per_lot: self.pip_value_per_lot,
        })
    }
}

// ==============================================================================
// Position Risk
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRiskInput {
    pub position_size: Decimal,
    pub entry_price: Decimal,
    pub stop_loss: Decimal,
    pub account_equity: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRiskResult {
    pub risk_amount: Decimal,
    pub risk_percent: Decimal,
    pub position_value: Decimal,
    /// Position value as a multiple of equity.
    pub exposure: Decimal,
}

impl Calculator for PositionRiskInput {
    type Output = PositionRiskResult;

    fn calculate(&self) -> Option<PositionRiskResult> {
        if !all_positive(&[
            self.position_size,
            self.entry_price,
            self.stop_loss,
            self.account_equity,
        ]) {
            return None;
        }

        let risk_amount = self
            .position_size
            .checked_mul((self.entry_price - self.stop_loss).abs())?;
        let position_value = self.position_size.checked_mul(self.entry_price)?;

        Some(PositionRiskResult {
            risk_amount,
            risk_percent: percent_of(risk_amount, self.account_equity)?,
            position_value,
            exposure: position_value.checked_div(self.account_equity)?,
        })
    }
}
