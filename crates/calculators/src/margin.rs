use crate::Calculator;
use crate::input::{all_positive, percent_of};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_price() -> Decimal {
    Decimal::ONE
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginInput {
    /// Position size in units of the instrument.
    pub position_size: Decimal,
    /// Price per unit. Defaults to 1, i.e. `position_size` is already a notional value.
    #[serde(default = "default_price")]
    pub price: Decimal,
    /// Leverage ratio, e.g. 100 for 1:100.
    pub leverage: Decimal,
    #[serde(default)]
    pub account_balance: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginResult {
    pub position_value: Decimal,
    pub required_margin: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_margin: Option<Decimal>,
    /// Balance over used margin, in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_level: Option<Decimal>,
    /// Position value over balance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_leverage: Option<Decimal>,
}

impl Calculator for MarginInput {
    type Output = MarginResult;

    fn calculate(&self) -> Option<MarginResult> {
        if !all_positive(&[self.position_size, self.price, self.leverage]) {
            return None;
        }
        let balance = match self.account_balance {
            Some(balance) if balance <= Decimal::ZERO => return None,
            other => other,
        };

        let position_value = self.position_size.checked_mul(self.price)?;
        let required_margin = position_value.checked_div(self.leverage)?;

        Some(MarginResult {
            position_value,
            required_margin,
            free_margin: balance.map(|b| b - required_margin),
            margin_level: balance.and_then(|b| percent_of(b, required_margin)),
            effective_leverage: balance.and_then(|b| position_value.checked_div(b)),
        })
    }
}
