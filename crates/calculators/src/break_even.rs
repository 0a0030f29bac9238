use crate::Calculator;
use crate::input::{lenient_decimal, percent_of};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One entry of a scaled-in position. Cells that are blank or not numeric are kept as
/// `None` and the row is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PositionEntry {
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price: Option<Decimal>,
    #[serde(default, alias = "quantity", deserialize_with = "lenient_decimal")]
    pub size: Option<Decimal>,
}

impl PositionEntry {
    pub fn new(price: Decimal, size: Decimal) -> Self {
        Self {
            price: Some(price),
            size: Some(size),
        }
    }

    fn valid(&self) -> Option<(Decimal, Decimal)> {
        match (self.price, self.size) {
            (Some(price), Some(size)) if price > Decimal::ZERO && size > Decimal::ZERO => {
                Some((price, size))
            }
            _ => None,
        }
    }
}

/// Weighted average over the valid rows: `(average, total_size, total_value)`.
/// `None` when no row is valid or the totals overflow.
pub fn weighted_average(entries: &[PositionEntry]) -> Option<(Decimal, Decimal, Decimal)> {
    let (total_value, total_size) = entries
        .iter()
        .filter_map(PositionEntry::valid)
        .try_fold((Decimal::ZERO, Decimal::ZERO), |(value, size), (p, s)| {
            Some((value.checked_add(p.checked_mul(s)?)?, size.checked_add(s)?))
        })?;

    if total_size.is_zero() {
        return None;
    }
    Some((total_value.checked_div(total_size)?, total_size, total_value))
}

// ==============================================================================
// Break-Even (DCA)
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakEvenInput {
    pub positions: Vec<PositionEntry>,
    pub current_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakEvenResult {
    pub average_price: Decimal,
    pub total_size: Decimal,
    pub total_value: Decimal,
    pub current_price: Decimal,
    pub pnl: Decimal,
    pub pnl_percent: Decimal,
}

impl Calculator for BreakEvenInput {
    type Output = BreakEvenResult;

    fn calculate(&self) -> Option<BreakEvenResult> {
        if self.current_price <= Decimal::ZERO {
            return None;
        }
        let (average_price, total_size, total_value) = weighted_average(&self.positions)?;
        let delta = self.current_price - average_price;

        Some(BreakEvenResult {
            average_price,
            total_size,
            total_value,
            current_price: self.current_price,
            pnl: delta.checked_mul(total_size)?,
            pnl_percent: percent_of(delta, average_price)?,
        })
    }
}

// ==============================================================================
// Average Price (DCA)
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AveragePriceInput {
    #[serde(alias = "positions")]
    pub entries: Vec<PositionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AveragePriceResult {
    pub average_price: Decimal,
    pub total_quantity: Decimal,
    pub total_investment: Decimal,
}

impl Calculator for AveragePriceInput {
    type Output = AveragePriceResult;

    fn calculate(&self) -> Option<AveragePriceResult> {
        let (average_price, total_quantity, total_investment) = weighted_average(&self.entries)?;
        Some(AveragePriceResult {
            average_price,
            total_quantity,
            total_investment,
        })
    }
}
