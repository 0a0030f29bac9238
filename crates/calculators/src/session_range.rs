use crate::Calculator;
use crate::input::{all_positive, percent_of};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRangeInput {
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRangeResult {
    pub range: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
    /// Range as a percentage of the open.
    pub volatility_score: Decimal,
    /// Where the close sits inside the range: 0 at the low, 100 at the high.
    pub close_position_percent: Decimal,
}

impl Calculator for SessionRangeInput {
    type Output = SessionRangeResult;

    fn calculate(&self) -> Option<SessionRangeResult> {
        let (open, high, low, close) = (self.open, self.high, self.low, self.close);
        if !all_positive(&[open, high, low, close])
            || high < low
            || open.max(close) > high
            || open.min(close) < low
        {
            return None;
        }

        let range = high - low;
        let change = close - open;
        let close_position_percent = if range.is_zero() {
            Decimal::ONE_HUNDRED / Decimal::TWO
        } else {
            percent_of(close - low, range)?
        };

        Some(SessionRangeResult {
            range,
            change,
            change_percent: percent_of(change, open)?,
            volatility_score: percent_of(range, open)?,
            close_position_percent,
        })
    }
}
