use crate::Calculator;
use crate::input::{all_positive, percent_of};
use core_types::TradeDirection;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// ATR multiples offered as one-click presets.
pub const QUICK_MULTIPLES: [Decimal; 5] = [dec!(1), dec!(1.5), dec!(2), dec!(2.5), dec!(3)];

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtrStopInput {
    pub atr_value: Decimal,
    pub atr_multiple: Decimal,
    pub current_price: Decimal,
    #[serde(default)]
    pub direction: TradeDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtrStopResult {
    pub stop_price: Decimal,
    pub stop_distance: Decimal,
    pub stop_percent: Decimal,
    pub atr_value: Decimal,
    pub atr_multiple: Decimal,
    pub current_price: Decimal,
    pub direction: TradeDirection,
}

impl Calculator for AtrStopInput {
    type Output = AtrStopResult;

    fn calculate(&self) -> Option<AtrStopResult> {
        if !all_positive(&[self.atr_value, self.atr_multiple, self.current_price]) {
            return None;
        }

        let stop_distance = self.atr_value.checked_mul(self.atr_multiple)?;
        let stop_price = match self.direction {
            TradeDirection::Long => self.current_price - stop_distance,
            TradeDirection::Short => self.current_price.checked_add(stop_distance)?,
        };

        Some(AtrStopResult {
            stop_price,
            stop_distance,
            stop_percent: percent_of(stop_distance, self.current_price)?,
            atr_value: self.atr_value,
            atr_multiple: self.atr_multiple,
            current_price: self.current_price,
            direction: self.direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(direction: TradeDirection) -> AtrStopInput {
        AtrStopInput {
            atr_value: dec!(0.0025),
            atr_multiple: dec!(2),
            current_price: dec!(1.09000),
            direction,
        }
    }

    #[test]
    fn test_long_stop_below_price() {
        let result = input(TradeDirection::Long).calculate().unwrap();
        assert_eq!(result.stop_distance, dec!(0.005));
        assert_eq!(result.stop_price, dec!(1.085));
        assert!(result.stop_percent > dec!(0.458) && result.stop_percent < dec!(0.459));
    }

    #[test]
    fn test_short_stop_above_price() {
        let result = input(TradeDirection::Short).calculate().unwrap();
        assert_eq!(result.stop_price, dec!(1.095));
        assert_eq!(result.direction, TradeDirection::Short);
    }

    #[test]
    fn test_every_quick_multiple_scales_distance() {
        for multiple in QUICK_MULTIPLES {
            let mut i = input(TradeDirection::Long);
            i.atr_multiple = multiple;
            let result = i.calculate().unwrap();
            assert_eq!(result.stop_distance, dec!(0.0025) * multiple);
        }
    }

    #[test]
    fn test_non_positive_inputs() {
        let mut i = input(TradeDirection::Long);
        i.atr_value = Decimal::ZERO;
        assert!(i.calculate().is_none());
        let mut i = input(TradeDirection::Long);
        i.current_price = dec!(-1);
        assert!(i.calculate().is_none());
    }

    #[test]
    fn test_overflowing_stop_has_no_result() {
        let mut i = input(TradeDirection::Short);
        i.atr_value = Decimal::MAX;
        i.atr_multiple = dec!(2);
        assert!(i.calculate().is_none());
    }
}
