use crate::Calculator;
use crate::input::all_positive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PivotMethod {
    #[default]
    Classic,
    Woodie,
    Camarilla,
    Fibonacci,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotInput {
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    #[serde(default)]
    pub method: PivotMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotLevels {
    pub method: PivotMethod,
    pub pivot: Decimal,
    pub r1: Decimal,
    pub r2: Decimal,
    pub r3: Decimal,
    pub s1: Decimal,
    pub s2: Decimal,
    pub s3: Decimal,
}

/// Floor-trader pivots from the previous session's high, low and close.
pub fn classic(high: Decimal, low: Decimal, close: Decimal) -> Option<PivotLevels> {
    PivotInput {
        high,
        low,
        close,
        method: PivotMethod::Classic,
    }
    .calculate()
}

fn floor_levels(
    method: PivotMethod,
    pivot: Decimal,
    high: Decimal,
    low: Decimal,
) -> Option<PivotLevels> {
    let range = high - low;
    let twice = pivot.checked_mul(Decimal::TWO)?;
    Some(PivotLevels {
        method,
        pivot,
        r1: twice.checked_sub(low)?,
        r2: pivot.checked_add(range)?,
        r3: high.checked_add((pivot - low).checked_mul(Decimal::TWO)?)?,
        s1: twice.checked_sub(high)?,
        s2: pivot.checked_sub(range)?,
        s3: low.checked_sub((high - pivot).checked_mul(Decimal::TWO)?)?,
    })
}

impl Calculator for PivotInput {
    type Output = PivotLevels;

    /// `None` for invalid input and for prices too large to combine without overflow.
    fn calculate(&self) -> Option<PivotLevels> {
        let (high, low, close) = (self.high, self.low, self.close);
        if !all_positive(&[high, low, close]) || high < low {
            return None;
        }

        let range = high - low;
        let typical = high.checked_add(low)?.checked_add(close)? / dec!(3);

        match self.method {
            PivotMethod::Classic => floor_levels(self.method, typical, high, low),
            PivotMethod::Woodie => {
                let weighted = high
                    .checked_add(low)?
                    .checked_add(close.checked_mul(Decimal::TWO)?)?;
                floor_levels(self.method, weighted / dec!(4), high, low)
            }
            PivotMethod::Camarilla => {
                let step = |k: Decimal| range.checked_mul(dec!(1.1)).map(|wide| wide / k);
                Some(PivotLevels {
                    method: self.method,
                    pivot: typical,
                    r1: close.checked_add(step(dec!(12))?)?,
                    r2: close.checked_add(step(dec!(6))?)?,
                    r3: close.checked_add(step(dec!(4))?)?,
                    s1: close - step(dec!(12))?,
                    s2: close - step(dec!(6))?,
                    s3: close - step(dec!(4))?,
                })
            }
            PivotMethod::Fibonacci => Some(PivotLevels {
                method: self.method,
                pivot: typical,
                r1: typical.checked_add(range * dec!(0.382))?,
                r2: typical.checked_add(range * dec!(0.618))?,
                r3: typical.checked_add(range)?,
                s1: typical - range * dec!(0.382),
                s2: typical - range * dec!(0.618),
                s3: typical - range,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pivots(method: PivotMethod, close: Decimal) -> PivotLevels {
        PivotInput {
            high: dec!(110),
            low: dec!(90),
            close,
            method,
        }
        .calculate()
        .unwrap()
    }

    #[test]
    fn test_classic_formulas() {
        let p = pivots(PivotMethod::Classic, dec!(100));
        assert_eq!(p.pivot, dec!(100));
        assert_eq!((p.r1, p.r2, p.r3), (dec!(110), dec!(120), dec!(130)));
        assert_eq!((p.s1, p.s2, p.s3), (dec!(90), dec!(80), dec!(70)));
        assert_eq!(classic(dec!(110), dec!(90), dec!(100)), Some(p));
    }

    #[test]
    fn test_woodie_weights_the_close() {
        let p = pivots(PivotMethod::Woodie, dec!(106));
        assert_eq!(p.pivot, dec!(103));
        assert_eq!(p.r1, dec!(116));
        assert_eq!(p.s1, dec!(96));
    }

    #[test]
    fn test_camarilla_around_close() {
        let p = pivots(PivotMethod::Camarilla, dec!(100));
        assert_eq!(p.r3, dec!(105.5));
        assert_eq!(p.s3, dec!(94.5));
        assert!(p.r1 > dec!(101.83) && p.r1 < dec!(101.84));
        assert!(p.r1 < p.r2 && p.r2 < p.r3);
    }

    #[test]
    fn test_fibonacci_pivots() {
        let p = pivots(PivotMethod::Fibonacci, dec!(100));
        assert_eq!(p.r1, dec!(107.64));
        assert_eq!(p.r2, dec!(112.36));
        assert_eq!(p.r3, dec!(120));
        assert_eq!(p.s3, dec!(80));
    }

    #[test]
    fn test_guards() {
        assert!(classic(dec!(90), dec!(110), dec!(100)).is_none());
        assert!(classic(dec!(110), dec!(0), dec!(100)).is_none());
        // A flat session is still valid: every level collapses onto the pivot.
        let flat = classic(dec!(100), dec!(100), dec!(100)).unwrap();
        assert_eq!(flat.r3, dec!(100));
    }

    #[test]
    fn test_overflowing_prices_have_no_result() {
        assert!(classic(Decimal::MAX, dec!(1), dec!(1)).is_none());
        let woodie = PivotInput {
            high: Decimal::MAX,
            low: Decimal::MAX,
            close: Decimal::MAX,
            method: PivotMethod::Woodie,
        };
        assert!(woodie.calculate().is_none());
    }

    #[test]
    fn test_method_deserializes_lowercase() {
        let input: PivotInput =
            serde_json::from_str(r#"{"high":"3150","low":"3100","close":"3120","method":"camarilla"}"#)
                .unwrap();
        assert_eq!(input.method, PivotMethod::Camarilla);
        let input: PivotInput =
            serde_json::from_str(r#"{"high":3150,"low":3100,"close":3120}"#).unwrap();
        assert_eq!(input.method, PivotMethod::Classic);
    }
}
