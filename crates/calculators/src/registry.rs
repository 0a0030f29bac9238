use crate::atr_stop::AtrStopInput;
use crate::break_even::{AveragePriceInput, BreakEvenInput};
use crate::error::CalculatorError;
use crate::fibonacci::FibonacciInput;
use crate::margin::MarginInput;
use crate::performance::{CompoundingInput, ExpectancyInput, KellyInput, SharpeInput, TimeToTargetInput};
use crate::pivot_points::PivotInput;
use crate::position_size::{LotSizeInput, PositionRiskInput, PositionSizeInput};
use crate::profit_loss::{GoldProfitInput, ProfitLossInput};
use crate::risk_reward::{RMultiplesInput, RiskRewardInput};
use crate::session_range::SessionRangeInput;
use crate::statistics::{CorrelationInput, VolatilityInput};
use crate::support_resistance::SupportResistanceInput;
use crate::Calculator;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Every slug [`evaluate`] can dispatch.
pub const SLUGS: [&str; 22] = [
    "position-size",
    "lot-size",
    "position-risk",
    "risk-reward",
    "r-multiples",
    "atr-stop",
    "margin-leverage",
    "break-even",
    "expectancy",
    "kelly-criterion",
    "fibonacci-retracement",
    "pivot-points",
    "support-resistance",
    "session-range",
    "profit-loss",
    "gold-profit",
    "compounding",
    "sharpe-ratio",
    "time-to-target",
    "average-price",
    "correlation",
    "volatility",
];

/// Runs the calculator registered under `slug` against a JSON input object.
///
/// # Errors
/// - `NotFound` for an unknown slug.
/// - `InvalidInput` when the JSON does not match the calculator's input shape.
/// - `NoResult` when the input is well-formed but fails the calculator's guards.
pub fn evaluate(slug: &str, input: Value) -> Result<Value, CalculatorError> {
    // The compiler cannot check this match against SLUGS; the test below does.
    match slug {
        "position-size" => run::<PositionSizeInput>(slug, input),
        "lot-size" => run::<LotSizeInput>(slug, input),
        "position-risk" => run::<PositionRiskInput>(slug, input),
        "risk-reward" => run::<RiskRewardInput>(slug, input),
        "r-multiples" => run::<RMultiplesInput>(slug, input),
        "atr-stop" => run::<AtrStopInput>(slug, input),
        "margin-leverage" => run::<MarginInput>(slug, input),
        "break-even" => run::<BreakEvenInput>(slug, input),
        "expectancy" => run::<ExpectancyInput>(slug, input),
        "kelly-criterion" => run::<KellyInput>(slug, input),
        "fibonacci-retracement" => run::<FibonacciInput>(slug, input),
        "pivot-points" => run::<PivotInput>(slug, input),
        "support-resistance" => run::<SupportResistanceInput>(slug, input),
        "session-range" => run::<SessionRangeInput>(slug, input),
        "profit-loss" => run::<ProfitLossInput>(slug, input),
        "gold-profit" => run::<GoldProfitInput>(slug, input),
        "compounding" => run::<CompoundingInput>(slug, input),
        "sharpe-ratio" => run::<SharpeInput>(slug, input),
        "time-to-target" => run::<TimeToTargetInput>(slug, input),
        "average-price" => run::<AveragePriceInput>(slug, input),
        "correlation" => run::<CorrelationInput>(slug, input),
        "volatility" => run::<VolatilityInput>(slug, input),
        _ => Err(CalculatorError::NotFound(slug.to_string())),
    }
}

fn run<C>(slug: &str, input: Value) -> Result<Value, CalculatorError>
where
    C: Calculator + DeserializeOwned,
{
    let parsed: C = serde_json::from_value(input).map_err(|e| CalculatorError::InvalidInput {
        slug: slug.to_string(),
        message: e.to_string(),
    })?;

    let output = parsed.calculate().ok_or_else(|| {
        tracing::debug!(slug, "Calculator inputs produced no result");
        CalculatorError::NoResult(slug.to_string())
    })?;

    serde_json::to_value(output).map_err(|e| CalculatorError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn decimal(value: &Value) -> Decimal {
        value.as_str().unwrap().parse().unwrap()
    }

    #[test]
    fn test_every_catalogue_entry_is_registered() {
        for calc in catalog::all() {
            assert!(SLUGS.contains(&calc.slug), "{} missing from SLUGS", calc.slug);
            let outcome = evaluate(calc.slug, json!({}));
            assert!(
                !matches!(outcome, Err(CalculatorError::NotFound(_))),
                "{} is not dispatched",
                calc.slug
            );
        }
        assert_eq!(SLUGS.len(), catalog::all().len());
    }

    #[test]
    fn test_evaluate_fibonacci() {
        let result = evaluate(
            "fibonacci-retracement",
            json!({"swingHigh": "1.09500", "swingLow": "1.08000", "direction": "uptrend"}),
        )
        .unwrap();
        let levels = result["levels"].as_array().unwrap();
        assert_eq!(levels.len(), 11);
        assert_eq!(levels[0]["label"], "0%");
        assert_eq!(decimal(&levels[6]["price"]), dec!(1.08));
        assert_eq!(levels[4]["type"], "retracement");
    }

    #[test]
    fn test_evaluate_accepts_numbers_and_strings() {
        let result = evaluate(
            "position-size",
            json!({"accountSize": 10000, "riskPercent": "1", "stopLossPips": 50, "pipValue": "10"}),
        )
        .unwrap();
        assert_eq!(decimal(&result["riskAmount"]), dec!(100));
        assert_eq!(result["unit"], "lots");
    }

    #[test]
    fn test_error_kinds() {
        assert!(matches!(
            evaluate("nope", json!({})),
            Err(CalculatorError::NotFound(slug)) if slug == "nope"
        ));
        assert!(matches!(
            evaluate("atr-stop", json!({"atrValue": "abc"})),
            Err(CalculatorError::InvalidInput { .. })
        ));
        assert!(matches!(
            evaluate(
                "risk-reward",
                json!({"entryPrice": 100, "stopLoss": 100, "takeProfit": 110})
            ),
            Err(CalculatorError::NoResult(_))
        ));
    }
}
