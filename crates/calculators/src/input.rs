use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Parses free-text numeric input the way a form field would: surrounding whitespace is
/// ignored, plain and scientific notation are accepted, anything else yields `None`.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Like [`parse_decimal`] but only accepts values strictly greater than zero.
pub fn parse_positive(raw: &str) -> Option<Decimal> {
    parse_decimal(raw).filter(|value| *value > Decimal::ZERO)
}

pub(crate) fn all_positive(values: &[Decimal]) -> bool {
    values.iter().all(|value| *value > Decimal::ZERO)
}

/// `part / whole * 100`, or `None` when `whole` is zero or the result does not fit.
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    part.checked_div(whole)?.checked_mul(Decimal::ONE_HUNDRED)
}

/// Sums the values, or `None` on overflow.
pub(crate) fn checked_sum<'a>(values: impl IntoIterator<Item = &'a Decimal>) -> Option<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |total, value| total.checked_add(*value))
}

fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => parse_decimal(&number.to_string()),
        Value::String(text) => parse_decimal(text),
        _ => None,
    }
}

/// Deserializes a table cell: unparsable or missing values become `None` so the row can be
/// skipped instead of rejecting the whole request.
pub(crate) fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(decimal_from_value))
}

/// Deserializes a series given either as a JSON array or as a comma/whitespace separated
/// string ("1.2, 1.4, 1.1"). Any token that is not a number is an error.
pub(crate) fn decimal_list<'de, D>(deserializer: D) -> Result<Vec<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .iter()
            .map(|item| {
                decimal_from_value(item)
                    .ok_or_else(|| D::Error::custom(format!("'{}' is not a number", item)))
            })
            .collect(),
        Value::String(text) => text
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                parse_decimal(token)
                    .ok_or_else(|| D::Error::custom(format!("'{}' is not a number", token)))
            })
            .collect(),
        Value::Null => Ok(Vec::new()),
        other => Err(D::Error::custom(format!(
            "expected a list of numbers, found {}",
            other
        ))),
    }
}
