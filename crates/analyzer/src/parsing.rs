//! Turning free-form model output into an `AnalyzeResponse`.

use crate::error::AnalyzerError;
use crate::messages::Messages;
use crate::render::{format_change_percent, format_price};
use configuration::AnalysisSettings;
use core_types::{AnalyzeResponse, Bias, KeyLevel, Quote, Scenario};
use serde_json::{Map, Value};

/// Locates the JSON object in a model reply.
///
/// Markdown code fences (with or without a `json` tag) are stripped, then the first `{` and
/// its matching `}` are located. Braces inside string literals are ignored. Returns `None`
/// when no balanced object is present.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .map(|inner| inner.trim_end().strip_suffix("```").unwrap_or(inner))
        .unwrap_or(trimmed);

    let start = unfenced.find('{')?;
    let candidate = &unfenced[start..];

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;
    for (index, ch) in candidate.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&candidate[..=index]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Reads a model reply into the response shape, applying the defaults and caps.
///
/// `currentPrice`/`priceChange` always come from the live quote, never from the model.
pub fn shape_completion(
    content: &str,
    quote: Option<&Quote>,
    decimals: u32,
    settings: &AnalysisSettings,
    messages: &Messages,
) -> Result<AnalyzeResponse, AnalyzerError> {
    let json = extract_json_object(content)
        .ok_or_else(|| AnalyzerError::MalformedOutput("no JSON object in reply".to_string()))?;
    let value: Value =
        serde_json::from_str(json).map_err(|e| AnalyzerError::MalformedOutput(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| AnalyzerError::MalformedOutput("reply is not a JSON object".to_string()))?;

    let bias = object
        .get("bias")
        .and_then(Value::as_str)
        .map(Bias::from_lenient)
        .unwrap_or_default();

    let key_levels = objects(object, "keyLevels")
        .map(|level| KeyLevel {
            kind: text_field(level, "type"),
            price: text_field(level, "price"),
            note: text_field(level, "note"),
        })
        .take(settings.max_key_levels)
        .collect();

    let scenarios = objects(object, "scenarios")
        .map(|scenario| Scenario {
            condition: text_field(scenario, "condition"),
            action: text_field(scenario, "action"),
            target: text_field(scenario, "target"),
        })
        .take(settings.max_scenarios)
        .collect();

    let risk_note = non_empty(object, "riskNote").unwrap_or_else(|| messages.default_risk_note.to_string());
    let raw_text = non_empty(object, "rawText").unwrap_or_else(|| messages.default_raw_text.to_string());

    let (current_price, price_change) = quote_fields(quote, decimals, messages);

    Ok(AnalyzeResponse {
        bias,
        current_price: Some(current_price),
        price_change: Some(price_change),
        key_levels,
        scenarios,
        risk_note,
        raw_text,
    })
}

/// The rendered current price and signed daily change, or "N/A" for both.
pub fn quote_fields(quote: Option<&Quote>, decimals: u32, messages: &Messages) -> (String, String) {
    match quote {
        Some(quote) => (
            format_price(quote.price, decimals),
            format_change_percent(quote.change, quote.change_percent),
        ),
        None => (
            messages.not_available.to_string(),
            messages.not_available.to_string(),
        ),
    }
}

fn objects<'a>(object: &'a Map<String, Value>, key: &str) -> impl Iterator<Item = &'a Map<String, Value>> {
    object
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

/// Models sometimes emit prices as numbers; every field is rendered as text.
fn text_field(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn non_empty(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Locale;
    use rust_decimal_macros::dec;

    fn messages() -> &'static Messages {
        Messages::for_locale(Locale::En)
    }

    #[test]
    fn test_extract_plain_and_fenced() {
        assert_eq!(extract_json_object("{\"a\":1}"), Some("{\"a\":1}"));
        assert_eq!(
            extract_json_object("```json\n{\"a\": {\"b\": 2}}\n```"),
            Some("{\"a\": {\"b\": 2}}")
        );
        assert_eq!(
            extract_json_object("Here you go:\n```\n{\"a\":1}\n```\nGood luck"),
            Some("{\"a\":1}")
        );
    }

    #[test]
    fn test_extract_ignores_braces_in_strings() {
        let text = r#"Sure. {"rawText": "close above } and \"{\" here", "bias": "bullish"} trailing"#;
        let json = extract_json_object(text).unwrap();
        let value: Value = serde_json::from_str(json).unwrap();
        assert_eq!(value["bias"], "bullish");
    }

    #[test]
    fn test_extract_unbalanced_is_none() {
        assert_eq!(extract_json_object("{\"a\": 1"), None);
        assert_eq!(extract_json_object("no json here"), None);
    }

    #[test]
    fn test_shape_applies_defaults_and_caps() {
        let levels: Vec<Value> = (0..9)
            .map(|i| serde_json::json!({ "type": format!("L{i}"), "price": 100 + i, "note": "n" }))
            .collect();
        let scenarios: Vec<Value> = (0..6)
            .map(|i| serde_json::json!({ "condition": format!("C{i}"), "action": "buy", "target": "1" }))
            .collect();
        let content = serde_json::json!({
            "bias": "SIDEWAYS",
            "keyLevels": levels,
            "scenarios": scenarios,
            "riskNote": "  "
        })
        .to_string();

        let response = shape_completion(
            &content,
            None,
            2,
            &AnalysisSettings::default(),
            messages(),
        )
        .unwrap();
        assert_eq!(response.bias, Bias::Neutral);
        assert_eq!(response.key_levels.len(), 6);
        assert_eq!(response.key_levels[0].price, "100");
        assert_eq!(response.scenarios.len(), 4);
        assert_eq!(response.risk_note, messages().default_risk_note);
        assert_eq!(response.raw_text, messages().default_raw_text);
        assert_eq!(response.current_price.as_deref(), Some("N/A"));
    }

    #[test]
    fn test_shape_uses_quote_for_price_fields() {
        let quote = Quote {
            ticker: "GC=F".to_string(),
            price: dec!(2350.456),
            change: dec!(-4.2),
            change_percent: dec!(-0.178),
            high: dec!(2360),
            low: dec!(2340),
            previous_close: dec!(2354.656),
            as_of: None,
        };
        let content = r#"{"bias":"bearish","keyLevels":[],"scenarios":[],"currentPrice":"9999","rawText":"ok"}"#;
        let response =
            shape_completion(content, Some(&quote), 2, &AnalysisSettings::default(), messages())
                .unwrap();
        assert_eq!(response.bias, Bias::Bearish);
        assert_eq!(response.current_price.as_deref(), Some("2350.46"));
        assert_eq!(response.price_change.as_deref(), Some("-0.18%"));
        assert_eq!(response.raw_text, "ok");
    }

    #[test]
    fn test_shape_rejects_non_json() {
        assert!(matches!(
            shape_completion("I cannot help", None, 2, &AnalysisSettings::default(), messages()),
            Err(AnalyzerError::MalformedOutput(_))
        ));
    }
}
