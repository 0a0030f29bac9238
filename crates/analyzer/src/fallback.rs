//! The deterministic analysis served when the model cannot be used.
//!
//! Everything here is computed from the live quote and the request itself: a bias from the
//! day's move (or the wording of the question), pivot levels and two pivot-based scenarios.

use crate::messages::Messages;
use crate::parsing::quote_fields;
use crate::render::{format_change_percent, format_price};
use calculators::fibonacci_levels;
use calculators::input::parse_positive;
use calculators::pivot_points::{PivotLevels, classic};
use configuration::AnalysisSettings;
use core_types::{AnalyzeRequest, AnalyzeResponse, Bias, KeyLevel, Quote, Scenario, TrendDirection};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const BULLISH_WORDS: [&str; 12] = [
    "bullish", "buy", "long", "uptrend", "breakout", "rally", "rise", "rising", "bounce", "higher",
    "pump", "moon",
];
const BEARISH_WORDS: [&str; 12] = [
    "bearish", "sell", "short", "downtrend", "breakdown", "drop", "fall", "falling", "crash",
    "decline", "lower", "dump",
];
const BULLISH_ARABIC: [&str; 6] = ["صعود", "صاعد", "شراء", "ارتفاع", "اختراق", "إيجابي"];
const BEARISH_ARABIC: [&str; 6] = ["هبوط", "هابط", "بيع", "انخفاض", "كسر", "سلبي"];

/// Fibonacci retracements quoted next to request-level pivots.
const FALLBACK_FIB_LEVELS: [Decimal; 2] = [dec!(38.2), dec!(61.8)];

/// Scores the wording of a question: each bullish keyword counts +1, each bearish one -1.
///
/// English keywords match whole words, Arabic ones match anywhere in the text.
pub fn keyword_sentiment(text: &str) -> Bias {
    let lower = text.to_lowercase();
    let mut score: i32 = 0;

    for word in lower.split(|c: char| !c.is_alphanumeric()) {
        if BULLISH_WORDS.contains(&word) {
            score += 1;
        } else if BEARISH_WORDS.contains(&word) {
            score -= 1;
        }
    }
    for keyword in BULLISH_ARABIC {
        score += lower.matches(keyword).count() as i32;
    }
    for keyword in BEARISH_ARABIC {
        score -= lower.matches(keyword).count() as i32;
    }

    match score.cmp(&0) {
        std::cmp::Ordering::Greater => Bias::Bullish,
        std::cmp::Ordering::Less => Bias::Bearish,
        std::cmp::Ordering::Equal => Bias::Neutral,
    }
}

/// The bias implied by the day's move, if it is outside the neutral band.
pub fn bias_from_quote(quote: &Quote, neutral_band_pct: Decimal) -> Option<Bias> {
    if quote.change_percent.is_zero() || quote.change_percent.abs() < neutral_band_pct {
        return None;
    }
    Some(if quote.change_percent.is_sign_positive() {
        Bias::Bullish
    } else {
        Bias::Bearish
    })
}

/// Builds the local analysis. Always yields at least one key level.
pub fn fallback_analysis(
    request: &AnalyzeRequest,
    quote: Option<&Quote>,
    settings: &AnalysisSettings,
    messages: &Messages,
) -> AnalyzeResponse {
    let decimals = request.market.price_decimals();
    let symbol = request.symbol.trim();

    let bias = quote
        .and_then(|quote| bias_from_quote(quote, settings.neutral_band_pct))
        .unwrap_or_else(|| keyword_sentiment(&request.user_prompt));

    let (key_levels, pivots) = match quote {
        Some(quote) => quote_levels(quote, decimals, messages),
        None => match request_levels(request) {
            Some((high, low, close)) => match classic(high, low, close) {
                Some(pivots) => (
                    request_pivot_levels(&pivots, high, low, decimals, messages),
                    Some(pivots),
                ),
                None => (vec![reference_level(messages)], None),
            },
            None => (vec![reference_level(messages)], None),
        },
    };

    let scenarios = pivots
        .as_ref()
        .map(|pivots| pivot_scenarios(pivots, decimals, messages))
        .unwrap_or_default();

    // Without a quote the price fields are omitted rather than "N/A".
    let (current_price, price_change) = quote
        .map(|_| quote_fields(quote, decimals, messages))
        .unzip();

    let (risk_note, raw_text) = match quote {
        Some(quote) => (
            messages.fallback_risk_note.to_string(),
            format!(
                "{} {}:\n\n{}: {}\n{}: {}\n{}: {}\n{}: {}\n\n{}",
                messages.real_data_for,
                symbol,
                messages.current_price,
                format_price(quote.price, decimals),
                messages.change_label,
                format_change_percent(quote.change, quote.change_percent),
                messages.day_high,
                format_price(quote.high, decimals),
                messages.day_low,
                format_price(quote.low, decimals),
                messages.retry_hint,
            ),
        ),
        None => {
            let mut text = format!("{} {}.", messages.no_price_for, symbol);
            if pivots.is_some() {
                text.push('\n');
                text.push_str(messages.levels_used);
            }
            text.push_str("\n\n");
            text.push_str(messages.retry_hint);
            (messages.fallback_risk_note_no_price.to_string(), text)
        }
    };

    AnalyzeResponse {
        bias,
        current_price,
        price_change,
        key_levels,
        scenarios,
        risk_note,
        raw_text,
    }
}

fn quote_levels(
    quote: &Quote,
    decimals: u32,
    messages: &Messages,
) -> (Vec<KeyLevel>, Option<PivotLevels>) {
    let pivots = classic(quote.high, quote.low, quote.price);

    let mut levels = vec![
        level(messages.resistance_r1, quote.high, decimals, messages.day_high_note),
        KeyLevel {
            kind: messages.current_price.to_string(),
            price: format_price(quote.price, decimals),
            note: format!(
                "{}: {}",
                messages.change_label,
                format_change_percent(quote.change, quote.change_percent)
            ),
        },
    ];
    if let Some(pivots) = &pivots {
        levels.push(level(messages.pivot_point, pivots.pivot, decimals, messages.pivot_note));
    }
    levels.push(level(messages.support_s1, quote.low, decimals, messages.day_low_note));

    (levels, pivots)
}

/// High, low and close typed by the user. A missing close is taken as the range midpoint.
fn request_levels(request: &AnalyzeRequest) -> Option<(Decimal, Decimal, Decimal)> {
    let levels = request.levels.as_ref()?;
    let high = parse_positive(levels.high.as_deref()?)?;
    let low = parse_positive(levels.low.as_deref()?)?;
    let close = levels
        .close
        .as_deref()
        .and_then(parse_positive)
        .unwrap_or_else(|| low + (high - low) / Decimal::TWO);
    Some((high, low, close))
}

fn request_pivot_levels(
    pivots: &PivotLevels,
    high: Decimal,
    low: Decimal,
    decimals: u32,
    messages: &Messages,
) -> Vec<KeyLevel> {
    let note = messages.pivot_note;
    let mut levels = vec![
        level("R2", pivots.r2, decimals, note),
        level("R1", pivots.r1, decimals, note),
        level(messages.pivot_point, pivots.pivot, decimals, note),
        level("S1", pivots.s1, decimals, note),
        level("S2", pivots.s2, decimals, note),
    ];
    levels.extend(
        fibonacci_levels(high, low, TrendDirection::Uptrend)
            .into_iter()
            .filter(|fib| FALLBACK_FIB_LEVELS.contains(&fib.level))
            .map(|fib| KeyLevel {
                kind: format!("Fib {}", fib.label),
                price: format_price(fib.price, decimals),
                note: messages.fib_note.to_string(),
            }),
    );
    levels
}

fn pivot_scenarios(pivots: &PivotLevels, decimals: u32, messages: &Messages) -> Vec<Scenario> {
    vec![
        Scenario {
            condition: format!("{} {}", messages.breakout_above, format_price(pivots.r1, decimals)),
            action: messages.buy.to_string(),
            target: format_price(pivots.r2, decimals),
        },
        Scenario {
            condition: format!("{} {}", messages.breakdown_below, format_price(pivots.s1, decimals)),
            action: messages.sell.to_string(),
            target: format_price(pivots.s2, decimals),
        },
    ]
}

fn reference_level(messages: &Messages) -> KeyLevel {
    KeyLevel {
        kind: messages.reference_level.to_string(),
        price: messages.not_available.to_string(),
        note: messages.reference_level_note.to_string(),
    }
}

fn level(kind: &str, price: Decimal, decimals: u32, note: &str) -> KeyLevel {
    KeyLevel {
        kind: kind.to_string(),
        price: format_price(price, decimals),
        note: note.to_string(),
    }
}
