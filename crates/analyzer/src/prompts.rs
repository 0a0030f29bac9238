//! Prompt text sent to the chat-completion model.
//!
//! Prices are always rendered from the live quote so the model is anchored to real numbers;
//! the JSON schema in the analysis system prompt matches what `parsing` reads back.

use crate::render::{format_change_percent, format_price, price_with_change};
use core_types::{AnalyzeRequest, Locale, Quote};

/// The live-price block embedded in both analysis prompts. Empty without a quote.
pub fn price_block(quote: Option<&Quote>, decimals: u32, locale: Locale) -> String {
    let Some(quote) = quote else {
        return String::new();
    };
    let sign = if quote.change >= rust_decimal::Decimal::ZERO { "+" } else { "" };
    let change = format!(
        "{}{} ({})",
        sign,
        format_price(quote.change, decimals),
        format_change_percent(quote.change, quote.change_percent)
    );
    let (title, price, delta, high, low) = match locale {
        Locale::Ar => (
            "📊 بيانات السعر الحقيقية (Live Price Data):",
            "السعر الحالي",
            "التغير",
            "أعلى سعر اليوم",
            "أدنى سعر اليوم",
        ),
        Locale::En => (
            "📊 Live Price Data:",
            "Current price",
            "Change",
            "Day high",
            "Day low",
        ),
    };
    format!(
        "{title}\n- {price}: {}\n- {delta}: {change}\n- {high}: {}\n- {low}: {}\n",
        format_price(quote.price, decimals),
        format_price(quote.high, decimals),
        format_price(quote.low, decimals),
    )
}

pub fn analysis_system_prompt(price_info: &str, locale: Locale) -> String {
    match locale {
        Locale::Ar => format!(
            r#"أنت محلل أسواق مالي محترف مع خبرة 15+ سنة في التحليل الفني.

مهمتك: تحليل الأداة المالية المطلوبة بناءً على البيانات الحقيقية.

{price_info}
قواعد مهمة جداً:
1. استخدم الأسعار الحقيقية المذكورة أعلاه فقط - لا تخترع أسعار!
2. احسب مستويات فيبوناتشي من الأعلى والأدنى الحقيقيين
3. حدد مستويات الدعم والمقاومة بالأرقام الحقيقية
4. قدم سيناريوهات تداول واقعية بالأسعار الفعلية
5. نسبة المخاطرة للعائد يجب أن تكون منطقية (1:2 أو أفضل)

الرد يجب أن يكون JSON صالح فقط:
{{
  "bias": "bullish" أو "bearish" أو "neutral",
  "keyLevels": [
    {{"type": "اسم المستوى", "price": "السعر من البيانات الحقيقية", "note": "ملاحظة"}}
  ],
  "scenarios": [
    {{"condition": "الشرط", "action": "الإجراء", "target": "الهدف بالسعر الحقيقي"}}
  ],
  "riskNote": "ملاحظة إدارة المخاطر",
  "rawText": "تحليل مفصل بالعربية"
}}"#
        ),
        Locale::En => format!(
            r#"You are a professional market analyst with 15+ years of technical analysis experience.

Your task: analyse the requested instrument based on real data.

{price_info}
Strict rules:
1. Use only the real prices given above. Never invent prices.
2. Compute Fibonacci levels from the real high and low.
3. Give support and resistance levels as real numbers.
4. Give realistic trade scenarios at actual prices.
5. Risk to reward must be sensible (1:2 or better).

Reply with valid JSON only:
{{
  "bias": "bullish" | "bearish" | "neutral",
  "keyLevels": [
    {{"type": "level name", "price": "price from the real data", "note": "note"}}
  ],
  "scenarios": [
    {{"condition": "condition", "action": "action", "target": "target at a real price"}}
  ],
  "riskNote": "risk management note",
  "rawText": "detailed analysis in English"
}}"#
        ),
    }
}

pub fn analysis_user_prompt(request: &AnalyzeRequest, price_info: &str, locale: Locale) -> String {
    let levels = user_levels(request, locale);
    match locale {
        Locale::Ar => format!(
            "تحليل {} ({}) على إطار {}\n\n{}{}\nسؤال المتداول: {}\n\nأعطني تحليل مهني مع الأسعار الحقيقية فقط!",
            request.symbol.trim(),
            request.market,
            request.timeframe,
            price_info,
            levels,
            request.user_prompt.trim()
        ),
        Locale::En => format!(
            "Analyse {} ({}) on the {} timeframe\n\n{}{}\nTrader's question: {}\n\nGive me a professional analysis using real prices only!",
            request.symbol.trim(),
            request.market,
            request.timeframe,
            price_info,
            levels,
            request.user_prompt.trim()
        ),
    }
}

/// The trader-supplied high/low/close, when any were filled in.
fn user_levels(request: &AnalyzeRequest, locale: Locale) -> String {
    let Some(levels) = &request.levels else {
        return String::new();
    };
    let entries: Vec<String> = [("High", &levels.high), ("Low", &levels.low), ("Close", &levels.close)]
        .into_iter()
        .filter_map(|(name, value)| {
            let value = value.as_deref()?.trim();
            (!value.is_empty()).then(|| format!("- {name}: {value}"))
        })
        .collect();
    if entries.is_empty() {
        return String::new();
    }
    let title = match locale {
        Locale::Ar => "مستويات المتداول:",
        Locale::En => "Trader levels:",
    };
    format!("{title}\n{}\n", entries.join("\n"))
}

/// The chat system prompt, listing every quote fetched for the message.
pub fn chat_system_prompt(quotes: &[(String, Quote)], locale: Locale) -> String {
    let prices = quotes
        .iter()
        .map(|(symbol, quote)| format!("- {}: {}", symbol, price_with_change(quote)))
        .collect::<Vec<_>>()
        .join("\n");

    let base = match locale {
        Locale::Ar => {
            "أنت خبير تداول محترف مع 20 سنة خبرة في الأسواق المالية.

مهمتك: الإجابة على أسئلة المتداولين بشكل واضح ومفصل.

قدراتك:
- تحليل فني (فيبوناتشي، مستويات، اتجاهات، نماذج)
- تحليل أساسي (أخبار، أحداث اقتصادية)
- استراتيجيات تداول
- إدارة مخاطر
- تفسير المؤشرات (RSI, MACD, Moving Averages)

قواعد:
1. أجب باللغة التي سُئلت بها (عربي أو إنجليزي)
2. كن محدداً مع الأرقام والمستويات
3. قدم خطوات عملية واضحة
4. أضف تحذيرات المخاطر عند الحاجة
5. استخدم الإيموجي لتوضيح النقاط"
        }
        Locale::En => {
            "You are a professional trading expert with 20 years of experience in financial markets.

Your task: answer traders' questions clearly and in detail.

Your skills:
- Technical analysis (Fibonacci, levels, trends, patterns)
- Fundamental analysis (news, economic events)
- Trading strategies
- Risk management
- Indicator interpretation (RSI, MACD, Moving Averages)

Rules:
1. Answer in the language of the question (Arabic or English)
2. Be specific with numbers and levels
3. Give clear practical steps
4. Add risk warnings where needed
5. Use emoji to highlight points"
        }
    };

    if prices.is_empty() {
        return base.to_string();
    }
    let title = match locale {
        Locale::Ar => "📊 أسعار حقيقية حالية:",
        Locale::En => "📊 Current live prices:",
    };
    format!("{base}\n\n{title}\n{prices}\n")
}
