//! User-visible strings for both supported locales.

use core_types::Locale;

/// Every fixed string the analyzer can put in front of a user.
#[derive(Debug)]
pub struct Messages {
    pub missing_symbol_or_prompt: &'static str,
    pub empty_chat_message: &'static str,
    pub generic_error: &'static str,
    pub default_risk_note: &'static str,
    pub default_raw_text: &'static str,
    pub not_available: &'static str,

    // Fallback analysis.
    pub fallback_risk_note: &'static str,
    pub fallback_risk_note_no_price: &'static str,
    pub resistance_r1: &'static str,
    pub current_price: &'static str,
    pub support_s1: &'static str,
    pub pivot_point: &'static str,
    pub day_high_note: &'static str,
    pub day_low_note: &'static str,
    pub change_label: &'static str,
    pub pivot_note: &'static str,
    pub fib_note: &'static str,
    pub reference_level: &'static str,
    pub reference_level_note: &'static str,
    pub real_data_for: &'static str,
    pub day_high: &'static str,
    pub day_low: &'static str,
    pub no_price_for: &'static str,
    pub levels_used: &'static str,
    pub retry_hint: &'static str,
    pub breakout_above: &'static str,
    pub breakdown_below: &'static str,
    pub buy: &'static str,
    pub sell: &'static str,

    // Chat.
    pub chat_greeting: &'static str,
    pub chat_needs_key: &'static str,
    pub chat_provider_unreachable: &'static str,
    pub chat_current_prices: &'static str,
    pub chat_no_prices: &'static str,
    pub chat_symbol_tip: &'static str,
}

static ARABIC: Messages = Messages {
    missing_symbol_or_prompt: "يرجى إدخال الرمز والسؤال",
    empty_chat_message: "اكتب سؤالك",
    generic_error: "حدث خطأ. حاول مرة أخرى.",
    default_risk_note: "استخدم إدارة مخاطر مناسبة (1-2% كحد أقصى)",
    default_raw_text: "تم التحليل",
    not_available: "N/A",

    fallback_risk_note: "⚠️ لم يتم الاتصال بـ AI. الأسعار حقيقية من Yahoo Finance.",
    fallback_risk_note_no_price: "⚠️ لم يتم الاتصال بـ AI ولم تتوفر أسعار حية. المستويات محسوبة من مدخلاتك فقط.",
    resistance_r1: "مقاومة R1",
    current_price: "السعر الحالي",
    support_s1: "دعم S1",
    pivot_point: "نقطة الارتكاز PP",
    day_high_note: "أعلى سعر اليوم",
    day_low_note: "أدنى سعر اليوم",
    change_label: "التغير",
    pivot_note: "محسوب بمعادلة البيفوت الكلاسيكية",
    fib_note: "تصحيح فيبوناتشي",
    reference_level: "مستوى مرجعي",
    reference_level_note: "أضف مستويات High/Low/Close للحصول على مستويات محسوبة",
    real_data_for: "📊 بيانات حقيقية لـ",
    day_high: "أعلى سعر",
    day_low: "أدنى سعر",
    no_price_for: "تعذر جلب السعر الحي لـ",
    levels_used: "تم حساب المستويات من القيم المدخلة.",
    retry_hint: "⚡ أعد المحاولة للحصول على تحليل AI كامل.",
    breakout_above: "اختراق",
    breakdown_below: "كسر",
    buy: "شراء",
    sell: "بيع",

    chat_greeting: "🤖 **أنا Infinity Algo AI**",
    chat_needs_key: "شكراً لسؤالك! للإجابة الكاملة، يرجى إضافة OpenAI API Key.",
    chat_provider_unreachable: "تعذر الوصول إلى مزود الذكاء الاصطناعي حالياً.",
    chat_current_prices: "**الأسعار الحالية:**",
    chat_no_prices: "لم أجد أسعار لهذا الرمز",
    chat_symbol_tip: "💡 **نصيحة:** تأكد من كتابة الرمز بشكل صحيح (مثل XAUUSD, BTC, EUR/USD)",
};

static ENGLISH: Messages = Messages {
    missing_symbol_or_prompt: "Please enter a symbol and a question",
    empty_chat_message: "Type your question",
    generic_error: "Something went wrong. Please try again.",
    default_risk_note: "Use proper risk management (1-2% per trade at most)",
    default_raw_text: "Analysis complete",
    not_available: "N/A",

    fallback_risk_note: "⚠️ The AI provider was not reached. Prices are live from Yahoo Finance.",
    fallback_risk_note_no_price: "⚠️ The AI provider was not reached and no live price was available. Levels come from your inputs only.",
    resistance_r1: "Resistance R1",
    current_price: "Current price",
    support_s1: "Support S1",
    pivot_point: "Pivot PP",
    day_high_note: "Today's high",
    day_low_note: "Today's low",
    change_label: "Change",
    pivot_note: "Classic pivot formula",
    fib_note: "Fibonacci retracement",
    reference_level: "Reference level",
    reference_level_note: "Add High/Low/Close levels to get calculated levels",
    real_data_for: "📊 Live data for",
    day_high: "High",
    day_low: "Low",
    no_price_for: "Could not fetch a live price for",
    levels_used: "Levels were calculated from the values you entered.",
    retry_hint: "⚡ Retry to get a full AI analysis.",
    breakout_above: "Breakout above",
    breakdown_below: "Breakdown below",
    buy: "Buy",
    sell: "Sell",

    chat_greeting: "🤖 **I am Infinity Algo AI**",
    chat_needs_key: "Thanks for your question! For a full answer, please add an OpenAI API key.",
    chat_provider_unreachable: "The AI provider is unreachable right now.",
    chat_current_prices: "**Current prices:**",
    chat_no_prices: "I could not find prices for this symbol",
    chat_symbol_tip: "💡 **Tip:** Make sure the symbol is spelled correctly (e.g. XAUUSD, BTC, EUR/USD)",
};

impl Messages {
    pub fn for_locale(locale: Locale) -> &'static Messages {
        match locale {
            Locale::Ar => &ARABIC,
            Locale::En => &ENGLISH,
        }
    }
}
