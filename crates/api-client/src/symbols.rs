//! Mapping user-facing symbols ("EUR/USD", "XAUUSD", "NAS100") onto quote-provider tickers.

use core_types::Market;
use regex::Regex;
use std::sync::LazyLock;

const CRYPTO_ROOTS: [&str; 10] = [
    "BTC", "ETH", "SOL", "XRP", "BNB", "ADA", "DOGE", "DOT", "AVAX", "MATIC",
];
const CURRENCY_CODES: [&str; 8] = ["EUR", "GBP", "USD", "JPY", "AUD", "CAD", "CHF", "NZD"];

fn commodity_ticker(upper: &str) -> Option<&'static str> {
    match upper {
        "XAUUSD" | "GOLD" => Some("GC=F"),
        "XAGUSD" | "SILVER" => Some("SI=F"),
        "OIL" | "WTI" => Some("CL=F"),
        _ => None,
    }
}

fn index_ticker(upper: &str) -> Option<&'static str> {
    match upper {
        "US30" | "DJI" => Some("^DJI"),
        "US500" | "SPX500" | "SPX" => Some("^GSPC"),
        "NAS100" | "NASDAQ" | "NAS" => Some("^NDX"),
        "DAX" => Some("^GDAXI"),
        "FTSE" => Some("^FTSE"),
        _ => None,
    }
}

fn forex_ticker(upper: &str) -> String {
    if upper.ends_with("=X") {
        return upper.to_string();
    }
    format!("{}=X", upper.replace('/', ""))
}

/// Ticker for a symbol whose market is known (the analysis form).
///
/// Unknown commodities, indices and every stock pass through upper-cased.
pub fn to_provider_ticker(symbol: &str, market: Market) -> String {
    let upper = symbol.trim().to_uppercase();
    match market {
        Market::Forex => forex_ticker(&upper),
        Market::Crypto if upper.contains('-') => upper,
        Market::Crypto => format!("{}-USD", upper.replace('/', "")),
        Market::Commodities => commodity_ticker(&upper).map(str::to_string).unwrap_or(upper),
        Market::Indices => index_ticker(&upper).map(str::to_string).unwrap_or(upper),
        Market::Stocks => upper,
    }
}

/// Ticker for a bare symbol found in chat text, guessing the market from its contents.
pub fn detect_ticker(symbol: &str) -> String {
    let upper = symbol.trim().to_uppercase();

    if upper.contains("XAU") || upper.contains("GOLD") {
        return "GC=F".to_string();
    }
    if upper.contains("XAG") || upper.contains("SILVER") {
        return "SI=F".to_string();
    }
    if upper.contains("OIL") || upper.contains("WTI") {
        return "CL=F".to_string();
    }
    // Crypto first: "BTCUSD" also contains a currency code.
    if CRYPTO_ROOTS.iter().any(|root| upper.contains(root)) {
        let base = upper.split(['/', '-']).next().unwrap_or(&upper);
        let base = base.strip_suffix("USD").filter(|b| !b.is_empty()).unwrap_or(base);
        return format!("{}-USD", base);
    }
    if let Some(ticker) = index_ticker(&upper) {
        return ticker.to_string();
    }
    if CURRENCY_CODES.iter().any(|code| upper.contains(code)) {
        return forex_ticker(&upper);
    }
    upper.replace('/', "")
}

static SYMBOL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(XAUUSD|XAGUSD|GOLD|SILVER|OIL|WTI)\b",
        r"(?i)\b(BTC|ETH|SOL|XRP|BNB|ADA|DOGE|DOT|AVAX|MATIC)\b",
        r"(?i)\b(EUR/USD|GBP/USD|USD/JPY|AUD/USD|USD/CHF|USD/CAD|NZD/USD)\b",
        r"(?i)\b(EURUSD|GBPUSD|USDJPY|AUDUSD|USDCHF|USDCAD|NZDUSD)\b",
        r"(?i)\b(NAS100|US30|US500|SPX500|DAX|NASDAQ|DJI)\b",
        r"(?i)\b(AAPL|TSLA|GOOGL|MSFT|AMZN|META|NVDA)\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("symbol patterns are valid regexes"))
    .collect()
});

/// Finds known instrument symbols in free text.
///
/// Patterns are scanned group by group (metals, crypto, FX pairs with and without a slash,
/// indices, large-cap stocks). Matches are upper-cased and de-duplicated, keeping the first
/// occurrence.
pub fn extract_symbols(message: &str) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for pattern in SYMBOL_PATTERNS.iter() {
        for found in pattern.find_iter(message) {
            let symbol = found.as_str().to_uppercase();
            if !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }
    }
    symbols
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forex_tickers() {
        assert_eq!(to_provider_ticker("EUR/USD", Market::Forex), "EURUSD=X");
        assert_eq!(to_provider_ticker("gbpusd", Market::Forex), "GBPUSD=X");
        assert_eq!(to_provider_ticker("EURUSD=X", Market::Forex), "EURUSD=X");
        assert!(detect_ticker("EUR/USD").ends_with("=X"));
    }

    #[test]
    fn test_crypto_tickers() {
        assert_eq!(to_provider_ticker("BTC", Market::Crypto), "BTC-USD");
        assert_eq!(to_provider_ticker("eth-eur", Market::Crypto), "ETH-EUR");
        assert_eq!(detect_ticker("BTC"), "BTC-USD");
        assert_eq!(detect_ticker("BTCUSD"), "BTC-USD");
        assert_eq!(detect_ticker("sol/usd"), "SOL-USD");
    }

    #[test]
    fn test_commodity_and_index_tickers() {
        assert_eq!(to_provider_ticker("XAUUSD", Market::Commodities), "GC=F");
        assert_eq!(to_provider_ticker("silver", Market::Commodities), "SI=F");
        assert_eq!(to_provider_ticker("COPPER", Market::Commodities), "COPPER");
        assert_eq!(to_provider_ticker("US30", Market::Indices), "^DJI");
        assert_eq!(to_provider_ticker("NAS100", Market::Indices), "^NDX");
        assert_eq!(to_provider_ticker("N225", Market::Indices), "N225");
        assert_eq!(detect_ticker("XAUUSD"), "GC=F");
        assert_eq!(detect_ticker("WTI"), "CL=F");
        assert_eq!(detect_ticker("SPX500"), "^GSPC");
    }

    #[test]
    fn test_stocks_pass_through() {
        assert_eq!(to_provider_ticker(" aapl ", Market::Stocks), "AAPL");
        assert_eq!(detect_ticker("NVDA"), "NVDA");
    }

    #[test]
    fn test_extract_symbols_from_text() {
        let symbols = extract_symbols("What about gold and btc today? Also EUR/USD vs eurusd, and BTC again");
        assert_eq!(symbols, vec!["GOLD", "BTC", "EUR/USD", "EURUSD"]);
    }

    #[test]
    fn test_extract_symbols_word_boundaries() {
        assert!(extract_symbols("the golden ratio is metaphysical").is_empty());
        let symbols = extract_symbols("ما رأيك في XAUUSD و NAS100؟");
        assert_eq!(symbols, vec!["XAUUSD", "NAS100"]);
    }
}
