pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{Bias, ChatRole, Locale, Market, TradeDirection, TrendDirection};
pub use error::CoreError;
pub use structs::{
    AnalyzeRequest, AnalyzeResponse, ChatMessage, ChatRequest, ChatResponse, KeyLevel,
    PriceLevels, PriceSnapshot, Quote, Scenario,
};
