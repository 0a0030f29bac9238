//! The static catalogue describing every calculator the site lists.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CalculatorCategory {
    #[serde(rename = "Position Sizing")]
    PositionSizing,
    #[serde(rename = "Risk Management")]
    RiskManagement,
    #[serde(rename = "Technical Analysis")]
    TechnicalAnalysis,
    #[serde(rename = "Performance")]
    Performance,
    #[serde(rename = "Price Analysis")]
    PriceAnalysis,
    #[serde(rename = "Advanced")]
    Advanced,
}

impl CalculatorCategory {
    pub const ALL: [CalculatorCategory; 6] = [
        CalculatorCategory::PositionSizing,
        CalculatorCategory::RiskManagement,
        CalculatorCategory::TechnicalAnalysis,
        CalculatorCategory::Performance,
        CalculatorCategory::PriceAnalysis,
        CalculatorCategory::Advanced,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            CalculatorCategory::PositionSizing => "Position Sizing",
            CalculatorCategory::RiskManagement => "Risk Management",
            CalculatorCategory::TechnicalAnalysis => "Technical Analysis",
            CalculatorCategory::Performance => "Performance",
            CalculatorCategory::PriceAnalysis => "Price Analysis",
            CalculatorCategory::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for CalculatorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Accepts the display name ("Risk Management") or a slug form ("risk-management",
/// "risk_management"), case-insensitively.
impl FromStr for CalculatorCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|category| category.display_name().to_ascii_lowercase() == wanted)
            .ok_or_else(|| format!("Unknown calculator category: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorConfig {
    pub id: &'static str,
    pub name: &'static str,
    pub slug: &'static str,
    pub short_description: &'static str,
    pub long_description: &'static str,
    pub category: CalculatorCategory,
    pub tags: &'static [&'static str],
    /// Icon identifier for the front-end icon set.
    pub icon: &'static str,
    pub featured: bool,
    pub is_new: bool,
    pub is_implemented: bool,
}

const fn entry(
    slug: &'static str,
    name: &'static str,
    category: CalculatorCategory,
    icon: &'static str,
    short_description: &'static str,
    long_description: &'static str,
    tags: &'static [&'static str],
) -> CalculatorConfig {
    CalculatorConfig {
        id: slug,
        name,
        slug,
        short_description,
        long_description,
        category,
        tags,
        icon,
        featured: false,
        is_new: false,
        is_implemented: true,
    }
}

const fn featured(config: CalculatorConfig) -> CalculatorConfig {
    CalculatorConfig {
        featured: true,
        ..config
    }
}

const fn marked_new(config: CalculatorConfig) -> CalculatorConfig {
    CalculatorConfig {
        is_new: true,
        ..config
    }
}

use CalculatorCategory::*;

static CALCULATORS: [CalculatorConfig; 22] = [
    // Position Sizing
    featured(entry(
        "position-size",
        "Position Size Calculator",
        PositionSizing,
        "trending-up",
        "Calculate optimal position size based on risk parameters",
        "Calculate the optimal position size for your trades based on your account size, risk percentage, and stop loss distance. Essential for proper risk management.",
        &["risk", "lot size", "forex", "trading"],
    )),
    entry(
        "lot-size",
        "Lot Size Calculator",
        PositionSizing,
        "calculator",
        "Calculate lot size for Forex trades",
        "Determine the correct lot size for your Forex trades based on account currency, pair, and risk parameters.",
        &["forex", "lot", "units", "size"],
    ),
    entry(
        "position-risk",
        "Position Risk Calculator",
        PositionSizing,
        "percent",
        "Calculate position risk as % of equity",
        "Quick back-of-the-envelope calculation for position risk percentage.",
        &["equity", "risk", "percentage"],
    ),
    // Risk Management
    featured(entry(
        "risk-reward",
        "Risk-Reward Calculator",
        RiskManagement,
        "scale",
        "Calculate risk-reward ratio and R-multiples",
        "Calculate the risk-reward ratio, R-multiple, and potential profit/loss for your trades. Essential for evaluating trade setups.",
        &["R-multiple", "ratio", "profit", "loss"],
    )),
    entry(
        "r-multiples",
        "R-Multiples Calculator",
        RiskManagement,
        "target",
        "Calculate R-multiples for trade evaluation",
        "Calculate R-multiples to evaluate trade performance and compare different trade outcomes.",
        &["R-multiple", "performance", "trading"],
    ),
    featured(entry(
        "atr-stop",
        "ATR Stop-Loss Calculator",
        RiskManagement,
        "activity",
        "Calculate stop-loss based on ATR volatility",
        "Calculate dynamic stop-loss levels based on Average True Range (ATR) for volatility-adjusted risk management.",
        &["ATR", "volatility", "stop-loss", "dynamic"],
    )),
    entry(
        "margin-leverage",
        "Margin & Leverage Calculator",
        RiskManagement,
        "dollar-sign",
        "Calculate margin requirements and leverage effects",
        "Calculate required margin and understand leverage effects on your trading positions.",
        &["margin", "leverage", "forex"],
    ),
    entry(
        "break-even",
        "Break-Even Calculator",
        RiskManagement,
        "target",
        "Calculate break-even price for multiple positions",
        "Calculate the break-even price when you have multiple entries at different prices. Perfect for DCA strategies.",
        &["DCA", "average", "break-even"],
    ),
    entry(
        "expectancy",
        "Expectancy Calculator",
        RiskManagement,
        "bar-chart-3",
        "Calculate trading system expectancy",
        "Calculate the expectancy of your trading system based on win rate and average win/loss.",
        &["win rate", "RR", "system", "expectancy"],
    ),
    entry(
        "kelly-criterion",
        "Kelly Criterion Calculator",
        RiskManagement,
        "calculator",
        "Calculate optimal bet size using Kelly Criterion",
        "Use the Kelly Criterion formula to determine the optimal position size based on your edge.",
        &["kelly", "optimal", "bet size", "edge"],
    ),
    // Technical Analysis
    featured(entry(
        "fibonacci-retracement",
        "Fibonacci Calculator",
        TechnicalAnalysis,
        "trending-up",
        "Calculate Fibonacci retracement & extension levels",
        "Calculate Fibonacci retracement and extension levels for any price swing. Essential tool for identifying support/resistance and profit targets.",
        &["fibonacci", "retracement", "extension", "levels"],
    )),
    entry(
        "pivot-points",
        "Pivot Points Calculator",
        TechnicalAnalysis,
        "grid-3x3",
        "Calculate pivot points and support/resistance levels",
        "Calculate classic, Woodie, Camarilla, and Fibonacci pivot points for intraday trading.",
        &["pivot", "support", "resistance", "levels"],
    ),
    entry(
        "support-resistance",
        "Support/Resistance Zones",
        TechnicalAnalysis,
        "layers",
        "Size and map support/resistance zones",
        "Tool for sizing and mapping support and resistance zones from price data.",
        &["support", "resistance", "zones", "levels"],
    ),
    entry(
        "session-range",
        "Session Range Analyzer",
        TechnicalAnalysis,
        "candlestick-chart",
        "Analyze session highs, lows, and percentage moves",
        "Analyze trading session ranges including high/low and percentage moves for different market sessions.",
        &["session", "range", "high", "low"],
    ),
    // Performance
    entry(
        "profit-loss",
        "Profit/Loss Calculator",
        Performance,
        "dollar-sign",
        "Calculate profit or loss for any trade",
        "Calculate the profit or loss for your trades in both pips and monetary terms.",
        &["profit", "loss", "pips", "trading"],
    ),
    marked_new(entry(
        "gold-profit",
        "Gold Profit Calculator",
        Performance,
        "coins",
        "Calculate XAUUSD profit in pips and dollars",
        "Calculate the pip move and dollar profit of a gold trade at 10 dollars per pip per standard lot.",
        &["gold", "XAUUSD", "pips", "profit"],
    )),
    entry(
        "compounding",
        "Compounding Calculator",
        Performance,
        "trending-up",
        "Calculate compound growth over time",
        "See how your account grows with compound interest at different return rates.",
        &["compound", "growth", "interest"],
    ),
    entry(
        "sharpe-ratio",
        "Sharpe Ratio Calculator",
        Performance,
        "bar-chart-3",
        "Calculate risk-adjusted returns",
        "Calculate the Sharpe Ratio to measure risk-adjusted returns of your trading strategy.",
        &["sharpe", "risk-adjusted", "returns"],
    ),
    entry(
        "time-to-target",
        "Time to Target Calculator",
        Performance,
        "clock",
        "Calculate time to reach profit targets using CAGR",
        "Estimate how long it takes to reach your profit target based on compound annual growth rate.",
        &["CAGR", "target", "time", "growth"],
    ),
    // Price Analysis
    entry(
        "average-price",
        "Average Price Calculator (DCA)",
        PriceAnalysis,
        "calculator",
        "Calculate average entry price for DCA positions",
        "Calculate the average price when dollar-cost averaging into positions with multiple entries.",
        &["DCA", "average", "entry", "price"],
    ),
    entry(
        "correlation",
        "Correlation Calculator",
        PriceAnalysis,
        "line-chart",
        "Calculate correlation between two assets",
        "Calculate the correlation coefficient between two assets to understand their relationship.",
        &["correlation", "assets", "pairs"],
    ),
    // Advanced
    entry(
        "volatility",
        "Volatility Calculator",
        Advanced,
        "activity",
        "Calculate price volatility metrics",
        "Calculate historical volatility and other volatility metrics for any asset.",
        &["volatility", "standard deviation", "risk"],
    ),
];

/// Every calculator in listing order.
pub fn all() -> &'static [CalculatorConfig] {
    &CALCULATORS
}

pub fn by_slug(slug: &str) -> Option<&'static CalculatorConfig> {
    all().iter().find(|calc| calc.slug == slug)
}

pub fn featured_calculators() -> Vec<&'static CalculatorConfig> {
    all().iter().filter(|calc| calc.featured).collect()
}

pub fn by_category(category: CalculatorCategory) -> Vec<&'static CalculatorConfig> {
    all().iter().filter(|calc| calc.category == category).collect()
}

pub fn implemented() -> Vec<&'static CalculatorConfig> {
    all().iter().filter(|calc| calc.is_implemented).collect()
}
