//! # Infinity Algo Calculators
//!
//! Closed-form trading calculators: Fibonacci levels, position sizing, risk-reward,
//! ATR stops, break-even averaging, pivots and the performance/statistics helpers
//! listed in the calculator catalogue.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of HTTP or of
//!   the AI providers. It depends only on `core-types`.
//! - **No result instead of errors:** Every calculator guards its inputs (non-positive
//!   values, zero divisors, inverted ranges) and returns `None` when a result would be
//!   meaningless, mirroring a form that simply renders nothing.
//! - **One trait, one registry:** Each input struct implements [`Calculator`]; the
//!   [`registry`] maps catalogue slugs onto those implementations for JSON callers.
//!
//! ## Public API
//!
//! - `Calculator`: The trait all calculator inputs implement.
//! - `catalog`: The static catalogue of calculators and its lookups.
//! - `registry::evaluate`: Slug-based JSON dispatch used by the web server and CLI.
//! - The concrete input/result structs themselves (e.g., `FibonacciInput`).

// Declare all the modules that constitute this crate.
pub mod atr_stop;
pub mod break_even;
pub mod catalog;
pub mod error;
pub mod fibonacci;
pub mod input;
pub mod margin;
pub mod performance;
pub mod pivot_points;
pub mod position_size;
pub mod profit_loss;
pub mod registry;
pub mod risk_reward;
pub mod session_range;
pub mod statistics;
pub mod support_resistance;

// Re-export the key components to create a clean, public-facing API.
pub use atr_stop::{AtrStopInput, AtrStopResult, QUICK_MULTIPLES};
pub use break_even::{AveragePriceInput, BreakEvenInput, BreakEvenResult, PositionEntry};
pub use catalog::{CalculatorCategory, CalculatorConfig};
pub use error::CalculatorError;
pub use fibonacci::{FibLevel, FibLevelKind, FibonacciInput, FibonacciResult, fibonacci_levels};
pub use margin::MarginInput;
pub use performance::{CompoundingInput, ExpectancyInput, KellyInput, SharpeInput, TimeToTargetInput};
pub use pivot_points::{PivotInput, PivotLevels, PivotMethod};
pub use position_size::{LotSizeInput, PositionRiskInput, PositionSizeInput, PositionSizeResult};
pub use profit_loss::{GoldProfitInput, ProfitLossInput};
pub use registry::evaluate;
pub use risk_reward::{RMultiplesInput, RiskRewardInput, RiskRewardResult, rr_ratio};
pub use session_range::SessionRangeInput;
pub use statistics::{CorrelationInput, VolatilityInput};
pub use support_resistance::{PriceZone, SupportResistanceInput};

use serde::Serialize;

/// The core trait every calculator input implements.
///
/// `calculate` is a pure function of the input. It returns `None` when the input does
/// not describe a computable situation (non-positive prices, zero risk distance, a swing
/// high below its swing low, ...).
pub trait Calculator {
    /// The serializable result produced for valid input.
    type Output: Serialize;

    fn calculate(&self) -> Option<Self::Output>;
}
