//! Account growth and trading-system quality metrics.

use crate::Calculator;
use crate::input::{all_positive, percent_of};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Upper bound on generated breakdown rows.
pub const MAX_PERIODS: u32 = 600;

fn fraction(percent: Decimal) -> Decimal {
    percent / Decimal::ONE_HUNDRED
}

// ==============================================================================
// Compounding
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundingInput {
    pub starting_capital: Decimal,
    /// Return per month, in percent.
    pub monthly_return: Decimal,
    pub months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBalance {
    pub month: u32,
    pub balance: Decimal,
    pub profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundingResult {
    pub final_value: Decimal,
    pub total_profit: Decimal,
    pub total_growth_percent: Decimal,
    pub breakdown: Vec<MonthlyBalance>,
}

impl Calculator for CompoundingInput {
    type Output = CompoundingResult;

    fn calculate(&self) -> Option<CompoundingResult> {
        if self.starting_capital <= Decimal::ZERO
            || self.months == 0
            || self.months > MAX_PERIODS
            || self.monthly_return <= dec!(-100)
        {
            return None;
        }

        let factor = Decimal::ONE + fraction(self.monthly_return);
        let mut balance = self.starting_capital;
        let mut breakdown = Vec::with_capacity(self.months as usize);
        for month in 1..=self.months {
            let next = balance.checked_mul(factor)?;
            breakdown.push(MonthlyBalance {
                month,
                balance: next,
                profit: next - balance,
            });
            balance = next;
        }

        let total_profit = balance - self.starting_capital;
        Some(CompoundingResult {
            final_value: balance,
            total_profit,
            total_growth_percent: percent_of(total_profit, self.starting_capital)?,
            breakdown,
        })
    }
}

// ==============================================================================
// Time to Target
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeToTargetInput {
    pub starting_capital: Decimal,
    pub target_capital: Decimal,
    /// Compound annual growth rate, in percent.
    pub cagr: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyBalance {
    pub year: u32,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeToTargetResult {
    pub years: Decimal,
    pub months: Decimal,
    /// Balance at the end of each whole year until the target is passed.
    pub projection: Vec<YearlyBalance>,
}

impl Calculator for TimeToTargetInput {
    type Output = TimeToTargetResult;

    fn calculate(&self) -> Option<TimeToTargetResult> {
        if !all_positive(&[self.starting_capital, self.target_capital, self.cagr])
            || self.target_capital <= self.starting_capital
        {
            return None;
        }

        let factor = Decimal::ONE + fraction(self.cagr);
        let growth_needed = self
            .target_capital
            .checked_div(self.starting_capital)?
            .checked_ln()?;
        let years = growth_needed.checked_div(factor.checked_ln()?)?;

        let mut projection = Vec::new();
        let mut balance = self.starting_capital;
        let mut year = 0;
        while balance < self.target_capital && year < MAX_PERIODS {
            year += 1;
            balance = balance.checked_mul(factor)?;
            projection.push(YearlyBalance { year, balance });
        }

        Some(TimeToTargetResult {
            years,
            months: years.checked_mul(dec!(12))?,
            projection,
        })
    }
}

// ==============================================================================
// Sharpe Ratio
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SharpeRating {
    Negative,
    Suboptimal,
    Good,
    VeryGood,
    Excellent,
}

impl SharpeRating {
    pub fn from_ratio(ratio: Decimal) -> Self {
        if ratio < Decimal::ZERO {
            SharpeRating::Negative
        } else if ratio < Decimal::ONE {
            SharpeRating::Suboptimal
        } else if ratio < Decimal::TWO {
            SharpeRating::Good
        } else if ratio < dec!(3) {
            SharpeRating::VeryGood
        } else {
            SharpeRating::Excellent
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharpeInput {
    /// Average return, in percent.
    pub average_return: Decimal,
    #[serde(default)]
    pub risk_free_rate: Decimal,
    /// Standard deviation of returns, in percent.
    pub std_dev: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharpeResult {
    pub sharpe_ratio: Decimal,
    pub excess_return: Decimal,
    pub rating: SharpeRating,
}

impl Calculator for SharpeInput {
    type Output = SharpeResult;

    fn calculate(&self) -> Option<SharpeResult> {
        if self.std_dev <= Decimal::ZERO {
            return None;
        }
        let excess_return = self.average_return.checked_sub(self.risk_free_rate)?;
        let sharpe_ratio = excess_return.checked_div(self.std_dev)?;
        Some(SharpeResult {
            sharpe_ratio,
            excess_return,
            rating: SharpeRating::from_ratio(sharpe_ratio),
        })
    }
}

// ==============================================================================
// Expectancy
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectancyRating {
    Negative,
    Marginal,
    Good,
    Excellent,
}

fn default_trade_count() -> u32 {
    100
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectancyInput {
    /// Win rate, in percent.
    pub win_rate: Decimal,
    pub average_win: Decimal,
    /// Average losing trade as a positive amount.
    pub average_loss: Decimal,
    #[serde(default = "default_trade_count")]
    pub number_of_trades: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectancyResult {
    /// Expected profit per trade.
    pub expectancy: Decimal,
    /// Expectancy in units of the average loss.
    pub expectancy_r: Decimal,
    /// Expected profit over `number_of_trades` trades.
    pub expected_value: Decimal,
    pub number_of_trades: u32,
    pub rating: ExpectancyRating,
}

impl Calculator for ExpectancyInput {
    type Output = ExpectancyResult;

    fn calculate(&self) -> Option<ExpectancyResult> {
        if !all_positive(&[self.average_win, self.average_loss])
            || self.win_rate < Decimal::ZERO
            || self.win_rate > Decimal::ONE_HUNDRED
        {
            return None;
        }

        let win = fraction(self.win_rate);
        let expected_win = win.checked_mul(self.average_win)?;
        let expected_loss = (Decimal::ONE - win).checked_mul(self.average_loss)?;
        let expectancy = expected_win - expected_loss;
        let expectancy_r = expectancy.checked_div(self.average_loss)?;
        let rating = if expectancy <= Decimal::ZERO {
            ExpectancyRating::Negative
        } else if expectancy_r < dec!(0.2) {
            ExpectancyRating::Marginal
        } else if expectancy_r < dec!(0.5) {
            ExpectancyRating::Good
        } else {
            ExpectancyRating::Excellent
        };

        Some(ExpectancyResult {
            expectancy,
            expectancy_r,
            expected_value: expectancy.checked_mul(Decimal::from(self.number_of_trades))?,
            number_of_trades: self.number_of_trades,
            rating,
        })
    }
}

// ==============================================================================
// Kelly Criterion
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KellyInput {
    /// Probability of a winning trade, in percent.
    pub win_probability: Decimal,
    pub win_loss_ratio: Decimal,
    pub bankroll: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KellyResult {
    /// Raw Kelly fraction in percent. Negative when the system has no edge.
    pub kelly_percent: Decimal,
    pub optimal_bet: Decimal,
    pub half_kelly_percent: Decimal,
    pub half_kelly_bet: Decimal,
    pub has_edge: bool,
}

impl Calculator for KellyInput {
    type Output = KellyResult;

    fn calculate(&self) -> Option<KellyResult> {
        if !all_positive(&[self.win_loss_ratio, self.bankroll])
            || self.win_probability < Decimal::ZERO
            || self.win_probability > Decimal::ONE_HUNDRED
        {
            return None;
        }

        let w = fraction(self.win_probability);
        let kelly = w - (Decimal::ONE - w).checked_div(self.win_loss_ratio)?;
        let stake = kelly.max(Decimal::ZERO);
        let optimal_bet = stake.checked_mul(self.bankroll)?;

        Some(KellyResult {
            kelly_percent: kelly.checked_mul(Decimal::ONE_HUNDRED)?,
            optimal_bet,
            half_kelly_percent: stake * dec!(50),
            half_kelly_bet: optimal_bet / Decimal::TWO,
            has_edge: kelly > Decimal::ZERO,
        })
    }
}
