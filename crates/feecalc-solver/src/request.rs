use feecalc_fees::{FeeSchedule, RuleBook};
use feecalc_types::{FeeBreakdown, FeeRule, FlatThresholdParams, Platform, Result, TransactionInputs};
use serde::{Deserialize, Serialize};

use crate::objective::TargetMode;
use crate::price_solver::SearchStrategy;

/// Reverse-calculator request: everything but the price is fixed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    pub platform: Platform,
    pub rule: FeeRule,
    #[serde(default)]
    pub flat_threshold: FlatThresholdParams,
    #[serde(default)]
    pub target_profit: Option<f64>,
    #[serde(default)]
    pub target_margin_pct: Option<f64>,
    /// Remaining inputs; `price` is ignored
    #[serde(default)]
    pub inputs: TransactionInputs,
}

impl SolveRequest {
    pub fn new(platform: Platform, rule: FeeRule, inputs: TransactionInputs) -> Self {
        SolveRequest {
            platform,
            rule,
            flat_threshold: FlatThresholdParams::default(),
            target_profit: None,
            target_margin_pct: None,
            inputs,
        }
    }

    /// Request using the platform's rule from `book`
    pub fn from_book(book: &RuleBook, platform: Platform, inputs: TransactionInputs) -> Result<Self> {
        Ok(SolveRequest {
            flat_threshold: book.flat_threshold(),
            ..Self::new(platform, book.rule(platform)?, inputs)
        })
    }

    pub fn with_target_profit(mut self, target_profit: f64) -> Self {
        self.target_profit = Some(target_profit);
        self
    }

    pub fn with_target_margin_pct(mut self, target_margin_pct: f64) -> Self {
        self.target_margin_pct = Some(target_margin_pct);
        self
    }

    pub fn mode(&self) -> TargetMode {
        TargetMode::select(self.target_profit, self.target_margin_pct)
    }

    /// Check the rule, the flat-threshold parameters and the inputs. The
    /// price field is ignored since the solver replaces it.
    pub fn validate(&self) -> Result<()> {
        self.rule.validate()?;
        self.flat_threshold.validate()?;
        self.inputs.with_price(0.0).validate()
    }

    pub fn schedule(&self) -> FeeSchedule {
        FeeSchedule::new(self.platform, self.rule, self.flat_threshold)
    }
}

/// Diagnostic information from a solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveDiagnostics {
    /// Objective evaluations spent searching
    pub iterations: usize,
    pub strategy: SearchStrategy,
    /// Re-evaluated value is within tolerance of the target; true when there
    /// was no target
    pub target_met: bool,
    /// Sampled probe found no decrease of the compared value
    pub monotonic: bool,
}

/// Solved price with the full breakdown at that price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResult {
    pub price: f64,
    pub breakdown: FeeBreakdown,
    pub mode: TargetMode,
    pub diagnostics: SolveDiagnostics,
}
