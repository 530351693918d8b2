use feecalc_fees::FeeSchedule;
use feecalc_types::{FeeBreakdown, TransactionInputs};
use serde::{Deserialize, Serialize};

/// Quantity the solver drives towards its target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TargetMode {
    /// Solve for a profit in currency units
    Profit(f64),
    /// Solve for a margin in percent of the discounted price
    Margin(f64),
    /// Nothing to solve for
    NoTarget,
}

impl TargetMode {
    /// Pick the mode from the optional targets. A finite positive profit wins;
    /// otherwise a finite positive margin; anything else is no target.
    pub fn select(target_profit: Option<f64>, target_margin_pct: Option<f64>) -> Self {
        match (target_profit, target_margin_pct) {
            (Some(p), _) if p.is_finite() && p > 0.0 => TargetMode::Profit(p),
            (_, Some(m)) if m.is_finite() && m > 0.0 => TargetMode::Margin(m),
            _ => TargetMode::NoTarget,
        }
    }

    pub fn target(&self) -> Option<f64> {
        match self {
            TargetMode::Profit(t) | TargetMode::Margin(t) => Some(*t),
            TargetMode::NoTarget => None,
        }
    }

    /// The breakdown field this mode compares against its target
    pub fn value(&self, breakdown: &FeeBreakdown) -> Option<f64> {
        match self {
            TargetMode::Profit(_) => Some(breakdown.profit),
            TargetMode::Margin(_) => Some(breakdown.margin_pct),
            TargetMode::NoTarget => None,
        }
    }
}

/// Black-box view of a fee evaluator as a function of listing price.
///
/// The solver only relies on the compared quantity being non-decreasing in
/// price.
pub trait PriceObjective {
    fn breakdown_at(&self, price: f64) -> FeeBreakdown;
}

/// A fee schedule with every input but the price held fixed
#[derive(Debug, Clone, Copy)]
pub struct ScheduleObjective<'a> {
    schedule: &'a FeeSchedule,
    inputs: TransactionInputs,
}

impl<'a> ScheduleObjective<'a> {
    pub fn new(schedule: &'a FeeSchedule, inputs: TransactionInputs) -> Self {
        ScheduleObjective { schedule, inputs }
    }
}

impl PriceObjective for ScheduleObjective<'_> {
    fn breakdown_at(&self, price: f64) -> FeeBreakdown {
        self.schedule.evaluate(&self.inputs.with_price(price))
    }
}

/// Adapter for closures, for fee families defined outside this workspace
pub struct FnObjective<F>(pub F);

impl<F> PriceObjective for FnObjective<F>
where
    F: Fn(f64) -> FeeBreakdown,
{
    fn breakdown_at(&self, price: f64) -> FeeBreakdown {
        (self.0)(price)
    }
}
