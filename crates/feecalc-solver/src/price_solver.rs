use feecalc_types::{FeeCalcError, Result};
use serde::{Deserialize, Serialize};

use crate::bisection::{
    probe_monotonic, Bisection, DEFAULT_ITERATIONS, MAX_ITERATIONS, MAX_SAMPLES, MIN_ITERATIONS,
};
use crate::objective::{PriceObjective, ScheduleObjective, TargetMode};
use crate::request::{SolveDiagnostics, SolveRequest, SolveResult};

/// How the solver locates the bracket it bisects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchStrategy {
    /// Plain bisection over the whole interval
    Bisection,
    /// Linear scan for the first sample reaching the target, then bisection
    ScanThenBisect { samples: usize },
}

/// Parameters for the price solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolverParams {
    /// Ceiling on realistic listing prices
    pub upper_bound: f64,
    pub iterations: usize,
    pub strategy: SearchStrategy,
    /// Allowed distance between target and re-evaluated value for `target_met`
    pub tolerance: f64,
    /// Points sampled by the monotonicity probe; 0 disables it
    pub probe_samples: usize,
}

impl Default for SolverParams {
    fn default() -> Self {
        SolverParams {
            upper_bound: 1_000_000.0,
            iterations: DEFAULT_ITERATIONS,
            strategy: SearchStrategy::Bisection,
            tolerance: 1e-6,
            probe_samples: 64,
        }
    }
}

impl SolverParams {
    pub fn validate(&self) -> Result<()> {
        if !self.upper_bound.is_finite() || self.upper_bound <= 0.0 {
            return Err(FeeCalcError::SolverError(format!(
                "upper bound must be positive and finite, got {}",
                self.upper_bound
            )));
        }
        if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&self.iterations) {
            return Err(FeeCalcError::SolverError(format!(
                "iterations must be within [{}, {}], got {}",
                MIN_ITERATIONS, MAX_ITERATIONS, self.iterations
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(FeeCalcError::SolverError(format!(
                "tolerance must be non-negative, got {}",
                self.tolerance
            )));
        }
        if let SearchStrategy::ScanThenBisect { samples } = self.strategy {
            if samples == 0 || samples > MAX_SAMPLES {
                return Err(FeeCalcError::SolverError(format!(
                    "scan samples must be within [1, {}], got {}",
                    MAX_SAMPLES, samples
                )));
            }
        }
        if self.probe_samples > MAX_SAMPLES {
            return Err(FeeCalcError::SolverError(format!(
                "probe samples must be at most {}, got {}",
                MAX_SAMPLES, self.probe_samples
            )));
        }
        Ok(())
    }
}

/// Reverse calculator: finds the listing price that meets a profit or margin target
#[derive(Debug, Clone, Copy)]
pub struct PriceSolver {
    params: SolverParams,
}

impl PriceSolver {
    pub fn new() -> Self {
        PriceSolver {
            params: SolverParams::default(),
        }
    }

    pub fn with_params(params: SolverParams) -> Result<Self> {
        params.validate()?;
        Ok(PriceSolver { params })
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    pub fn solve(&self, request: &SolveRequest) -> SolveResult {
        let schedule = request.schedule();
        let objective = ScheduleObjective::new(&schedule, request.inputs);
        tracing::debug!(platform = %request.platform, mode = ?request.mode(), "solving for listing price");
        self.solve_for_target(&objective, request.mode())
    }

    /// Solve against any objective that is non-decreasing in price
    pub fn solve_for_target<O: PriceObjective>(&self, objective: &O, mode: TargetMode) -> SolveResult {
        let target = match mode.target() {
            Some(target) => target,
            None => {
                return SolveResult {
                    price: 0.0,
                    breakdown: objective.breakdown_at(0.0),
                    mode,
                    diagnostics: SolveDiagnostics {
                        iterations: 0,
                        strategy: self.params.strategy,
                        target_met: true,
                        monotonic: true,
                    },
                };
            }
        };

        let value = |price: f64| {
            mode.value(&objective.breakdown_at(price))
                .unwrap_or(f64::NEG_INFINITY)
        };

        let bisection = Bisection::with_iterations(self.params.iterations);
        let outcome = match self.params.strategy {
            SearchStrategy::Bisection => {
                bisection.search(0.0, self.params.upper_bound, target, &value)
            }
            SearchStrategy::ScanThenBisect { samples } => {
                bisection.scan_then_search(0.0, self.params.upper_bound, target, samples, &value)
            }
        };

        let breakdown = objective.breakdown_at(outcome.price);
        let reached = mode.value(&breakdown).unwrap_or(f64::NEG_INFINITY);
        let target_met = (reached - target).abs() <= self.params.tolerance;

        let probe_hi = (outcome.price * 2.0).max(1.0).min(self.params.upper_bound);
        let monotonic = probe_monotonic(probe_hi, self.params.probe_samples, self.params.tolerance, &value);

        if !target_met {
            tracing::warn!(
                ?mode,
                price = outcome.price,
                reached,
                upper_bound = self.params.upper_bound,
                "target not reached within the search interval"
            );
        }
        if !monotonic {
            tracing::warn!(?mode, "objective decreases with price; bisection may miss the lowest root");
        }
        tracing::debug!(price = outcome.price, evaluations = outcome.evaluations, "solve finished");

        SolveResult {
            price: outcome.price,
            breakdown,
            mode,
            diagnostics: SolveDiagnostics {
                iterations: outcome.evaluations,
                strategy: self.params.strategy,
                target_met,
                monotonic,
            },
        }
    }
}

impl Default for PriceSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Solve with default parameters
pub fn solve(request: &SolveRequest) -> SolveResult {
    PriceSolver::new().solve(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        let params = SolverParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.upper_bound, 1_000_000.0);
        assert!(params.iterations >= MIN_ITERATIONS);
    }

    #[test]
    fn test_rejects_bad_params() {
        let bad_bound = SolverParams {
            upper_bound: 0.0,
            ..Default::default()
        };
        assert!(PriceSolver::with_params(bad_bound).is_err());

        let too_few = SolverParams {
            iterations: 10,
            ..Default::default()
        };
        assert!(matches!(
            PriceSolver::with_params(too_few),
            Err(FeeCalcError::SolverError(_))
        ));

        let no_samples = SolverParams {
            strategy: SearchStrategy::ScanThenBisect { samples: 0 },
            ..Default::default()
        };
        assert!(no_samples.validate().is_err());
    }

    #[test]
    fn test_rejects_unbounded_work() {
        let too_many_iterations = SolverParams {
            iterations: MAX_ITERATIONS + 1,
            ..Default::default()
        };
        assert!(matches!(
            too_many_iterations.validate(),
            Err(FeeCalcError::SolverError(_))
        ));

        let params: SolverParams =
            serde_json::from_str(r#"{"strategy": {"scanThenBisect": {"samples": 1000000000000}}}"#)
                .unwrap();
        assert!(matches!(
            PriceSolver::with_params(params),
            Err(FeeCalcError::SolverError(_))
        ));

        let huge_probe = SolverParams {
            probe_samples: MAX_SAMPLES + 1,
            ..Default::default()
        };
        assert!(huge_probe.validate().is_err());

        let at_limits = SolverParams {
            iterations: MAX_ITERATIONS,
            strategy: SearchStrategy::ScanThenBisect { samples: MAX_SAMPLES },
            probe_samples: MAX_SAMPLES,
            ..Default::default()
        };
        assert!(at_limits.validate().is_ok());
    }

    #[test]
    fn test_params_from_partial_json() {
        let params: SolverParams =
            serde_json::from_str(r#"{"upperBound": 5000, "strategy": {"scanThenBisect": {"samples": 500}}}"#)
                .unwrap();
        assert_eq!(params.upper_bound, 5000.0);
        assert_eq!(params.iterations, DEFAULT_ITERATIONS);
        assert_eq!(params.strategy, SearchStrategy::ScanThenBisect { samples: 500 });
    }
}
