/// Default number of halvings; [0, 1e6] shrinks well below a cent long before this
pub const DEFAULT_ITERATIONS: usize = 80;

/// Fewest halvings accepted by [`SolverParams`](crate::SolverParams)
pub const MIN_ITERATIONS: usize = 60;

/// Most halvings accepted; the bracket is far below one ulp long before this
pub const MAX_ITERATIONS: usize = 200;

/// Most scan or probe samples accepted by [`SolverParams`](crate::SolverParams)
pub const MAX_SAMPLES: usize = 1_000_000;

/// Outcome of a bracketed search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    pub price: f64,
    /// Objective evaluations performed
    pub evaluations: usize,
}

/// Fixed-iteration bisection over a price interval.
///
/// Runs every iteration; there is no early exit, so cost is bounded and the
/// result is reproducible regardless of input shape.
#[derive(Debug, Clone, Copy)]
pub struct Bisection {
    iterations: usize,
}

impl Bisection {
    pub fn new() -> Self {
        Bisection {
            iterations: DEFAULT_ITERATIONS,
        }
    }

    pub fn with_iterations(iterations: usize) -> Self {
        Bisection { iterations }
    }

    /// Smallest price in `[lo, hi]` whose value reaches `target`, assuming
    /// `value` is non-decreasing. Returns the final upper bound floored at 0;
    /// an unreachable target leaves it at `hi`.
    pub fn search<F>(&self, lo: f64, hi: f64, target: f64, value: F) -> SearchOutcome
    where
        F: Fn(f64) -> f64,
    {
        self.search_bracket(lo, hi, target, false, value)
    }

    /// Bisect a bracket whose ends sit on opposite sides of `target`.
    ///
    /// `lo_met` says whether `value(lo) >= target`; the returned price is the
    /// end of the final bracket on the same side as the meeting end, so a
    /// falling bracket returns its lower end.
    fn search_bracket<F>(&self, mut lo: f64, mut hi: f64, target: f64, lo_met: bool, value: F) -> SearchOutcome
    where
        F: Fn(f64) -> f64,
    {
        for _ in 0..self.iterations {
            let mid = lo + (hi - lo) / 2.0;
            if (value(mid) >= target) == lo_met {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        let price = if lo_met { lo } else { hi };
        SearchOutcome {
            price: price.max(0.0),
            evaluations: self.iterations,
        }
    }

    /// Linear scan over `samples` evenly spaced prices in `(lo, hi]` for the
    /// first pair of neighbours on opposite sides of `target`, then bisection
    /// inside that step in whichever direction the pair crosses. Finds the
    /// lowest crossing at scan resolution even when `value` dips or falls.
    ///
    /// `lo` itself is not sampled: at price 0 the margin guard pins margin to
    /// 0, which is not a crossing. When every sample already meets the target
    /// the first step `[lo, lo + step]` is bisected as a rising bracket.
    pub fn scan_then_search<F>(
        &self,
        lo: f64,
        hi: f64,
        target: f64,
        samples: usize,
        value: F,
    ) -> SearchOutcome
    where
        F: Fn(f64) -> f64,
    {
        let samples = samples.max(1);
        let step = (hi - lo) / samples as f64;
        let at = |k: usize| if k == samples { hi } else { lo + step * k as f64 };

        let first = at(1);
        let first_met = value(first) >= target;
        let mut prev = first;
        for k in 2..=samples {
            let current = at(k);
            if (value(current) >= target) != first_met {
                let inner = self.search_bracket(prev, current, target, first_met, &value);
                return SearchOutcome {
                    price: inner.price,
                    evaluations: k + inner.evaluations,
                };
            }
            prev = current;
        }

        if first_met {
            let inner = self.search(lo, first, target, &value);
            return SearchOutcome {
                price: inner.price,
                evaluations: samples + inner.evaluations,
            };
        }

        SearchOutcome {
            price: hi.max(0.0),
            evaluations: samples,
        }
    }
}

impl Default for Bisection {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample `value` at `samples` evenly spaced points in `(0, hi]` and report
/// whether it never decreases by more than `slack`
pub fn probe_monotonic<F>(hi: f64, samples: usize, slack: f64, value: F) -> bool
where
    F: Fn(f64) -> f64,
{
    if samples < 2 || hi.is_nan() || hi <= 0.0 {
        return true;
    }
    let step = hi / samples as f64;
    let mut prev = value(step);
    for k in 2..=samples {
        let current = value(step * k as f64);
        if current < prev - slack {
            return false;
        }
        prev = current;
    }
    true
}
