mod objective;
mod bisection;
mod request;
mod price_solver;

pub use objective::{FnObjective, PriceObjective, ScheduleObjective, TargetMode};
pub use bisection::{
    probe_monotonic, Bisection, SearchOutcome, DEFAULT_ITERATIONS, MAX_ITERATIONS, MAX_SAMPLES,
    MIN_ITERATIONS,
};
pub use request::{SolveDiagnostics, SolveRequest, SolveResult};
pub use price_solver::{solve, PriceSolver, SearchStrategy, SolverParams};
