//! Shared fixtures for the cross-crate tests

use feecalc_types::TransactionInputs;
use tracing_subscriber::EnvFilter;

/// Route `tracing` output through the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A 40.00 listing with 8.00 label cost and 10.00 cost of goods
pub fn sample_inputs() -> TransactionInputs {
    TransactionInputs {
        ship_cost: 8.0,
        cogs: 10.0,
        ..TransactionInputs::new(40.0)
    }
}
