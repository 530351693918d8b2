mod platform;
mod rule;
mod inputs;
mod breakdown;
mod error;
pub mod display;

pub use platform::{FormulaFamily, Platform};
pub use rule::{FeeRule, FeeRuleOverride, FlatThresholdParams};
pub use inputs::TransactionInputs;
pub use breakdown::{margin_pct, FeeBreakdown};
pub use error::{FeeCalcError, Result};
