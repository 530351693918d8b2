mod fee_policy;
mod rule_book;
mod comparison;

pub use fee_policy::{
    discounted_price, evaluate, evaluate_for, FeeFormula, FeePolicy, FeeSchedule,
    FlatThresholdOrPercent, StandardPercentPlusFixed,
};
pub use rule_book::RuleBook;
pub use comparison::{best_platform, compare_platforms, PlatformQuote};
