use feecalc_types::{FeeBreakdown, Platform, Result, TransactionInputs};
use serde::{Deserialize, Serialize};

use crate::rule_book::RuleBook;

/// One row of a cross-platform comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformQuote {
    pub platform: Platform,
    pub breakdown: FeeBreakdown,
}

/// Evaluate the same inputs on every platform, in [`Platform::all`] order
pub fn compare_platforms(book: &RuleBook, inputs: &TransactionInputs) -> Result<Vec<PlatformQuote>> {
    Platform::all()
        .iter()
        .map(|platform| {
            let schedule = book.schedule(*platform)?;
            Ok(PlatformQuote {
                platform: *platform,
                breakdown: schedule.evaluate(inputs),
            })
        })
        .collect()
}

/// Highest-profit quote; the earlier platform wins ties
pub fn best_platform(quotes: &[PlatformQuote]) -> Option<&PlatformQuote> {
    quotes.iter().reduce(|best, q| {
        if q.breakdown.profit.total_cmp(&best.breakdown.profit).is_gt() {
            q
        } else {
            best
        }
    })
}
