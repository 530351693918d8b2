use serde::{Deserialize, Serialize};

/// Fee evaluation result for one price.
///
/// Every field is derived; `net` and `profit` carry the same value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeBreakdown {
    pub discounted: f64,
    pub marketplace_fee: f64,
    pub payment_fee: f64,
    pub listing_fee: f64,
    pub total_fees: f64,
    pub net: f64,
    pub profit: f64,
    pub margin_pct: f64,
}

impl FeeBreakdown {
    /// Assemble a breakdown, deriving the fee total and margin
    pub fn new(
        discounted: f64,
        marketplace_fee: f64,
        payment_fee: f64,
        listing_fee: f64,
        net: f64,
    ) -> Self {
        FeeBreakdown {
            discounted,
            marketplace_fee,
            payment_fee,
            listing_fee,
            total_fees: marketplace_fee + payment_fee + listing_fee,
            net,
            profit: net,
            margin_pct: margin_pct(net, discounted),
        }
    }
}

/// Profit over discounted price in percent; exactly 0 when nothing was sold
pub fn margin_pct(profit: f64, discounted: f64) -> f64 {
    if discounted > 0.0 {
        profit / discounted * 100.0
    } else {
        0.0
    }
}
