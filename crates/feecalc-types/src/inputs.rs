use serde::{Deserialize, Serialize};

use crate::error::{FeeCalcError, Result};

/// Per-calculation seller inputs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionInputs {
    /// Listing price before discount
    pub price: f64,
    /// Discount applied to the price, in percent (0-100)
    pub discount_pct: f64,
    /// Shipping charged to the buyer
    pub ship_charge: f64,
    /// Seller's actual shipping cost
    pub ship_cost: f64,
    /// Cost of goods sold
    pub cogs: f64,
    /// Tax collected, treated as an expense by the standard formula
    pub tax: f64,
}

impl TransactionInputs {
    pub fn new(price: f64) -> Self {
        TransactionInputs {
            price,
            ..Default::default()
        }
    }

    /// Copy with a different listing price
    pub fn with_price(&self, price: f64) -> Self {
        TransactionInputs { price, ..*self }
    }

    /// Reject values outside the evaluator's domain
    pub fn validate(&self) -> Result<()> {
        for (field, value) in self.amounts() {
            if !value.is_finite() {
                return Err(FeeCalcError::InvalidInput(format!(
                    "{} must be finite, got {}",
                    field, value
                )));
            }
            if value < 0.0 {
                return Err(FeeCalcError::InvalidInput(format!(
                    "{} must be non-negative, got {}",
                    field, value
                )));
            }
        }
        if !self.discount_pct.is_finite() || !(0.0..=100.0).contains(&self.discount_pct) {
            return Err(FeeCalcError::InvalidInput(format!(
                "discountPct must be within [0, 100], got {}",
                self.discount_pct
            )));
        }
        Ok(())
    }

    /// Clamp into the evaluator's domain: non-finite and negative amounts
    /// become 0, the discount is held to [0, 100]
    pub fn clamped(&self) -> Self {
        TransactionInputs {
            price: clamp_amount(self.price),
            discount_pct: if self.discount_pct.is_finite() {
                self.discount_pct.clamp(0.0, 100.0)
            } else {
                0.0
            },
            ship_charge: clamp_amount(self.ship_charge),
            ship_cost: clamp_amount(self.ship_cost),
            cogs: clamp_amount(self.cogs),
            tax: clamp_amount(self.tax),
        }
    }

    fn amounts(&self) -> [(&'static str, f64); 5] {
        [
            ("price", self.price),
            ("shipCharge", self.ship_charge),
            ("shipCost", self.ship_cost),
            ("cogs", self.cogs),
            ("tax", self.tax),
        ]
    }
}

fn clamp_amount(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
