use feecalc_types::{
    FeeBreakdown, FeeRule, FlatThresholdParams, FormulaFamily, Platform, TransactionInputs,
};
use serde::{Deserialize, Serialize};

/// Fee policy trait
pub trait FeePolicy {
    /// Evaluate fees and payout for one set of inputs. Pure and total over
    /// validated inputs.
    fn evaluate(&self, rule: &FeeRule, inputs: &TransactionInputs) -> FeeBreakdown;
}

/// Price after discount, floored at zero
pub fn discounted_price(inputs: &TransactionInputs) -> f64 {
    (inputs.price * (1.0 - inputs.discount_pct / 100.0)).max(0.0)
}

/// Percentage of (discounted + buyer shipping) plus fixed amounts, payment
/// processing on the same base, optional listing fee
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardPercentPlusFixed;

impl FeePolicy for StandardPercentPlusFixed {
    fn evaluate(&self, rule: &FeeRule, inputs: &TransactionInputs) -> FeeBreakdown {
        let discounted = discounted_price(inputs);
        let base = discounted + inputs.ship_charge;

        let marketplace_fee = (base * rule.marketplace_pct).max(0.0) + rule.marketplace_fixed;
        let payment_fee = (base * rule.payment_pct).max(0.0) + rule.payment_fixed;
        let listing_fee = rule.listing_fee();
        let total_fees = marketplace_fee + payment_fee + listing_fee;

        let net = discounted + inputs.ship_charge
            - total_fees
            - inputs.ship_cost
            - inputs.cogs
            - inputs.tax;

        FeeBreakdown::new(discounted, marketplace_fee, payment_fee, listing_fee, net)
    }
}

/// Flat fee below a threshold, `marketplace_pct` of the discounted price at or
/// above it.
///
/// Buyer shipping is neither part of the fee base nor added back to net, and
/// tax is collected and remitted by the marketplace, so it does not reduce
/// net. Payment, listing and fixed marketplace amounts of the rule are not
/// used by this family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatThresholdOrPercent {
    pub params: FlatThresholdParams,
}

impl FlatThresholdOrPercent {
    pub fn new(params: FlatThresholdParams) -> Self {
        FlatThresholdOrPercent { params }
    }

    fn marketplace_fee(&self, rule: &FeeRule, discounted: f64) -> f64 {
        if discounted < self.params.threshold {
            self.params.flat_fee
        } else {
            (discounted * rule.marketplace_pct).max(0.0)
        }
    }
}

impl FeePolicy for FlatThresholdOrPercent {
    fn evaluate(&self, rule: &FeeRule, inputs: &TransactionInputs) -> FeeBreakdown {
        let discounted = discounted_price(inputs);
        let marketplace_fee = self.marketplace_fee(rule, discounted);

        let net = discounted - marketplace_fee - inputs.ship_cost - inputs.cogs;

        FeeBreakdown::new(discounted, marketplace_fee, 0.0, 0.0, net)
    }
}

/// Closed set of fee formula families
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FeeFormula {
    StandardPercentPlusFixed(StandardPercentPlusFixed),
    FlatThresholdOrPercent(FlatThresholdOrPercent),
}

impl FeeFormula {
    /// Formula for a family, with the flat-threshold parameters to use if the
    /// family needs them
    pub fn from_family(family: FormulaFamily, flat: FlatThresholdParams) -> Self {
        match family {
            FormulaFamily::StandardPercentPlusFixed => {
                FeeFormula::StandardPercentPlusFixed(StandardPercentPlusFixed)
            }
            FormulaFamily::FlatThresholdOrPercent => {
                FeeFormula::FlatThresholdOrPercent(FlatThresholdOrPercent::new(flat))
            }
        }
    }

    /// Formula selected by platform identity
    pub fn for_platform(platform: Platform, flat: FlatThresholdParams) -> Self {
        Self::from_family(platform.formula_family(), flat)
    }

    pub fn family(&self) -> FormulaFamily {
        match self {
            FeeFormula::StandardPercentPlusFixed(_) => FormulaFamily::StandardPercentPlusFixed,
            FeeFormula::FlatThresholdOrPercent(_) => FormulaFamily::FlatThresholdOrPercent,
        }
    }
}

impl FeePolicy for FeeFormula {
    fn evaluate(&self, rule: &FeeRule, inputs: &TransactionInputs) -> FeeBreakdown {
        match self {
            FeeFormula::StandardPercentPlusFixed(f) => f.evaluate(rule, inputs),
            FeeFormula::FlatThresholdOrPercent(f) => f.evaluate(rule, inputs),
        }
    }
}

/// Evaluate with the standard percent-plus-fixed formula
pub fn evaluate(rule: &FeeRule, inputs: &TransactionInputs) -> FeeBreakdown {
    StandardPercentPlusFixed.evaluate(rule, inputs)
}

/// Evaluate with the formula family of `platform` and default flat-threshold parameters
pub fn evaluate_for(platform: Platform, rule: &FeeRule, inputs: &TransactionInputs) -> FeeBreakdown {
    FeeFormula::for_platform(platform, FlatThresholdParams::default()).evaluate(rule, inputs)
}

/// A resolved rule bound to its platform's formula
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub platform: Platform,
    pub rule: FeeRule,
    pub formula: FeeFormula,
}

impl FeeSchedule {
    pub fn new(platform: Platform, rule: FeeRule, flat: FlatThresholdParams) -> Self {
        FeeSchedule {
            platform,
            rule,
            formula: FeeFormula::for_platform(platform, flat),
        }
    }

    pub fn evaluate(&self, inputs: &TransactionInputs) -> FeeBreakdown {
        self.formula.evaluate(&self.rule, inputs)
    }
}
