use serde::{Deserialize, Serialize};

use crate::error::{FeeCalcError, Result};

/// Per-platform fee configuration.
///
/// Percentages are multipliers (`0.10` is ten percent). Fixed amounts are in
/// the same currency unit as the listing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRule {
    pub marketplace_pct: f64,
    #[serde(default)]
    pub marketplace_fixed: f64,
    #[serde(default)]
    pub payment_pct: f64,
    #[serde(default)]
    pub payment_fixed: f64,
    /// Per-listing fee; absent means no listing fee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_fixed: Option<f64>,
}

impl FeeRule {
    pub const fn new(
        marketplace_pct: f64,
        marketplace_fixed: f64,
        payment_pct: f64,
        payment_fixed: f64,
    ) -> Self {
        FeeRule {
            marketplace_pct,
            marketplace_fixed,
            payment_pct,
            payment_fixed,
            listing_fixed: None,
        }
    }

    pub const fn with_listing_fixed(mut self, listing_fixed: f64) -> Self {
        self.listing_fixed = Some(listing_fixed);
        self
    }

    /// Listing fee with the documented default of zero
    pub fn listing_fee(&self) -> f64 {
        self.listing_fixed.unwrap_or(0.0)
    }

    /// Check rule invariants; meant for configuration load time
    pub fn validate(&self) -> Result<()> {
        check_pct("marketplacePct", self.marketplace_pct)?;
        check_pct("paymentPct", self.payment_pct)?;
        check_fixed("marketplaceFixed", self.marketplace_fixed)?;
        check_fixed("paymentFixed", self.payment_fixed)?;
        if let Some(listing) = self.listing_fixed {
            check_fixed("listingFixed", listing)?;
        }
        Ok(())
    }
}

fn check_pct(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(FeeCalcError::InvalidRule(format!(
            "{} must be a fraction in [0, 1], got {}",
            field, value
        )));
    }
    Ok(())
}

fn check_fixed(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(FeeCalcError::InvalidRule(format!(
            "{} must be a non-negative amount, got {}",
            field, value
        )));
    }
    Ok(())
}

/// Partial fee rule merged over a base rule at the configuration boundary
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FeeRuleOverride {
    pub marketplace_pct: Option<f64>,
    pub marketplace_fixed: Option<f64>,
    pub payment_pct: Option<f64>,
    pub payment_fixed: Option<f64>,
    pub listing_fixed: Option<f64>,
}

impl FeeRuleOverride {
    pub fn is_empty(&self) -> bool {
        *self == FeeRuleOverride::default()
    }

    /// Apply this override to `base`; set fields win
    pub fn apply(&self, base: &FeeRule) -> FeeRule {
        FeeRule {
            marketplace_pct: self.marketplace_pct.unwrap_or(base.marketplace_pct),
            marketplace_fixed: self.marketplace_fixed.unwrap_or(base.marketplace_fixed),
            payment_pct: self.payment_pct.unwrap_or(base.payment_pct),
            payment_fixed: self.payment_fixed.unwrap_or(base.payment_fixed),
            listing_fixed: self.listing_fixed.or(base.listing_fixed),
        }
    }
}

/// Parameters of the flat-below-threshold fee family
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatThresholdParams {
    /// Discounted prices strictly below this pay the flat fee
    pub threshold: f64,
    pub flat_fee: f64,
}

impl Default for FlatThresholdParams {
    fn default() -> Self {
        FlatThresholdParams {
            threshold: 15.0,
            flat_fee: 2.95,
        }
    }
}

impl FlatThresholdParams {
    pub fn validate(&self) -> Result<()> {
        check_fixed("threshold", self.threshold)?;
        check_fixed("flatFee", self.flat_fee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_fee_defaults_to_zero() {
        let rule = FeeRule::new(0.1, 0.0, 0.029, 0.30);
        assert_eq!(rule.listing_fee(), 0.0);
        assert_eq!(rule.with_listing_fixed(0.20).listing_fee(), 0.20);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(FeeRule::new(0.1, 0.0, 0.03, 0.25).validate().is_ok());
        assert!(FeeRule::new(1.5, 0.0, 0.0, 0.0).validate().is_err());
        assert!(FeeRule::new(0.1, -1.0, 0.0, 0.0).validate().is_err());
        assert!(FeeRule::new(f64::NAN, 0.0, 0.0, 0.0).validate().is_err());
        assert!(FeeRule::new(0.1, 0.0, 0.0, 0.0)
            .with_listing_fixed(-0.2)
            .validate()
            .is_err());
    }

    #[test]
    fn test_override_merges_field_by_field() {
        let base = FeeRule::new(0.10, 0.0, 0.029, 0.30).with_listing_fixed(0.20);
        let patch = FeeRuleOverride {
            marketplace_pct: Some(0.12),
            payment_fixed: Some(0.50),
            ..Default::default()
        };

        let merged = patch.apply(&base);
        assert_eq!(merged.marketplace_pct, 0.12);
        assert_eq!(merged.marketplace_fixed, 0.0);
        assert_eq!(merged.payment_pct, 0.029);
        assert_eq!(merged.payment_fixed, 0.50);
        assert_eq!(merged.listing_fixed, Some(0.20));
        assert!(FeeRuleOverride::default().is_empty());
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_rule_json_uses_camel_case_and_optional_listing() {
        let rule: FeeRule =
            serde_json::from_str(r#"{"marketplacePct":0.065,"paymentPct":0.03,"paymentFixed":0.25}"#)
                .unwrap();
        assert_eq!(rule.marketplace_pct, 0.065);
        assert_eq!(rule.marketplace_fixed, 0.0);
        assert_eq!(rule.listing_fixed, None);

        let json = serde_json::to_string(&rule).unwrap();
        assert!(!json.contains("listingFixed"));
    }
}
