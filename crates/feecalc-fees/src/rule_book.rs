use feecalc_types::{FeeCalcError, FeeRule, FeeRuleOverride, FlatThresholdParams, Platform, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::fee_policy::FeeSchedule;

/// Platform to fee rule table.
///
/// Every platform in [`Platform::all`] has a validated rule. Constructors and
/// deserialization both go through validation, so lookups never see a
/// partial table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawRuleBook")]
pub struct RuleBook {
    rules: BTreeMap<Platform, FeeRule>,
    flat_threshold: FlatThresholdParams,
}

/// Unvalidated wire form of [`RuleBook`]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawRuleBook {
    rules: BTreeMap<Platform, FeeRule>,
    #[serde(default)]
    flat_threshold: FlatThresholdParams,
}

impl TryFrom<RawRuleBook> for RuleBook {
    type Error = FeeCalcError;

    fn try_from(raw: RawRuleBook) -> Result<Self> {
        RuleBook::new(raw.rules, raw.flat_threshold)
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        let mut rules = BTreeMap::new();
        rules.insert(Platform::Ebay, FeeRule::new(0.1325, 0.40, 0.0, 0.0));
        rules.insert(
            Platform::Etsy,
            FeeRule::new(0.065, 0.0, 0.03, 0.25).with_listing_fixed(0.20),
        );
        rules.insert(Platform::Mercari, FeeRule::new(0.10, 0.0, 0.029, 0.50));
        rules.insert(Platform::Poshmark, FeeRule::new(0.20, 0.0, 0.0, 0.0));
        rules.insert(Platform::Depop, FeeRule::new(0.0, 0.0, 0.033, 0.45));
        rules.insert(Platform::FacebookMarketplace, FeeRule::new(0.05, 0.0, 0.0, 0.0));

        RuleBook {
            rules,
            flat_threshold: FlatThresholdParams::default(),
        }
    }
}

impl RuleBook {
    /// Build from an explicit table
    pub fn new(rules: BTreeMap<Platform, FeeRule>, flat_threshold: FlatThresholdParams) -> Result<Self> {
        let book = RuleBook {
            rules,
            flat_threshold,
        };
        book.validate()?;
        Ok(book)
    }

    /// Load a rule table from JSON, e.g.
    /// `{"rules": {"ebay": {"marketplacePct": 0.1325, "marketplaceFixed": 0.4}, ...}}`
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawRuleBook = serde_json::from_str(json)?;
        let book = RuleBook::try_from(raw)?;
        tracing::debug!(platforms = book.rules.len(), "loaded fee rule book");
        Ok(book)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Merge partial overrides over the base rules. The result is a new,
    /// fully resolved book; `self` is untouched.
    pub fn with_overrides(&self, overrides: &BTreeMap<Platform, FeeRuleOverride>) -> Result<Self> {
        let mut merged = self.clone();
        for (platform, patch) in overrides {
            if patch.is_empty() {
                continue;
            }
            let base = self.rule(*platform)?;
            let rule = patch.apply(&base);
            rule.validate().map_err(|e| {
                FeeCalcError::ConfigError(format!("override for {}: {}", platform, e))
            })?;
            tracing::debug!(%platform, "applied fee rule override");
            merged.rules.insert(*platform, rule);
        }
        Ok(merged)
    }

    pub fn rule(&self, platform: Platform) -> Result<FeeRule> {
        self.rules.get(&platform).copied().ok_or_else(|| {
            FeeCalcError::ConfigError(format!("no fee rule for platform {}", platform))
        })
    }

    pub fn flat_threshold(&self) -> FlatThresholdParams {
        self.flat_threshold
    }

    /// Rule for `platform` bound to the platform's formula family
    pub fn schedule(&self, platform: Platform) -> Result<FeeSchedule> {
        Ok(FeeSchedule::new(platform, self.rule(platform)?, self.flat_threshold))
    }

    fn validate(&self) -> Result<()> {
        for platform in Platform::all() {
            let rule = self.rules.get(platform).ok_or_else(|| {
                FeeCalcError::ConfigError(format!("missing fee rule for platform {}", platform))
            })?;
            rule.validate()
                .map_err(|e| FeeCalcError::ConfigError(format!("{}: {}", platform, e)))?;
        }
        self.flat_threshold
            .validate()
            .map_err(|e| FeeCalcError::ConfigError(format!("flatThreshold: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_book_is_complete_and_valid() {
        let book = RuleBook::default();
        assert!(book.validate().is_ok());
        for platform in Platform::all() {
            assert!(book.schedule(*platform).is_ok());
        }
        assert_eq!(book.rule(Platform::Etsy).unwrap().listing_fee(), 0.20);
    }

    #[test]
    fn test_json_roundtrip() {
        let book = RuleBook::default();
        let json = book.to_json().unwrap();
        let loaded = RuleBook::from_json(&json).unwrap();
        assert_eq!(book, loaded);
    }

    #[test]
    fn test_missing_platform_is_config_error() {
        let json = r#"{"rules": {"ebay": {"marketplacePct": 0.13}}}"#;
        let err = RuleBook::from_json(json).unwrap_err();
        assert!(matches!(err, FeeCalcError::ConfigError(_)));
    }

    #[test]
    fn test_unknown_platform_key_is_rejected() {
        let mut value = serde_json::to_value(RuleBook::default()).unwrap();
        value["rules"]["craigslist"] = serde_json::json!({"marketplacePct": 0.0});
        let err = RuleBook::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, FeeCalcError::SerializationError(_)));
    }

    #[test]
    fn test_invalid_rule_is_rejected_at_load() {
        let mut value = serde_json::to_value(RuleBook::default()).unwrap();
        value["rules"]["mercari"]["paymentPct"] = serde_json::json!(2.9);
        let err = RuleBook::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, FeeCalcError::ConfigError(ref msg) if msg.contains("mercari")));
    }

    #[test]
    fn test_serde_deserialize_validates() {
        // Partial table with an out-of-range percentage
        let partial = r#"{"rules": {"ebay": {"marketplacePct": 7.5}}}"#;
        let err = serde_json::from_str::<RuleBook>(partial).unwrap_err();
        assert!(err.to_string().contains("Configuration error"));

        let mut value = serde_json::to_value(RuleBook::default()).unwrap();
        value["rules"]["ebay"]["marketplacePct"] = serde_json::json!(7.5);
        assert!(serde_json::from_value::<RuleBook>(value).is_err());
    }

    #[test]
    fn test_serde_deserialize_accepts_complete_book() {
        let json = RuleBook::default().to_json().unwrap();
        let direct: RuleBook = serde_json::from_str(&json).unwrap();
        assert_eq!(direct, RuleBook::from_json(&json).unwrap());
        assert_eq!(direct.flat_threshold(), FlatThresholdParams::default());
    }

    #[test]
    fn test_overrides_merge_without_mutating_base() {
        let book = RuleBook::default();
        let mut overrides = BTreeMap::new();
        overrides.insert(
            Platform::Mercari,
            FeeRuleOverride {
                marketplace_pct: Some(0.0),
                ..Default::default()
            },
        );

        let merged = book.with_overrides(&overrides).unwrap();
        assert_eq!(merged.rule(Platform::Mercari).unwrap().marketplace_pct, 0.0);
        assert_eq!(merged.rule(Platform::Mercari).unwrap().payment_fixed, 0.50);
        assert_eq!(book.rule(Platform::Mercari).unwrap().marketplace_pct, 0.10);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            Platform::Ebay,
            FeeRuleOverride {
                marketplace_fixed: Some(-1.0),
                ..Default::default()
            },
        );
        assert!(RuleBook::default().with_overrides(&overrides).is_err());
    }
}
