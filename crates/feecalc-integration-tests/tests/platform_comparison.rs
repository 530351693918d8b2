use feecalc_fees::{best_platform, compare_platforms, RuleBook};
use feecalc_integration_tests::{init_tracing, sample_inputs};
use feecalc_types::{FeeCalcError, FeeRuleOverride, Platform, TransactionInputs};
use std::collections::BTreeMap;

const EPS: f64 = 1e-9;

#[test]
fn test_comparison_covers_every_platform_in_order() {
    init_tracing();
    let book = RuleBook::default();
    let quotes = compare_platforms(&book, &sample_inputs()).unwrap();

    let platforms: Vec<Platform> = quotes.iter().map(|q| q.platform).collect();
    assert_eq!(platforms, Platform::all().to_vec());

    for quote in &quotes {
        let expected = book.schedule(quote.platform).unwrap().evaluate(&sample_inputs());
        assert_eq!(quote.breakdown, expected);
    }
}

#[test]
fn test_default_book_profits() {
    let quotes = compare_platforms(&RuleBook::default(), &sample_inputs()).unwrap();
    let profit = |platform: Platform| {
        quotes
            .iter()
            .find(|q| q.platform == platform)
            .map(|q| q.breakdown.profit)
            .unwrap()
    };

    // 40 - fees - 8 shipping - 10 goods
    assert!((profit(Platform::Ebay) - 16.3).abs() < EPS);
    assert!((profit(Platform::Etsy) - 17.75).abs() < EPS);
    assert!((profit(Platform::Mercari) - 16.34).abs() < EPS);
    assert!((profit(Platform::Poshmark) - 14.0).abs() < EPS);
    assert!((profit(Platform::Depop) - 20.23).abs() < EPS);
    assert!((profit(Platform::FacebookMarketplace) - 20.0).abs() < EPS);

    let best = best_platform(&quotes).unwrap();
    assert_eq!(best.platform, Platform::Depop);
}

#[test]
fn test_overrides_change_the_winner() {
    init_tracing();
    let base = RuleBook::default();
    let overrides: BTreeMap<Platform, FeeRuleOverride> =
        serde_json::from_str(r#"{"depop": {"paymentPct": 0.10}}"#).unwrap();
    let book = base.with_overrides(&overrides).unwrap();

    let quotes = compare_platforms(&book, &sample_inputs()).unwrap();
    assert_eq!(best_platform(&quotes).unwrap().platform, Platform::FacebookMarketplace);

    // Base book is untouched
    assert!((base.rule(Platform::Depop).unwrap().payment_pct - 0.033).abs() < EPS);
    assert!((book.rule(Platform::Depop).unwrap().payment_fixed - 0.45).abs() < EPS);
}

#[test]
fn test_tax_only_reduces_standard_family_net() {
    let book = RuleBook::default();
    let without = compare_platforms(&book, &sample_inputs()).unwrap();
    let with_tax = compare_platforms(
        &book,
        &TransactionInputs {
            tax: 3.0,
            ..sample_inputs()
        },
    )
    .unwrap();

    for (a, b) in without.iter().zip(&with_tax) {
        let expected_drop = if a.platform == Platform::Poshmark { 0.0 } else { 3.0 };
        assert!((a.breakdown.net - b.breakdown.net - expected_drop).abs() < EPS);
        assert_eq!(a.breakdown.total_fees, b.breakdown.total_fees);
    }
}

#[test]
fn test_book_loaded_from_json_drives_comparison() {
    let json = r#"{
        "rules": {
            "ebay": {"marketplacePct": 0.10},
            "etsy": {"marketplacePct": 0.10},
            "mercari": {"marketplacePct": 0.10},
            "poshmark": {"marketplacePct": 0.10},
            "depop": {"marketplacePct": 0.10},
            "facebook": {"marketplacePct": 0.10}
        },
        "flatThreshold": {"threshold": 50, "flatFee": 1}
    }"#;
    let book = RuleBook::from_json(json).unwrap();
    let quotes = compare_platforms(&book, &sample_inputs()).unwrap();

    for quote in &quotes {
        let expected_fee = if quote.platform == Platform::Poshmark { 1.0 } else { 4.0 };
        assert!((quote.breakdown.total_fees - expected_fee).abs() < EPS);
    }
    // Flat 1.00 under the raised threshold beats 10% everywhere else
    assert_eq!(best_platform(&quotes).unwrap().platform, Platform::Poshmark);
}

#[test]
fn test_incomplete_book_is_rejected() {
    let err = RuleBook::from_json(r#"{"rules": {"ebay": {"marketplacePct": 0.1}}}"#).unwrap_err();
    assert!(matches!(err, FeeCalcError::ConfigError(_)));
}

#[test]
fn test_boundary_validation_before_comparison() {
    let raw = TransactionInputs {
        cogs: -5.0,
        discount_pct: 150.0,
        ..sample_inputs()
    };
    assert!(matches!(raw.validate(), Err(FeeCalcError::InvalidInput(_))));

    let cleaned = raw.clamped();
    assert!(cleaned.validate().is_ok());

    // Full discount: nothing sold, margins guarded
    let quotes = compare_platforms(&RuleBook::default(), &cleaned).unwrap();
    for quote in &quotes {
        assert_eq!(quote.breakdown.discounted, 0.0);
        assert_eq!(quote.breakdown.margin_pct, 0.0);
    }
}
