use feecalc_fees::{best_platform, compare_platforms, RuleBook};
use feecalc_types::display::{format_currency, format_percent};
use feecalc_types::{FeeRuleOverride, Platform, TransactionInputs};
use std::collections::BTreeMap;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== FeeCalc Platform Comparison Demo ===\n");

    let raw = TransactionInputs {
        price: 42.00,
        discount_pct: 0.0,
        ship_charge: 5.99,
        ship_cost: 6.25,
        cogs: 12.00,
        tax: 2.50,
    };
    if let Err(e) = raw.validate() {
        eprintln!("✗ {}", e);
        return;
    }

    println!("Sale: {} + {} shipping, {} tax", format_currency(raw.price), format_currency(raw.ship_charge), format_currency(raw.tax));
    println!();

    let book = RuleBook::default();
    print_table("Default fee rules", &book, &raw);

    // Seller negotiated a lower final value fee
    let overrides: BTreeMap<Platform, FeeRuleOverride> =
        match serde_json::from_str(r#"{"ebay": {"marketplacePct": 0.08}}"#) {
            Ok(overrides) => overrides,
            Err(e) => {
                eprintln!("✗ Invalid overrides: {}", e);
                return;
            }
        };
    match book.with_overrides(&overrides) {
        Ok(custom) => print_table("With eBay override", &custom, &raw),
        Err(e) => eprintln!("✗ {}", e),
    }
}

fn print_table(title: &str, book: &RuleBook, inputs: &TransactionInputs) {
    let quotes = match compare_platforms(book, inputs) {
        Ok(quotes) => quotes,
        Err(e) => {
            eprintln!("✗ Comparison failed: {}", e);
            return;
        }
    };

    println!("{}:", title);
    for quote in &quotes {
        println!(
            "  {:<22} fees {:>8}  net {:>9}  margin {:>6}",
            quote.platform.display_name(),
            format_currency(quote.breakdown.total_fees),
            format_currency(quote.breakdown.net),
            format_percent(quote.breakdown.margin_pct)
        );
    }
    if let Some(best) = best_platform(&quotes) {
        println!("  Best: {} ({})", best.platform.display_name(), format_currency(best.breakdown.profit));
    }
    println!();
}
