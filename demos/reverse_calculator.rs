use feecalc_fees::RuleBook;
use feecalc_solver::{PriceSolver, SearchStrategy, SolveRequest, SolverParams};
use feecalc_types::display::{format_currency, format_percent};
use feecalc_types::{Platform, TransactionInputs};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== FeeCalc Reverse Calculator Demo ===\n");

    let book = RuleBook::default();

    // Costs the seller carries regardless of the listing price
    let inputs = TransactionInputs {
        discount_pct: 10.0,
        ship_cost: 7.50,
        cogs: 18.00,
        ..TransactionInputs::default()
    };

    println!("Fixed inputs:");
    println!("  Discount: {}", format_percent(inputs.discount_pct));
    println!("  Shipping label: {}", format_currency(inputs.ship_cost));
    println!("  Cost of goods: {}", format_currency(inputs.cogs));
    println!();

    // Scanning first keeps the lowest price when a fee tier makes profit dip
    let solver = match PriceSolver::with_params(SolverParams {
        strategy: SearchStrategy::ScanThenBisect { samples: 20_000 },
        ..Default::default()
    }) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("✗ Invalid solver parameters: {}", e);
            return;
        }
    };

    println!("Price needed for {} profit:", format_currency(25.0));
    for platform in Platform::all() {
        let req = match SolveRequest::from_book(&book, *platform, inputs) {
            Ok(req) => req.with_target_profit(25.0),
            Err(e) => {
                eprintln!("  {}: {}", platform.display_name(), e);
                continue;
            }
        };
        let result = solver.solve(&req);
        let marker = if result.diagnostics.target_met { "✓" } else { "✗" };
        println!(
            "  {} {:<22} list at {:>10}  fees {:>8}  margin {:>6}",
            marker,
            platform.display_name(),
            format_currency(result.price),
            format_currency(result.breakdown.total_fees),
            format_percent(result.breakdown.margin_pct)
        );
    }
    println!();

    println!("Price needed for a 35% margin on Etsy:");
    let req = match SolveRequest::from_book(&book, Platform::Etsy, inputs) {
        Ok(req) => req.with_target_margin_pct(35.0),
        Err(e) => {
            eprintln!("✗ {}", e);
            return;
        }
    };
    let result = solver.solve(&req);
    println!("  Listing price: {}", format_currency(result.price));
    println!("  Discounted:    {}", format_currency(result.breakdown.discounted));
    println!("  Marketplace:   {}", format_currency(result.breakdown.marketplace_fee));
    println!("  Payment:       {}", format_currency(result.breakdown.payment_fee));
    println!("  Listing:       {}", format_currency(result.breakdown.listing_fee));
    println!("  Profit:        {}", format_currency(result.breakdown.profit));
    println!("  Margin:        {}", format_percent(result.breakdown.margin_pct));
    println!();

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("Result as JSON:\n{}", json),
        Err(e) => eprintln!("✗ Could not serialize result: {}", e),
    }
}
