//! Presentation rounding. Only used when rendering values; the calculation
//! chain always carries unrounded floats.

const PLACEHOLDER: &str = "—";

/// Round to whole cents
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Currency with two decimals, negatives in parentheses: `($12.34)`
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let cents = (value * 100.0).round();
    let abs = cents.abs() / 100.0;
    if cents < 0.0 {
        format!("(${:.2})", abs)
    } else {
        format!("${:.2}", abs)
    }
}

/// Percentage with one decimal: `39.4%`
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let tenths = (value * 10.0).round();
    // avoid rendering "-0.0%"
    let tenths = if tenths == 0.0 { 0.0 } else { tenths };
    format!("{:.1}%", tenths / 10.0)
}
