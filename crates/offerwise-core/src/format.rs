// Display formatting for compensation figures.

/// Shown in place of a figure that is not a finite number.
pub const MISSING_FIGURE: &str = "–";

/// Format an amount in lakhs: `₹ 12.50 L`. Non-finite values render as "–".
pub fn format_lakhs(value: f64) -> String {
    if !value.is_finite() {
        return MISSING_FIGURE.to_string();
    }
    // -0.0 would print as "-0.00"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("₹ {:.2} L", value)
}

/// Format a change in lakhs with an explicit `+` for gains: `+₹ 1.20 L`,
/// `₹ -0.50 L`.
pub fn format_delta(delta: f64) -> String {
    if !delta.is_finite() {
        return MISSING_FIGURE.to_string();
    }
    let sign = if delta >= 0.0 { "+" } else { "" };
    format!("{sign}{}", format_lakhs(delta))
}

/// Slider readout: `12%`.
pub fn format_pct(pct: i32) -> String {
    format!("{pct}%")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
