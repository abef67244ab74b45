// Negotiation email draft.
//
// Fills a fixed template with the role, the city, and a base ask 10% above
// the current base.

use crate::context::CompensationContext;

/// Multiplier applied to the current base to produce the ask.
pub const ASK_UPLIFT: f64 = 1.10;

/// Shown in place of the ask when the base is not a finite number.
pub const ASK_PLACEHOLDER: &str = "—";

/// The ask rounded to one decimal, e.g. `11.0`, or the placeholder.
pub fn format_ask(base: f64) -> String {
    let ask = base * ASK_UPLIFT;
    if ask.is_finite() {
        format!("{ask:.1}")
    } else {
        ASK_PLACEHOLDER.to_string()
    }
}

/// Build the email draft for the context.
pub fn generate(ctx: &CompensationContext) -> String {
    let role = ctx.role_or_default();
    let city = ctx.city_or_default();
    let ask = format_ask(ctx.base);

    let lines = [
        format!("Subject: Offer Discussion — Role: {role}, {city}"),
        String::new(),
        "Hi Recruiter,".to_string(),
        format!(
            "Thank you for the opportunity and the detailed offer. Based on the role scope \
             and {city} market data for {role} roles, a base of ₹{ask}L would reflect the \
             responsibilities well."
        ),
        "I’m flexible on structure (bonus/joining) to align with team timelines. \
         If we can align on base, I can sign off quickly."
            .to_string(),
        String::new(),
        "Regards,".to_string(),
        "Candidate".to_string(),
    ];
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
