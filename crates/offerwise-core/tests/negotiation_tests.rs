// Integration tests for the negotiation core.
//
// These exercise the public API end to end: band resolution feeding a
// context, raw lever input passing through sanitization, and the scorer and
// draft generator reading the same context.

use offerwise_core::bands::{resolve_band, BandTable};
use offerwise_core::config::OfferConfig;
use offerwise_core::context::CompensationContext;
use offerwise_core::format::{format_delta, format_lakhs};
use offerwise_core::levers::{NegotiationLevers, RawLevers};
use offerwise_core::risk::{assess, simulate, RiskTier};
use offerwise_core::script::generate;

// ===========================================================================
// Test helpers
// ===========================================================================

fn context(base: f64, bonus: f64, jb: f64, p50: Option<f64>, p75: Option<f64>) -> CompensationContext {
    CompensationContext::new(base, bonus, jb, p50, p75).expect("valid context")
}

fn levers(base: i32, bonus: i32, level_up: bool) -> NegotiationLevers {
    NegotiationLevers {
        base_increase_pct: base,
        bonus_increase_pct: bonus,
        level_up,
    }
}

fn offer(role: &str, city: &str, base: f64, bonus: f64, jb: f64) -> OfferConfig {
    OfferConfig {
        role: role.into(),
        level: "L5".into(),
        city: city.into(),
        base,
        bonus,
        joining_bonus: jb,
    }
}

// ===========================================================================
// Scoring scenarios
// ===========================================================================

#[test]
fn benchmark_rules_never_fire_without_median() {
    let ctx = context(10.0, 2.0, 0.0, None, None);
    for base_pct in [-20, 0, 10, 16, 26, 80] {
        for level_up in [false, true] {
            let result = assess(&ctx, &levers(base_pct, 0, level_up));
            assert_eq!(result.score, 0, "base_pct={base_pct} level_up={level_up}");
            assert!(result.reasons.is_empty());
        }
    }
}

#[test]
fn aggressive_base_ask_at_median() {
    let ctx = context(10.0, 2.0, 0.0, Some(10.0), Some(12.0));
    let result = assess(&ctx, &levers(30, 0, false));
    assert_eq!(result.reasons, vec!["Base ask > 15% cap", "Above P75"]);
    assert_eq!(result.score, 3);
    assert_eq!(result.tier, RiskTier::Medium);
}

#[test]
fn level_up_below_median() {
    let ctx = context(8.0, 1.0, 0.0, Some(10.0), Some(12.0));
    let result = assess(&ctx, &levers(0, 0, true));
    assert_eq!(result.score, 2);
    assert_eq!(result.tier, RiskTier::Medium);
}

#[test]
fn four_levers_penalized_with_or_without_benchmarks() {
    let with = context(10.0, 2.0, 1.0, Some(10.0), Some(12.0));
    let without = context(10.0, 2.0, 1.0, None, None);
    for ctx in [with, without] {
        let result = assess(&ctx, &levers(5, 5, true));
        assert!(result.reasons.iter().any(|r| r == "Too many levers (>2)"));
        assert_eq!(result.score, 2);
    }
}

#[test]
fn raw_input_is_sanitized_before_scoring() {
    let ctx = context(10.0, 2.0, 0.0, Some(10.0), Some(12.0));
    let raw = RawLevers {
        base_pct: "thirty".into(),
        bonus_pct: "".into(),
        level_ask: "same".into(),
    };
    let result = assess(&ctx, &raw.sanitize());
    assert_eq!(result.score, 0);
    assert_eq!(result.tier, RiskTier::Low);

    let raw = RawLevers {
        base_pct: "30%".into(),
        ..raw
    };
    assert_eq!(assess(&ctx, &raw.sanitize()).score, 3);
}

// ===========================================================================
// Offer intake → simulation
// ===========================================================================

#[test]
fn seeded_offer_simulation() {
    let offer = offer("Analyst", "BLR", 8.0, 1.0, 0.0);
    let band = resolve_band(&offer, None, &BandTable::seeded());
    let ctx = CompensationContext::from_offer(&offer, &band).unwrap();
    assert_eq!(ctx.p50, Some(8.5));
    assert_eq!(ctx.p75, Some(10.0));

    // below median: 25% cap; 8 * 1.2 = 9.6 stays under 10.5
    let sim = simulate(&ctx, &levers(20, 10, false));
    assert_eq!(sim.assessment.score, 0);
    assert_eq!(format_lakhs(sim.projection.new_ctc), "₹ 10.70 L");
    assert_eq!(format_delta(sim.projection.delta), "+₹ 1.70 L");
}

#[test]
fn unknown_pair_uses_estimated_band() {
    let offer = offer("Staff Engineer", "BLR", 40.0, 5.0, 2.0);
    let band = resolve_band(&offer, None, &BandTable::seeded());
    let ctx = CompensationContext::from_offer(&offer, &band).unwrap();
    // estimate: p50 = base, p75 = 1.2 * base
    let sim = simulate(&ctx, &levers(20, 0, false));
    // 20% > 15% cap; 48 > 50.4 is false; two active levers
    assert_eq!(sim.assessment.reasons, vec!["Base ask > 15% cap"]);
}

// ===========================================================================
// Draft
// ===========================================================================

#[test]
fn draft_for_configured_offer() {
    let offer = offer("AE", "DEL", 10.0, 2.0, 0.0);
    let band = resolve_band(&offer, None, &BandTable::seeded());
    let ctx = CompensationContext::from_offer(&offer, &band).unwrap();
    let draft = generate(&ctx);
    assert!(draft.starts_with("Subject: Offer Discussion — Role: AE, DEL"));
    assert!(draft.contains("₹11.0L"));
    assert!(draft.ends_with("Regards,\nCandidate"));
}

#[test]
fn draft_with_bare_context() {
    let ctx = CompensationContext {
        base: 10.0,
        ..Default::default()
    };
    assert!(generate(&ctx).contains("11.0"));

    let ctx = CompensationContext {
        base: f64::NAN,
        ..Default::default()
    };
    let draft = generate(&ctx);
    assert!(draft.contains("—"));
    assert!(!draft.contains("NaN"));
}
