// Negotiation risk scoring.
//
// A fixed set of rules turns the offer context and the candidate's levers
// into a point score, a tier, and one reason per rule that fired. The same
// pass also projects the revised compensation figures for display.

use crate::context::CompensationContext;
use crate::levers::NegotiationLevers;

// ---------------------------------------------------------------------------
// Rule constants
// ---------------------------------------------------------------------------

/// Maximum base ask (as a fraction) when the offer is already at or above
/// the market median.
pub const CAP_AT_OR_ABOVE_MEDIAN: f64 = 0.15;

/// Maximum base ask (as a fraction) when the offer is below the median.
pub const CAP_BELOW_MEDIAN: f64 = 0.25;

/// Revised base may exceed P75 by this factor before it is flagged.
pub const P75_TOLERANCE: f64 = 1.05;

/// More active levers than this is penalized.
pub const MAX_LEVERS: u32 = 2;

const CAP_POINTS: u32 = 2;
const ABOVE_P75_POINTS: u32 = 1;
const LEVEL_UP_POINTS: u32 = 2;
const LEVER_COUNT_POINTS: u32 = 2;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Risk tier derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Fixed mapping: 0..=1 Low, 2..=3 Medium, 4+ High.
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=1 => RiskTier::Low,
            2..=3 => RiskTier::Medium,
            _ => RiskTier::High,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        }
    }
}

/// Result of scoring one set of levers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskAssessment {
    pub score: u32,
    pub tier: RiskTier,
    /// One entry per rule that fired, in evaluation order.
    pub reasons: Vec<String>,
}

impl RiskAssessment {
    /// Reasons joined for a single status line.
    pub fn summary(&self) -> String {
        self.reasons.join(" • ")
    }
}

/// Revised compensation figures for a set of levers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OfferProjection {
    pub new_base: f64,
    pub new_bonus: f64,
    pub new_ctc: f64,
    /// Change against the current total (base + bonus + joining bonus).
    pub delta: f64,
}

/// Projection and assessment computed in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    pub levers: NegotiationLevers,
    pub projection: OfferProjection,
    pub assessment: RiskAssessment,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Score the levers against the context.
///
/// Total: a missing median skips the benchmark rules instead of failing.
pub fn assess(ctx: &CompensationContext, levers: &NegotiationLevers) -> RiskAssessment {
    let new_base = scaled(ctx.base, levers.base_increase_pct);
    score(ctx, levers, new_base)
}

/// Project the revised figures for the levers.
pub fn project(ctx: &CompensationContext, levers: &NegotiationLevers) -> OfferProjection {
    let new_base = scaled(ctx.base, levers.base_increase_pct);
    let new_bonus = scaled(ctx.bonus, levers.bonus_increase_pct);
    let new_ctc = new_base + new_bonus + ctx.joining_bonus;
    OfferProjection {
        new_base,
        new_bonus,
        new_ctc,
        delta: new_ctc - ctx.current_ctc(),
    }
}

/// Projection plus assessment, sharing the revised base between them.
pub fn simulate(ctx: &CompensationContext, levers: &NegotiationLevers) -> Simulation {
    let projection = project(ctx, levers);
    let assessment = score(ctx, levers, projection.new_base);
    Simulation {
        levers: *levers,
        projection,
        assessment,
    }
}

/// Number of levers in play. A joining bonus in the offer always counts.
pub fn active_lever_count(ctx: &CompensationContext, levers: &NegotiationLevers) -> u32 {
    u32::from(levers.base_increase_pct != 0)
        + u32::from(levers.bonus_increase_pct != 0)
        + u32::from(levers.level_up)
        + u32::from(ctx.joining_bonus > 0.0)
}

fn score(ctx: &CompensationContext, levers: &NegotiationLevers, new_base: f64) -> RiskAssessment {
    let mut points = 0;
    let mut reasons = Vec::new();

    if let Some(p50) = ctx.p50 {
        let cap = if ctx.base >= p50 {
            CAP_AT_OR_ABOVE_MEDIAN
        } else {
            CAP_BELOW_MEDIAN
        };
        if f64::from(levers.base_increase_pct) / 100.0 > cap {
            points += CAP_POINTS;
            reasons.push(format!("Base ask > {:.0}% cap", cap * 100.0));
        }

        // No P75 means the comparison cannot hold.
        if ctx.p75.is_some_and(|p75| new_base > p75 * P75_TOLERANCE) {
            points += ABOVE_P75_POINTS;
            reasons.push("Above P75".to_string());
        }

        if levers.level_up && ctx.base < p50 {
            points += LEVEL_UP_POINTS;
            reasons.push("Level up while below median".to_string());
        }
    }

    if active_lever_count(ctx, levers) > MAX_LEVERS {
        points += LEVER_COUNT_POINTS;
        reasons.push(format!("Too many levers (>{MAX_LEVERS})"));
    }

    RiskAssessment {
        score: points,
        tier: RiskTier::from_score(points),
        reasons,
    }
}

fn scaled(amount: f64, pct: i32) -> f64 {
    amount * (1.0 + f64::from(pct) / 100.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(base: f64, bonus: f64, jb: f64, p50: Option<f64>, p75: Option<f64>) -> CompensationContext {
        CompensationContext {
            base,
            bonus,
            joining_bonus: jb,
            p50,
            p75,
            ..Default::default()
        }
    }

    fn levers(base: i32, bonus: i32, level_up: bool) -> NegotiationLevers {
        NegotiationLevers {
            base_increase_pct: base,
            bonus_increase_pct: bonus,
            level_up,
        }
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(RiskTier::from_score(0), RiskTier::Low);
        assert_eq!(RiskTier::from_score(1), RiskTier::Low);
        assert_eq!(RiskTier::from_score(2), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(3), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(4), RiskTier::High);
        assert_eq!(RiskTier::from_score(7), RiskTier::High);
    }

    #[test]
    fn above_median_cap_and_p75() {
        let result = assess(&ctx(10.0, 2.0, 0.0, Some(10.0), Some(12.0)), &levers(30, 0, false));
        assert_eq!(result.score, 3);
        assert_eq!(result.tier, RiskTier::Medium);
        assert_eq!(result.reasons, vec!["Base ask > 15% cap", "Above P75"]);
    }

    #[test]
    fn premature_level_up() {
        let result = assess(&ctx(8.0, 1.0, 0.0, Some(10.0), Some(12.0)), &levers(0, 0, true));
        assert_eq!(result.score, 2);
        assert_eq!(result.tier, RiskTier::Medium);
        assert_eq!(result.reasons, vec!["Level up while below median"]);
    }

    #[test]
    fn below_median_uses_wider_cap() {
        let c = ctx(8.0, 1.0, 0.0, Some(10.0), Some(12.0));
        assert!(assess(&c, &levers(25, 0, false)).reasons.is_empty());

        let result = assess(&c, &levers(26, 0, false));
        assert_eq!(result.reasons, vec!["Base ask > 25% cap"]);
        assert_eq!(result.score, 2);
    }

    #[test]
    fn ask_exactly_at_cap_is_not_flagged() {
        let result = assess(&ctx(10.0, 0.0, 0.0, Some(10.0), Some(20.0)), &levers(15, 0, false));
        assert_eq!(result.score, 0);
        assert_eq!(result.tier, RiskTier::Low);
    }

    #[test]
    fn above_p75_alone_is_low() {
        // 8 * 1.1 = 8.8 > 8 * 1.05; ask is under the 15% cap
        let result = assess(&ctx(8.0, 0.0, 0.0, Some(8.0), Some(8.0)), &levers(10, 0, false));
        assert_eq!(result.reasons, vec!["Above P75"]);
        assert_eq!(result.score, 1);
        assert_eq!(result.tier, RiskTier::Low);
    }

    #[test]
    fn missing_median_skips_benchmark_rules() {
        let result = assess(&ctx(8.0, 1.0, 0.0, None, Some(5.0)), &levers(60, 0, true));
        assert_eq!(result.score, 0);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn missing_p75_skips_only_p75_rule() {
        let result = assess(&ctx(10.0, 0.0, 0.0, Some(10.0), None), &levers(30, 0, false));
        assert_eq!(result.reasons, vec!["Base ask > 15% cap"]);
    }

    #[test]
    fn lever_count_penalty_without_benchmarks() {
        let result = assess(&ctx(10.0, 2.0, 1.0, None, None), &levers(5, 5, true));
        assert_eq!(result.score, 2);
        assert_eq!(result.reasons, vec!["Too many levers (>2)"]);
    }

    #[test]
    fn lever_count_penalty_with_benchmarks() {
        let c = ctx(10.0, 2.0, 1.0, Some(10.0), Some(12.0));
        assert_eq!(active_lever_count(&c, &levers(5, 5, true)), 4);
        let result = assess(&c, &levers(5, 5, true));
        assert_eq!(result.score, 2);
        assert_eq!(result.reasons, vec!["Too many levers (>2)"]);
    }

    #[test]
    fn joining_bonus_counts_as_lever() {
        let c = ctx(10.0, 2.0, 1.0, None, None);
        assert_eq!(active_lever_count(&c, &levers(0, 0, false)), 1);
        // base + bonus + joining bonus = 3 > 2
        assert_eq!(assess(&c, &levers(5, 5, false)).score, 2);
        // two levers without joining bonus stay under the limit
        let no_jb = ctx(10.0, 2.0, 0.0, None, None);
        assert_eq!(assess(&no_jb, &levers(5, 5, false)).score, 0);
    }

    #[test]
    fn negative_ask_counts_as_lever() {
        let c = ctx(10.0, 2.0, 0.0, None, None);
        assert_eq!(active_lever_count(&c, &levers(-5, 0, false)), 1);
    }

    #[test]
    fn every_rule_fires_in_order() {
        let c = ctx(8.0, 1.0, 1.0, Some(10.0), Some(10.0));
        let result = assess(&c, &levers(40, 10, true));
        assert_eq!(
            result.reasons,
            vec![
                "Base ask > 25% cap",
                "Above P75",
                "Level up while below median",
                "Too many levers (>2)",
            ]
        );
        assert_eq!(result.score, 7);
        assert_eq!(result.tier, RiskTier::High);
        assert_eq!(
            result.summary(),
            "Base ask > 25% cap • Above P75 • Level up while below median • Too many levers (>2)"
        );
    }

    #[test]
    fn projection_figures() {
        let c = ctx(10.0, 2.0, 1.0, None, None);
        let p = project(&c, &levers(10, 50, false));
        assert!((p.new_base - 11.0).abs() < 1e-9);
        assert!((p.new_bonus - 3.0).abs() < 1e-9);
        assert!((p.new_ctc - 15.0).abs() < 1e-9);
        assert!((p.delta - 2.0).abs() < 1e-9);
    }

    #[test]
    fn negative_ask_gives_negative_delta() {
        let p = project(&ctx(10.0, 0.0, 0.0, None, None), &levers(-10, 0, false));
        assert!((p.delta + 1.0).abs() < 1e-9);
    }

    #[test]
    fn simulate_matches_separate_calls() {
        let c = ctx(10.0, 2.0, 0.0, Some(10.0), Some(12.0));
        let l = levers(30, 0, false);
        let sim = simulate(&c, &l);
        assert_eq!(sim.assessment, assess(&c, &l));
        assert_eq!(sim.projection, project(&c, &l));
        assert_eq!(sim.levers, l);
    }
}
