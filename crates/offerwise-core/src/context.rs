// Compensation context: the read-only offer record every computation reads.
//
// Built once at startup from the offer config and the benchmark band lookup,
// then shared by reference with the scorer and the draft generator.

use thiserror::Error;

use crate::bands::Band;
use crate::config::OfferConfig;

/// Role shown in the email draft when none is supplied.
pub const DEFAULT_ROLE: &str = "Analyst";

/// City shown in the email draft when none is supplied.
pub const DEFAULT_CITY: &str = "Bengaluru";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum ContextError {
    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("`{field}` must be a finite number")]
    NonFinite { field: &'static str },

    #[error("p75 ({p75}) must not be below p50 ({p50})")]
    PercentileOrder { p50: f64, p75: f64 },
}

// ---------------------------------------------------------------------------
// CompensationContext
// ---------------------------------------------------------------------------

/// Current offer plus optional market benchmarks. Amounts are in lakhs.
///
/// Fields are public so callers (and tests) can build partial records; the
/// scoring and drafting functions accept any value. Use [`CompensationContext::new`]
/// when the record should be checked against the offer invariants.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompensationContext {
    pub base: f64,
    pub bonus: f64,
    pub joining_bonus: f64,
    /// Median market base for the role/city. `None` disables benchmark rules.
    pub p50: Option<f64>,
    /// 75th percentile market base.
    pub p75: Option<f64>,
    pub role: Option<String>,
    pub city: Option<String>,
    pub level: Option<String>,
}

impl CompensationContext {
    /// Build a validated context from plain amounts and optional percentiles.
    pub fn new(
        base: f64,
        bonus: f64,
        joining_bonus: f64,
        p50: Option<f64>,
        p75: Option<f64>,
    ) -> Result<Self, ContextError> {
        let ctx = CompensationContext {
            base,
            bonus,
            joining_bonus,
            p50,
            p75,
            ..Default::default()
        };
        ctx.validate()?;
        Ok(ctx)
    }

    /// Assemble the context from the offer intake and its resolved market band.
    /// See [`crate::bands::resolve_band`].
    pub fn from_offer(offer: &OfferConfig, band: &Band) -> Result<Self, ContextError> {
        let ctx = CompensationContext {
            base: offer.base,
            bonus: offer.bonus,
            joining_bonus: offer.joining_bonus,
            p50: Some(band.p50),
            p75: Some(band.p75),
            role: Some(offer.role.clone()),
            city: Some(offer.city.clone()),
            level: Some(offer.level.clone()),
        };
        ctx.validate()?;
        Ok(ctx)
    }

    /// Check the offer invariants: finite, non-negative amounts and ordered
    /// percentiles.
    pub fn validate(&self) -> Result<(), ContextError> {
        let amounts: [(&'static str, f64); 3] = [
            ("base", self.base),
            ("bonus", self.bonus),
            ("joining_bonus", self.joining_bonus),
        ];
        for (field, value) in amounts {
            check_amount(field, value)?;
        }
        if let Some(p50) = self.p50 {
            check_amount("p50", p50)?;
        }
        if let Some(p75) = self.p75 {
            check_amount("p75", p75)?;
        }
        if let (Some(p50), Some(p75)) = (self.p50, self.p75) {
            if p75 < p50 {
                return Err(ContextError::PercentileOrder { p50, p75 });
            }
        }
        Ok(())
    }

    /// Total current compensation: base + bonus + joining bonus.
    pub fn current_ctc(&self) -> f64 {
        self.base + self.bonus + self.joining_bonus
    }

    /// Whether any compensation has been entered at all. The simulator is
    /// meaningless on an all-zero offer.
    pub fn has_offer(&self) -> bool {
        self.current_ctc() != 0.0
    }

    pub fn role_or_default(&self) -> &str {
        non_empty(self.role.as_deref()).unwrap_or(DEFAULT_ROLE)
    }

    /// City as given, trimmed; blank or absent falls back to Bengaluru.
    pub fn city_or_default(&self) -> &str {
        non_empty(self.city.as_deref()).unwrap_or(DEFAULT_CITY)
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn check_amount(field: &'static str, value: f64) -> Result<(), ContextError> {
    if !value.is_finite() {
        return Err(ContextError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(ContextError::Negative { field, value });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
