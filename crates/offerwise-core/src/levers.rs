// Negotiation levers and the sanitization step that produces them.
//
// Raw presentation input (slider text, typed values, the level-ask select)
// is coerced here, once, so the scorer can assume well-formed integers.

/// The candidate's asks for one recalculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NegotiationLevers {
    /// Requested base increase in whole percent. May be negative.
    pub base_increase_pct: i32,
    /// Requested bonus increase in whole percent.
    pub bonus_increase_pct: i32,
    /// Whether a level bump is requested.
    pub level_up: bool,
}

/// Level ask select: keep the offered level or ask for one up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LevelAsk {
    #[default]
    Same,
    Up,
}

impl LevelAsk {
    /// Parse the select value; anything other than `up` is `Same`.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("up") {
            LevelAsk::Up
        } else {
            LevelAsk::Same
        }
    }

    /// Select value accepted by [`LevelAsk::parse`].
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelAsk::Same => "same",
            LevelAsk::Up => "up",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LevelAsk::Same => "Same level",
            LevelAsk::Up => "Level up",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            LevelAsk::Same => LevelAsk::Up,
            LevelAsk::Up => LevelAsk::Same,
        }
    }
}

/// Unparsed lever input as the presentation layer holds it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawLevers {
    pub base_pct: String,
    pub bonus_pct: String,
    pub level_ask: String,
}

impl RawLevers {
    /// Coerce raw input into levers. Unparseable percentages become 0.
    pub fn sanitize(&self) -> NegotiationLevers {
        NegotiationLevers {
            base_increase_pct: parse_int_or_zero(&self.base_pct),
            bonus_increase_pct: parse_int_or_zero(&self.bonus_pct),
            level_up: LevelAsk::parse(&self.level_ask) == LevelAsk::Up,
        }
    }
}

/// Parse the leading integer of `input` (optional sign, then digits),
/// ignoring trailing text. Returns 0 when no digits lead the input or the
/// value does not fit in an `i32`.
///
/// `"12"` → 12, `" -5% "` → -5, `"7.9"` → 7, `"abc"` → 0, `""` → 0.
pub fn parse_int_or_zero(input: &str) -> i32 {
    let s = input.trim();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1i64, &s[1..]),
        Some(b'+') => (1i64, &s[1..]),
        _ => (1i64, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return 0;
    }
    rest[..digits_len]
        .parse::<i64>()
        .ok()
        .and_then(|v| i32::try_from(sign * v).ok())
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
