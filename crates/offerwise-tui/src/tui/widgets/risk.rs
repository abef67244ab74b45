// Risk badge: tier pill coloured by severity, score, and the reasons that
// fired, joined with " • ".

use offerwise_core::risk::{RiskAssessment, RiskTier};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Badge colour for a tier: Low green, Medium yellow, High red.
pub fn tier_color(tier: RiskTier) -> Color {
    match tier {
        RiskTier::Low => Color::Green,
        RiskTier::Medium => Color::Yellow,
        RiskTier::High => Color::Red,
    }
}

/// The tier rendered as a filled pill, e.g. " Medium ".
pub fn badge_span(tier: RiskTier) -> Span<'static> {
    Span::styled(
        format!(" {} ", tier.label()),
        Style::default()
            .fg(Color::Black)
            .bg(tier_color(tier))
            .add_modifier(Modifier::BOLD),
    )
}

/// Badge line followed by the reasons line.
pub fn build_risk_lines(assessment: &RiskAssessment) -> Vec<Line<'static>> {
    let badge = Line::from(vec![
        Span::styled(" Risk:      ", Style::default().fg(Color::Gray)),
        badge_span(assessment.tier),
        Span::styled(
            format!("  score {}", assessment.score),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let reasons = if assessment.reasons.is_empty() {
        Line::from(Span::styled(
            " No risk flags",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(Span::styled(
            format!(" {}", assessment.summary()),
            Style::default().fg(tier_color(assessment.tier)),
        ))
    };

    vec![badge, reasons]
}
