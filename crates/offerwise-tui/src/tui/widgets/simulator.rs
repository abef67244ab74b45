// Simulator panel: lever sliders, projected CTC and delta, risk badge.
//
// Rows:
// ▶ Base increase    ──────●──────────  12%
//   Bonus increase   ●────────────────   0%
//   Level ask        Same level
//
//   New CTC          ₹ 13.44 L
//   Delta            +₹ 1.44 L
//   Risk             [ Medium ] score 3

use offerwise_core::format::{format_delta, format_lakhs, format_pct};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::{risk, SETUP_PROMPT};
use crate::tui::{LeverField, ViewState};

/// Number of cells in a slider track.
const SLIDER_WIDTH: usize = 21;

/// Render the simulator panel into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default().borders(Borders::ALL).title("Simulator");

    let paragraph = if !state.has_offer {
        Paragraph::new(SETUP_PROMPT)
            .style(Style::default().fg(Color::Yellow))
            .wrap(Wrap { trim: true })
    } else {
        Paragraph::new(build_simulator_lines(state))
    };

    frame.render_widget(paragraph.block(block), area);
}

/// Lever rows, then projected figures and the risk badge.
pub fn build_simulator_lines(state: &ViewState) -> Vec<Line<'static>> {
    let bounds = state.bounds;
    let mut lines = vec![
        lever_line(
            state,
            LeverField::BasePct,
            slider_value(state.base_pct, bounds.base_pct_min, bounds.base_pct_max),
        ),
        lever_line(
            state,
            LeverField::BonusPct,
            slider_value(state.bonus_pct, bounds.bonus_pct_min, bounds.bonus_pct_max),
        ),
        lever_line(state, LeverField::LevelAsk, state.level_ask.label().to_string()),
        Line::default(),
    ];

    let Some(simulation) = &state.simulation else {
        lines.push(Line::from(Span::styled(
            "   Calculating...",
            Style::default().fg(Color::DarkGray),
        )));
        return lines;
    };

    let projection = simulation.projection;
    lines.push(Line::from(vec![
        Span::styled("   New CTC          ", Style::default().fg(Color::Gray)),
        Span::styled(
            format_lakhs(projection.new_ctc),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("   Delta            ", Style::default().fg(Color::Gray)),
        Span::styled(
            format_delta(projection.delta),
            Style::default().fg(delta_color(projection.delta)),
        ),
    ]));
    lines.push(Line::default());
    lines.extend(risk::build_risk_lines(&simulation.assessment));

    lines
}

/// One lever row with the focus marker. While typing, the focused row shows
/// the entry text instead of its value.
fn lever_line(state: &ViewState, field: LeverField, value: String) -> Line<'static> {
    let focused = state.focus == field;
    let marker = if focused { " ▶ " } else { "   " };
    let label_style = if focused {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let value_span = if focused && state.entry_mode {
        Span::styled(
            format!("› {}_", state.entry_text),
            Style::default().fg(Color::Yellow),
        )
    } else {
        Span::styled(value, Style::default().fg(Color::White))
    };

    Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Cyan)),
        Span::styled(format!("{:<17}", field.label()), label_style),
        value_span,
    ])
}

fn slider_value(value: i32, min: i32, max: i32) -> String {
    format!("{}  {:>4}", slider_track(value, min, max, SLIDER_WIDTH), format_pct(value))
}

/// A text slider track of `width` cells with a knob at `value`'s position
/// between `min` and `max`.
pub fn slider_track(value: i32, min: i32, max: i32, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let span = i64::from(max) - i64::from(min);
    let pos = if span <= 0 {
        0
    } else {
        let offset = (i64::from(value) - i64::from(min)).clamp(0, span);
        (offset * (width as i64 - 1) / span) as usize
    };
    (0..width)
        .map(|i| if i == pos { '●' } else { '─' })
        .collect()
}

/// Green for gains, red for losses.
pub fn delta_color(delta: f64) -> Color {
    if delta >= 0.0 {
        Color::Green
    } else {
        Color::Red
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
