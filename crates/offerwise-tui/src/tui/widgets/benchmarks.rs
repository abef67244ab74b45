// Benchmarks widget: market P25/P50/P75 for the offer's role and city, and
// where the current base sits against them.

use offerwise_core::bands::Band;
use offerwise_core::format::format_lakhs;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the benchmark band into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let lines = match (&state.band, &state.offer) {
        (Some(band), Some(offer)) => build_band_lines(band, offer.base),
        _ => vec![Line::from(Span::styled(
            " No benchmarks",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Benchmarks"));
    frame.render_widget(paragraph, area);
}

/// Percentile rows plus a positioning line for `base`.
pub fn build_band_lines(band: &Band, base: f64) -> Vec<Line<'static>> {
    let row = |label: &'static str, value: f64| {
        Line::from(vec![
            Span::styled(label, Style::default().fg(Color::Gray)),
            Span::styled(format_lakhs(value), Style::default().fg(Color::White)),
        ])
    };

    let (position, color) = base_position(band, base);
    vec![
        row(" P25:      ", band.p25),
        row(" P50:      ", band.p50),
        row(" P75:      ", band.p75),
        Line::default(),
        Line::from(Span::styled(format!(" Base is {position}"), Style::default().fg(color))),
    ]
}

/// Where `base` sits in the band, with a display colour.
pub fn base_position(band: &Band, base: f64) -> (&'static str, Color) {
    if base < band.p25 {
        ("below P25", Color::Red)
    } else if base < band.p50 {
        ("below median", Color::Yellow)
    } else if base <= band.p75 {
        ("at or above median", Color::Green)
    } else {
        ("above P75", Color::Cyan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAND: Band = Band {
        p25: 8.0,
        p50: 10.0,
        p75: 12.0,
    };

    #[test]
    fn base_position_boundaries() {
        assert_eq!(base_position(&BAND, 7.9).0, "below P25");
        assert_eq!(base_position(&BAND, 8.0).0, "below median");
        assert_eq!(base_position(&BAND, 10.0).0, "at or above median");
        assert_eq!(base_position(&BAND, 12.0).0, "at or above median");
        assert_eq!(base_position(&BAND, 12.1).0, "above P75");
    }

    #[test]
    fn band_lines_layout() {
        let lines = build_band_lines(&BAND, 9.0);
        assert_eq!(lines.len(), 5);
        let p50: String = lines[1].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(p50, " P50:      ₹ 10.00 L");
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(40, 8);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState {
            band: Some(BAND),
            ..Default::default()
        };
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
