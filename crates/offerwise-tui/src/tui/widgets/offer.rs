// Offer widget: the configured offer as key-value rows.
//
// Role, Level, City, Base, Bonus, Joining, Current CTC

use offerwise_app::protocol::OfferSummary;
use offerwise_core::format::format_lakhs;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the offer summary into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let lines = match &state.offer {
        Some(offer) => build_offer_lines(offer),
        None => vec![Line::from(Span::styled(
            " Loading offer...",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Offer"));
    frame.render_widget(paragraph, area);
}

fn row(label: &'static str, value: String, value_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::Gray)),
        Span::styled(value, value_style),
    ])
}

/// Build the offer rows.
pub fn build_offer_lines(offer: &OfferSummary) -> Vec<Line<'static>> {
    let plain = Style::default().fg(Color::White);
    vec![
        row(" Role:     ", offer.role.clone(), plain),
        row(" Level:    ", offer.level.clone(), plain),
        row(" City:     ", offer.city.clone(), plain),
        row(" Base:     ", format_lakhs(offer.base), plain),
        row(" Bonus:    ", format_lakhs(offer.bonus), plain),
        row(" Joining:  ", format_lakhs(offer.joining_bonus), plain),
        row(
            " CTC:      ",
            format_lakhs(offer.current_ctc),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]
}
