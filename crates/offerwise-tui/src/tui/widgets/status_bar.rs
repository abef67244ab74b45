// Status bar widget: app title, offer headline, tab indicator, mode.

use offerwise_app::protocol::TabId;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [title] [role · level · city] | [tab bar] [mode]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::styled(
        " OfferWise ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    spans.push(Span::styled(
        offer_headline(state),
        Style::default().fg(Color::White),
    ));
    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
    spans.extend(tab_spans(state.active_tab));

    if let Some(mode) = mode_label(state) {
        spans.push(Span::styled(
            mode,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// "AE · L5 · BLR", or a placeholder before the snapshot arrives.
pub fn offer_headline(state: &ViewState) -> String {
    match &state.offer {
        Some(offer) => format!("{} · {} · {}", offer.role, offer.level, offer.city),
        None => "Loading...".to_string(),
    }
}

/// Build tab indicator spans with the active tab highlighted.
/// E.g. "[1:Simulator] [2:Script]"
pub fn tab_spans(active: TabId) -> Vec<Span<'static>> {
    let tabs = [(TabId::Simulator, "1:Simulator"), (TabId::Script, "2:Script")];

    let mut spans = Vec::new();
    for (tab_id, label) in tabs {
        let style = if tab_id == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}]", label), style));
        spans.push(Span::raw(" "));
    }
    spans
}

/// Indicator for the modal input states.
pub fn mode_label(state: &ViewState) -> Option<&'static str> {
    if state.entry_mode {
        Some("-- ENTRY --")
    } else if state.edit_mode {
        Some("-- EDIT --")
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
