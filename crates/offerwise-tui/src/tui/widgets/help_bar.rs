// Help bar widget: keyboard hints for the current tab and mode.

use offerwise_app::protocol::TabId;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the help bar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        hint_text(state),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// Shortcut hints for the active mode, then the active tab.
pub fn hint_text(state: &ViewState) -> &'static str {
    if state.confirm_quit {
        " y:Quit | n:Cancel"
    } else if state.entry_mode {
        " Type a value | Enter:Apply | Esc:Cancel"
    } else if state.edit_mode {
        " Type to edit | Enter:Newline | Backspace:Delete | Esc:Done"
    } else if !state.has_offer {
        " q:Quit | 1-2:Tabs"
    } else {
        match state.active_tab {
            TabId::Simulator => {
                " q:Quit | 1-2:Tabs | ↑↓:Lever | ←→:Adjust | e:Type value | u:Level ask"
            }
            TabId::Script => " q:Quit | 1-2:Tabs | i:Edit | g:Regenerate | c:Copy | ↑↓:Scroll",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
