// Script panel: the editable negotiation email and the copy status.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::SETUP_PROMPT;
use crate::tui::ViewState;

/// Render the script panel into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    if !state.has_offer {
        let paragraph = Paragraph::new(SETUP_PROMPT)
            .style(Style::default().fg(Color::Yellow))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Script"));
        frame.render_widget(paragraph, area);
        return;
    }

    let [editor_area, status_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

    let border_style = if state.edit_mode {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let title = if state.edit_mode {
        "Script (editing)"
    } else {
        "Script"
    };

    let lines = draft_lines(&state.draft, state.edit_mode);
    let visible_rows = (editor_area.height as usize).saturating_sub(2);
    let inner_width = (editor_area.width as usize).saturating_sub(2);
    let max_offset = wrapped_row_count(&lines, inner_width).saturating_sub(visible_rows);
    let scroll = state.script_scroll.min(max_offset) as u16;

    let editor = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(editor, editor_area);

    frame.render_widget(Paragraph::new(status_line(state)), status_area);
}

/// Draft text split into lines, with a cursor after the last character
/// while editing.
pub fn draft_lines(draft: &str, editing: bool) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = draft
        .split('\n')
        .map(|l| Line::from(l.to_string()))
        .collect();
    if editing {
        if let Some(last) = lines.last_mut() {
            last.spans.push(Span::styled(
                "█",
                Style::default().fg(Color::Yellow),
            ));
        }
    }
    lines
}

/// Rows the lines occupy once word-wrapped to `width` columns.
pub fn wrapped_row_count(lines: &[Line], width: usize) -> usize {
    if width == 0 {
        return lines.len();
    }
    lines
        .iter()
        .map(|line| {
            let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
            wrapped_rows(&text, width)
        })
        .sum()
}

/// Greedy word wrap; words wider than the row are broken across rows.
fn wrapped_rows(text: &str, width: usize) -> usize {
    let mut rows = 1;
    let mut col = 0;
    for word in text.split(' ') {
        let w = Span::raw(word).width();
        let needed = if col == 0 { w } else { col + 1 + w };
        if needed <= width {
            col = needed;
            continue;
        }
        if col > 0 {
            rows += 1;
        }
        if w > width {
            rows += (w - 1) / width;
            col = w - (w - 1) / width * width;
        } else {
            col = w;
        }
    }
    rows
}

/// Copy status, or the character count when idle.
pub fn status_line(state: &ViewState) -> Line<'static> {
    match &state.copy_status {
        Some(status) => Line::from(Span::styled(
            format!(" {status}"),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(
            format!(" {} characters", state.draft.chars().count()),
            Style::default().fg(Color::DarkGray),
        )),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
