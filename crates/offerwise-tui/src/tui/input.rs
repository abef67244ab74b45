// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app orchestrator, or into local ViewState mutations (tab switching, lever
// focus, draft editing).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use offerwise_app::protocol::{TabId, UserCommand};

use super::ViewState;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator (a lever change, draft regeneration, copy, quit). Returns
/// `None` when the key press was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }
    if view_state.entry_mode {
        return handle_entry_mode(key_event, view_state);
    }
    if view_state.edit_mode {
        return handle_edit_mode(key_event, view_state);
    }

    match key_event.code {
        // Tab switching
        KeyCode::Char('1') => {
            view_state.active_tab = TabId::Simulator;
            None
        }
        KeyCode::Char('2') => {
            view_state.active_tab = TabId::Script;
            None
        }
        KeyCode::Tab => {
            view_state.active_tab = match view_state.active_tab {
                TabId::Simulator => TabId::Script,
                TabId::Script => TabId::Simulator,
            };
            None
        }

        // Quit: enter confirmation mode instead of quitting immediately
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }

        // Without an offer both panels show the setup prompt.
        _ if !view_state.has_offer => None,

        _ => match view_state.active_tab {
            TabId::Simulator => handle_simulator_key(key_event, view_state),
            TabId::Script => handle_script_key(key_event, view_state),
        },
    }
}

/// Lever focus, adjustment and typed entry on the Simulator tab.
fn handle_simulator_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.focus = view_state.focus.prev();
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.focus = view_state.focus.next();
            None
        }
        KeyCode::Left | KeyCode::Char('h') => adjust(view_state, -1),
        KeyCode::Right | KeyCode::Char('l') => adjust(view_state, 1),
        KeyCode::Char('u') => {
            view_state.level_ask = view_state.level_ask.toggled();
            Some(UserCommand::Recalculate(view_state.levers()))
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            view_state.entry_mode = true;
            view_state.entry_text.clear();
            None
        }
        _ => None,
    }
}

fn adjust(view_state: &mut ViewState, direction: i32) -> Option<UserCommand> {
    if view_state.adjust_focused(direction) {
        Some(UserCommand::Recalculate(view_state.levers()))
    } else {
        None
    }
}

/// Draft actions on the Script tab.
fn handle_script_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('i') | KeyCode::Enter => {
            view_state.edit_mode = true;
            None
        }
        KeyCode::Char('g') => Some(UserCommand::RegenerateDraft),
        KeyCode::Char('c') => Some(UserCommand::CopyDraft(view_state.draft.clone())),
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.script_scroll = view_state.script_scroll.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.script_scroll = view_state.script_scroll.saturating_add(1);
            None
        }
        _ => None,
    }
}

/// Handle key events while the quit confirmation dialog is showing.
///
/// - `y` or `q` confirms quit
/// - `n` or `Esc` cancels
/// - All other keys are blocked
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

/// Handle key events while typing a lever value.
///
/// - Printable characters are appended to the entry text
/// - Backspace removes the last character
/// - Enter applies the sanitized value
/// - Esc discards the entry
fn handle_entry_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Enter => Some(UserCommand::Recalculate(view_state.commit_entry())),
        KeyCode::Esc => {
            view_state.entry_mode = false;
            view_state.entry_text.clear();
            None
        }
        KeyCode::Backspace => {
            view_state.entry_text.pop();
            None
        }
        KeyCode::Char(c) => {
            view_state.entry_text.push(c);
            None
        }
        _ => None,
    }
}

/// Handle key events while editing the draft. Text is appended at the end.
fn handle_edit_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.edit_mode = false;
            None
        }
        KeyCode::Enter => {
            view_state.draft.push('\n');
            None
        }
        KeyCode::Backspace => {
            view_state.draft.pop();
            None
        }
        KeyCode::Char(c) => {
            view_state.draft.push(c);
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
