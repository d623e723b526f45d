//! Key event handlers for different UI modes

use qadash_core::ViewKind;

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    // Force quit works everywhere
    if key.is_interrupt() {
        return Some(Message::Quit);
    }

    match state.ui_mode {
        UiMode::Normal => handle_key_normal(state, key),
        UiMode::SearchInput | UiMode::DateInput => handle_key_text_input(key),
    }
}

/// Handle key events while typing a search query or date range
fn handle_key_text_input(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::CancelInput),
        InputKey::Enter => Some(Message::SubmitInput),
        InputKey::Backspace => Some(Message::InputBackspace),
        InputKey::Char(c) => Some(Message::InputChar(c)),
        _ => None,
    }
}

/// Handle key events in normal mode
fn handle_key_normal(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') => Some(Message::Quit),

        // ─────────────────────────────────────────────────────────
        // Views
        // ─────────────────────────────────────────────────────────
        InputKey::Tab => Some(Message::NextView),
        InputKey::BackTab => Some(Message::PrevView),
        InputKey::Char('1') => Some(Message::SwitchView(ViewKind::Results)),
        InputKey::Char('2') => Some(Message::SwitchView(ViewKind::Runs)),
        InputKey::Char('3') => Some(Message::SwitchView(ViewKind::Devices)),
        InputKey::Char('o') => Some(Message::OpenSelectedRun),
        InputKey::Char('u') | InputKey::Backspace => Some(Message::ClearScope),

        // ─────────────────────────────────────────────────────────
        // Rows and pages
        // ─────────────────────────────────────────────────────────
        InputKey::Char('k') | InputKey::Up => Some(Message::CursorUp),
        InputKey::Char('j') | InputKey::Down => Some(Message::CursorDown),
        InputKey::Char('n') | InputKey::Right | InputKey::PageDown => Some(Message::NextPage),
        InputKey::Char('p') | InputKey::Left | InputKey::PageUp => Some(Message::PrevPage),
        InputKey::Char('g') | InputKey::Home => Some(Message::FirstPage),
        InputKey::Char('G') | InputKey::End => Some(Message::LastPage),
        InputKey::Enter | InputKey::Char(' ') => Some(Message::ToggleExpand),

        // ─────────────────────────────────────────────────────────
        // Filters and sort
        // ─────────────────────────────────────────────────────────
        InputKey::Char('/') => Some(Message::StartSearchInput),
        InputKey::Char('d') => Some(Message::StartDateInput),
        InputKey::Char('s') => Some(Message::CycleStatusFilter),
        InputKey::Char('f') => Some(Message::CycleFacetFilter),
        InputKey::Char('c') => Some(Message::ClearFilters),
        InputKey::Char('>') => Some(Message::NextSortColumn),
        InputKey::Char('<') => Some(Message::PrevSortColumn),
        InputKey::Char('i') => Some(Message::FlipSort),

        // ─────────────────────────────────────────────────────────
        // Loading, polling, test runs
        // ─────────────────────────────────────────────────────────
        InputKey::Char('r') => Some(Message::Load {
            view: state.active_kind(),
        }),
        InputKey::Char('x') | InputKey::Esc => {
            if state.active_explorer().last_error().is_some() {
                Some(Message::DismissError)
            } else {
                None
            }
        }
        InputKey::Char('P') => Some(Message::TogglePolling),
        InputKey::Char('T') => Some(Message::StartTestRun),

        _ => None,
    }
}
