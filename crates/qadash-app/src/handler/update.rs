//! Main update function - handles state transitions (TEA pattern)

use qadash_core::prelude::*;
use qadash_core::DateRange;

use crate::message::Message;
use crate::state::{AppPhase, AppState, UiMode};

use super::{explorer, keys::handle_key, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Tick => UpdateResult::none(),

        Message::Quit => {
            state.phase = AppPhase::Quitting;
            state.stop_all_polling();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Navigation
        // ─────────────────────────────────────────────────────────
        Message::SwitchView(view) => explorer::handle_switch_view(state, view),
        Message::NextView => {
            let next = state.active_kind().next();
            explorer::handle_switch_view(state, next)
        }
        Message::PrevView => {
            let prev = state.active_kind().prev();
            explorer::handle_switch_view(state, prev)
        }
        Message::OpenRunResults { run_id } => explorer::handle_open_run_results(state, run_id),
        Message::OpenSelectedRun => explorer::handle_open_selected_run(state),
        Message::ClearScope => explorer::handle_clear_scope(state),

        // ─────────────────────────────────────────────────────────
        // Loading
        // ─────────────────────────────────────────────────────────
        Message::Load { view } => explorer::handle_load(state, view),
        Message::CollectionLoaded {
            view,
            token,
            result,
        } => explorer::handle_collection_loaded(state, view, token, result),
        Message::DetailLoaded { view, id, result } => {
            explorer::handle_detail_loaded(state, view, &id, result)
        }
        Message::DismissError => {
            state.active_explorer_mut().dismiss_error();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Explorer interaction
        // ─────────────────────────────────────────────────────────
        Message::CursorUp => {
            state.active_explorer_mut().cursor_up();
            UpdateResult::none()
        }
        Message::CursorDown => {
            state.active_explorer_mut().cursor_down();
            UpdateResult::none()
        }
        Message::NextPage => {
            state.active_explorer_mut().next_page();
            UpdateResult::none()
        }
        Message::PrevPage => {
            state.active_explorer_mut().prev_page();
            UpdateResult::none()
        }
        Message::FirstPage => {
            state.active_explorer_mut().first_page();
            UpdateResult::none()
        }
        Message::LastPage => {
            state.active_explorer_mut().last_page();
            UpdateResult::none()
        }
        Message::ToggleExpand => explorer::handle_toggle_expand(state),
        Message::SetSearch(text) => {
            state.active_explorer_mut().set_search(text);
            UpdateResult::none()
        }
        Message::CycleStatusFilter => {
            state.active_explorer_mut().cycle_status_filter();
            UpdateResult::none()
        }
        Message::CycleFacetFilter => {
            state.active_explorer_mut().cycle_facet_filter();
            UpdateResult::none()
        }
        Message::SetDateRange(range) => {
            state.active_explorer_mut().set_date_range(range);
            UpdateResult::none()
        }
        Message::ClearFilters => {
            state.active_explorer_mut().clear_filters();
            UpdateResult::none()
        }
        Message::SortBy(key) => {
            state.active_explorer_mut().set_sort(&key);
            UpdateResult::none()
        }
        Message::NextSortColumn => {
            state.active_explorer_mut().cycle_sort_column(true);
            UpdateResult::none()
        }
        Message::PrevSortColumn => {
            state.active_explorer_mut().cycle_sort_column(false);
            UpdateResult::none()
        }
        Message::FlipSort => {
            let key = state.active_explorer().sort().key.clone();
            state.active_explorer_mut().set_sort(&key);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Text input
        // ─────────────────────────────────────────────────────────
        Message::StartSearchInput => {
            let current = state.active_explorer().criteria().text.clone();
            state.begin_input(UiMode::SearchInput, current);
            UpdateResult::none()
        }
        Message::StartDateInput => {
            let range = state.active_explorer().criteria().date_range;
            let current = if range.is_unbounded() {
                String::new()
            } else {
                range.to_string()
            };
            state.begin_input(UiMode::DateInput, current);
            UpdateResult::none()
        }
        Message::InputChar(c) => {
            state.input_buffer.push(c);
            state.input_error = None;
            UpdateResult::none()
        }
        Message::InputBackspace => {
            state.input_buffer.pop();
            state.input_error = None;
            UpdateResult::none()
        }
        Message::SubmitInput => handle_submit_input(state),
        Message::CancelInput => {
            state.end_input();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Polling
        // ─────────────────────────────────────────────────────────
        Message::TogglePolling => explorer::handle_toggle_polling(state),
        Message::PollTick { view } => explorer::handle_poll_tick(state, view),

        // ─────────────────────────────────────────────────────────
        // Test runs
        // ─────────────────────────────────────────────────────────
        Message::StartTestRun => explorer::handle_start_test_run(state),
        Message::TestRunStarted { result } => explorer::handle_test_run_started(state, result),
    }
}

/// Commit the input buffer of the current input mode.
fn handle_submit_input(state: &mut AppState) -> UpdateResult {
    match state.ui_mode {
        UiMode::SearchInput => {
            let text = std::mem::take(&mut state.input_buffer);
            state.end_input();
            UpdateResult::message(Message::SetSearch(text.trim().to_string()))
        }
        UiMode::DateInput => match DateRange::parse(&state.input_buffer) {
            Ok(range) => {
                state.end_input();
                UpdateResult::message(Message::SetDateRange(range))
            }
            Err(e) => {
                warn!("rejected date range input: {}", e);
                state.input_error = Some(e.to_string());
                UpdateResult::none()
            }
        },
        UiMode::Normal => UpdateResult::none(),
    }
}

