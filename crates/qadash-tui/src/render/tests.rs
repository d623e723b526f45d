//! Full-screen rendering tests

use super::*;
use crate::test_utils::TestTerminal;
use crate::widgets::EMPTY_STATE_TEXT;
use qadash_app::handler::{update, UpdateAction};
use qadash_app::Message;
use qadash_core::{Record, ViewKind};
use serde_json::{json, Value};

fn load(state: &mut AppState, view: ViewKind, result: Result<Vec<Value>, String>) {
    let token = match update(state, Message::Load { view }).action {
        Some(UpdateAction::FetchCollection { token, .. }) => token,
        other => panic!("expected FetchCollection, got {other:?}"),
    };
    let result = result.map(|values| values.into_iter().filter_map(Record::from_value).collect());
    update(
        state,
        Message::CollectionLoaded {
            view,
            token,
            result,
        },
    );
}

fn results() -> Vec<Value> {
    vec![
        json!({"id": 1, "status": "PASS", "name": "login", "duration": 1.0}),
        json!({"id": 2, "status": "FAIL", "name": "logout", "duration": 3.0}),
    ]
}

fn render(state: &AppState) -> TestTerminal {
    let mut term = TestTerminal::new();
    term.draw_with(|frame| view(frame, state));
    term
}

#[test]
fn test_initial_screen() {
    let state = AppState::new();
    let term = render(&state);
    assert!(term.buffer_contains("qadash"));
    assert!(term.buffer_contains("Test Results"));
    assert!(term.buffer_contains("Page 1/1"));
}

#[test]
fn test_loaded_results_screen() {
    let mut state = AppState::new();
    load(&mut state, ViewKind::Results, Ok(results()));
    let term = render(&state);

    assert!(term.buffer_contains("login"));
    assert!(term.buffer_contains("logout"));
    assert!(term.buffer_contains("Total 2"));
    assert!(term.buffer_contains("Rate 50.0%"));
    assert!(term.buffer_contains("2 records"));
}

#[test]
fn test_filtered_screen_updates_stats() {
    let mut state = AppState::new();
    load(&mut state, ViewKind::Results, Ok(results()));
    update(&mut state, Message::SetSearch("logout".into()));
    let term = render(&state);

    assert!(term.buffer_contains("Total 1"));
    assert!(term.buffer_contains("1 records of 2"));
    assert!(!term.buffer_contains("login "));
}

#[test]
fn test_empty_filter_result() {
    let mut state = AppState::new();
    load(&mut state, ViewKind::Results, Ok(results()));
    update(&mut state, Message::SetSearch("nothing like this".into()));
    let term = render(&state);

    assert!(term.buffer_contains(EMPTY_STATE_TEXT));
    assert!(term.buffer_contains("Rate 0.0%"));
}

#[test]
fn test_error_banner_over_previous_records() {
    let mut state = AppState::new();
    load(&mut state, ViewKind::Results, Ok(results()));
    load(
        &mut state,
        ViewKind::Results,
        Err("HTTP error 500: Internal Server Error".into()),
    );
    let term = render(&state);

    assert!(term.buffer_contains("HTTP error 500"));
    assert!(term.buffer_contains("logout"));
}

#[test]
fn test_search_input_prompt() {
    let mut state = AppState::new();
    update(&mut state, Message::StartSearchInput);
    update(&mut state, Message::InputChar('l'));
    let term = render(&state);
    assert!(term.buffer_contains("Search: l"));
}

#[test]
fn test_scoped_route_in_header() {
    let mut state = AppState::new();
    update(
        &mut state,
        Message::OpenRunResults {
            run_id: "HIS001".into(),
        },
    );
    let term = render(&state);
    assert!(term.buffer_contains("run HIS001"));
}

#[test]
fn test_small_terminal_no_panic() {
    let mut state = AppState::new();
    load(&mut state, ViewKind::Results, Ok(results()));
    let mut term = TestTerminal::with_size(20, 5);
    term.draw_with(|frame| view(frame, &state));
}
