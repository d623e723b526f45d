//! Explorer handlers: loading, cross-view navigation, expansion, polling
//! and test-run requests.

use chrono::Local;
use qadash_core::prelude::*;
use qadash_core::{LoadPhase, Record, RequestToken, ViewKind, ViewRoute};
use serde_json::Value;

use crate::message::Message;
use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

/// Field of a run record that scopes the results endpoint.
const RUN_SCOPE_FIELD: &str = "runId";

/// Issue a load for `view`. A load already in flight is superseded.
pub fn handle_load(state: &mut AppState, view: ViewKind) -> UpdateResult {
    let explorer = state.explorer_mut(view);
    let token = explorer.begin_load();
    let scope = explorer.scope().map(str::to_string);
    debug!(%view, %token, ?scope, "load requested");
    UpdateResult::action(UpdateAction::FetchCollection { view, token, scope })
}

pub fn handle_collection_loaded(
    state: &mut AppState,
    view: ViewKind,
    token: RequestToken,
    result: std::result::Result<Vec<Record>, String>,
) -> UpdateResult {
    state.explorer_mut(view).complete_load(token, result);
    UpdateResult::none()
}

/// Activate `view`, loading it on first visit.
pub fn handle_switch_view(state: &mut AppState, view: ViewKind) -> UpdateResult {
    let scope = state.explorer(view).scope().map(str::to_string);
    state.route = ViewRoute { view, scope };

    let explorer = state.explorer(view);
    if explorer.phase() == LoadPhase::Idle && !explorer.is_loading() {
        UpdateResult::message(Message::Load { view })
    } else {
        UpdateResult::none()
    }
}

/// Show the Results view scoped to one run.
pub fn handle_open_run_results(state: &mut AppState, run_id: String) -> UpdateResult {
    info!(run_id = %run_id, "opening run results");
    state
        .explorer_mut(ViewKind::Results)
        .set_scope(Some(run_id.clone()));
    state.route = ViewRoute::scoped(ViewKind::Results, run_id);
    UpdateResult::message(Message::Load {
        view: ViewKind::Results,
    })
}

pub fn handle_open_selected_run(state: &AppState) -> UpdateResult {
    if state.active_kind() != ViewKind::Runs {
        return UpdateResult::none();
    }
    let explorer = state.active_explorer();
    let run_id = explorer.selected_record().and_then(|record| {
        record
            .text(RUN_SCOPE_FIELD)
            .or_else(|| record.id(explorer.schema.id_field))
    });
    match run_id {
        Some(run_id) => UpdateResult::message(Message::OpenRunResults { run_id }),
        None => UpdateResult::none(),
    }
}

/// Drop the active view's scope and reload the whole collection.
pub fn handle_clear_scope(state: &mut AppState) -> UpdateResult {
    let view = state.active_kind();
    if !state.explorer_mut(view).set_scope(None) {
        return UpdateResult::none();
    }
    state.route = ViewRoute::new(view);
    UpdateResult::message(Message::Load { view })
}

/// Expand or collapse the selected row, fetching its detail when the view
/// has a detail endpoint.
pub fn handle_toggle_expand(state: &mut AppState) -> UpdateResult {
    let view = state.active_kind();
    let explorer = state.explorer_mut(view);
    let Some(id) = explorer.selected_id() else {
        return UpdateResult::none();
    };
    if explorer.toggle_expand(&id) && explorer.begin_detail(&id) {
        return UpdateResult::action(UpdateAction::FetchDetail { view, id });
    }
    UpdateResult::none()
}

pub fn handle_detail_loaded(
    state: &mut AppState,
    view: ViewKind,
    id: &str,
    result: std::result::Result<Value, String>,
) -> UpdateResult {
    state.explorer_mut(view).complete_detail(id, result);
    UpdateResult::none()
}

/// A poll tick loads the view unless a load is already in flight.
pub fn handle_poll_tick(state: &mut AppState, view: ViewKind) -> UpdateResult {
    if !state.is_polling(view) {
        debug!(%view, "tick after polling stopped, ignoring");
        return UpdateResult::none();
    }
    if state.explorer(view).is_loading() {
        debug!(%view, "poll tick skipped, load in flight");
        return UpdateResult::none();
    }
    handle_load(state, view)
}

pub fn handle_toggle_polling(state: &mut AppState) -> UpdateResult {
    let view = state.active_kind();
    if state.view_mut(view).poll.take().is_some() {
        info!(%view, "polling stopped");
        state.set_status(format!("Polling stopped for {}", view.label()));
        return UpdateResult::none();
    }

    let interval = state.settings.explorer.poll_interval();
    state.set_status(format!(
        "Polling {} every {}s",
        view.label(),
        interval.as_secs()
    ));
    UpdateResult::action(UpdateAction::StartPolling { view, interval })
}

pub fn handle_start_test_run(state: &mut AppState) -> UpdateResult {
    if state.test_run_pending {
        state.set_status("A test run is already being started");
        return UpdateResult::none();
    }
    let request = state.settings.test_run.to_request(Local::now());
    info!(run_id = %request.run_id, "starting test run");
    state.test_run_pending = true;
    state.set_status(format!("Starting test run {}...", request.run_id));
    UpdateResult::action(UpdateAction::StartTestRun { request })
}

pub fn handle_test_run_started(
    state: &mut AppState,
    result: std::result::Result<String, String>,
) -> UpdateResult {
    state.test_run_pending = false;
    match result {
        Ok(ack) => {
            let ack = if ack.is_empty() {
                "Test run started".to_string()
            } else {
                ack
            };
            state.set_status(ack);
            UpdateResult::message(Message::Load {
                view: ViewKind::Runs,
            })
        }
        Err(e) => {
            warn!("start test run failed: {}", e);
            state.set_status(format!("Failed to start test run: {e}"));
            UpdateResult::none()
        }
    }
}
