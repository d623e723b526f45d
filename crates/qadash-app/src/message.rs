//! Message types for the application (TEA pattern)

use qadash_core::{DateRange, Record, RecordId, RequestToken, ViewKind};
use serde_json::Value;

use crate::input_key::InputKey;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Periodic UI tick
    Tick,

    /// Quit immediately (q, Ctrl+C, signal handler)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    /// Make `view` the active view, keeping its own scope
    SwitchView(ViewKind),
    NextView,
    PrevView,
    /// Show the results of one run (Runs → Results)
    OpenRunResults { run_id: String },
    /// Open the results of the run under the cursor
    OpenSelectedRun,
    /// Drop the active view's scope and show the whole collection
    ClearScope,

    // ─────────────────────────────────────────────────────────
    // Loading
    // ─────────────────────────────────────────────────────────
    /// (Re)load a view's collection
    Load { view: ViewKind },
    /// A collection fetch finished
    CollectionLoaded {
        view: ViewKind,
        token: RequestToken,
        result: Result<Vec<Record>, String>,
    },
    /// A detail fetch finished
    DetailLoaded {
        view: ViewKind,
        id: RecordId,
        result: Result<Value, String>,
    },
    /// Hide the active view's error banner
    DismissError,

    // ─────────────────────────────────────────────────────────
    // Explorer interaction (active view)
    // ─────────────────────────────────────────────────────────
    CursorUp,
    CursorDown,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    /// Expand or collapse the row under the cursor
    ToggleExpand,
    SetSearch(String),
    CycleStatusFilter,
    CycleFacetFilter,
    SetDateRange(DateRange),
    ClearFilters,
    /// Sort by a field (toggles direction if already active)
    SortBy(String),
    NextSortColumn,
    PrevSortColumn,
    /// Reverse the active sort direction
    FlipSort,

    // ─────────────────────────────────────────────────────────
    // Text input
    // ─────────────────────────────────────────────────────────
    StartSearchInput,
    StartDateInput,
    InputChar(char),
    InputBackspace,
    SubmitInput,
    CancelInput,

    // ─────────────────────────────────────────────────────────
    // Polling
    // ─────────────────────────────────────────────────────────
    /// Start or stop polling the active view
    TogglePolling,
    /// Interval tick from a view's poll task
    PollTick { view: ViewKind },

    // ─────────────────────────────────────────────────────────
    // Test runs
    // ─────────────────────────────────────────────────────────
    /// Ask the backend to start a test run with the configured parameters
    StartTestRun,
    /// The start-test request finished
    TestRunStarted { result: Result<String, String> },
}
