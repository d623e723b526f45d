//! Application state (Model in TEA pattern)

use qadash_core::{ViewKind, ViewRoute};

use crate::config::Settings;
use crate::explorer::ExplorerState;
use crate::polling::PollHandle;

/// Whether the application keeps running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Current UI mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Table navigation
    #[default]
    Normal,

    /// Typing a free-text search query (committed on Enter)
    SearchInput,

    /// Typing a date range `FROM..TO` (committed on Enter)
    DateInput,
}

/// One view: its explorer and, while polling is enabled, its poll task.
#[derive(Debug)]
pub struct ViewState {
    pub explorer: ExplorerState,
    pub poll: Option<PollHandle>,
}

impl ViewState {
    fn new(kind: ViewKind, page_size: usize) -> Self {
        Self {
            explorer: ExplorerState::new(kind.schema(), page_size),
            poll: None,
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poll.is_some()
    }
}

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,

    pub ui_mode: UiMode,

    /// Active view and its scope
    pub route: ViewRoute,

    /// Indexed by [`ViewKind::index`]
    views: [ViewState; 3],

    /// Text typed in an input mode
    pub input_buffer: String,

    /// Validation error for the text being typed
    pub input_error: Option<String>,

    /// One-line feedback (test run acknowledgments, polling toggles)
    pub status_message: Option<String>,

    /// A start-test request is in flight
    pub test_run_pending: bool,

    pub settings: Settings,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let page_size = settings.explorer.effective_page_size();
        Self {
            phase: AppPhase::Running,
            ui_mode: UiMode::Normal,
            route: ViewRoute::default(),
            views: ViewKind::ALL.map(|kind| ViewState::new(kind, page_size)),
            input_buffer: String::new(),
            input_error: None,
            status_message: None,
            test_run_pending: false,
            settings,
        }
    }

    pub fn active_kind(&self) -> ViewKind {
        self.route.view
    }

    pub fn view(&self, kind: ViewKind) -> &ViewState {
        &self.views[kind.index()]
    }

    pub fn view_mut(&mut self, kind: ViewKind) -> &mut ViewState {
        &mut self.views[kind.index()]
    }

    pub fn explorer(&self, kind: ViewKind) -> &ExplorerState {
        &self.view(kind).explorer
    }

    pub fn explorer_mut(&mut self, kind: ViewKind) -> &mut ExplorerState {
        &mut self.view_mut(kind).explorer
    }

    pub fn active_explorer(&self) -> &ExplorerState {
        self.explorer(self.route.view)
    }

    pub fn active_explorer_mut(&mut self) -> &mut ExplorerState {
        self.explorer_mut(self.route.view)
    }

    pub fn is_polling(&self, kind: ViewKind) -> bool {
        self.view(kind).is_polling()
    }

    /// Release every poll task.
    pub fn stop_all_polling(&mut self) {
        for view in &mut self.views {
            view.poll = None;
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Enter an input mode with an empty buffer.
    pub fn begin_input(&mut self, mode: UiMode, initial: String) {
        self.ui_mode = mode;
        self.input_buffer = initial;
        self.input_error = None;
    }

    /// Return to normal mode, discarding the buffer.
    pub fn end_input(&mut self) {
        self.ui_mode = UiMode::Normal;
        self.input_buffer.clear();
        self.input_error = None;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
