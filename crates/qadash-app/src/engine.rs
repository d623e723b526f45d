//! Engine - shared orchestration state for TUI and headless runners
//!
//! The Engine owns the TEA state, the unified message channel and the
//! backend source. Frontends feed it messages and render `state`.

use std::sync::Arc;
use std::time::Duration;

use qadash_client::{ApiClient, CollectionSource};
use qadash_core::prelude::*;
use qadash_core::{ViewKind, ViewRoute};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::Settings;
use crate::message::Message;
use crate::process;
use crate::signals;
use crate::state::AppState;

/// Capacity of the unified message channel.
const MESSAGE_CHANNEL_CAPACITY: usize = 256;

/// Orchestration engine for qadash.
///
/// Generic over the backend so tests can run the full update loop against
/// an in-memory [`CollectionSource`].
pub struct Engine<S = ApiClient> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, key reader).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    source: Arc<S>,

    signal_task: Option<JoinHandle<()>>,
}

impl Engine<ApiClient> {
    /// Create an engine talking to the backend named in `settings`.
    pub fn new(settings: Settings) -> Result<Self> {
        let client = ApiClient::new(&settings.server.base_url, settings.server.timeout())?;
        info!("backend at {}", client.base_url());
        Ok(Self::with_source(settings, client))
    }
}

impl<S> Engine<S>
where
    S: CollectionSource + Send + Sync + 'static,
{
    pub fn with_source(settings: Settings, source: S) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(MESSAGE_CHANNEL_CAPACITY);
        Self {
            state: AppState::with_settings(settings),
            msg_tx,
            msg_rx,
            source: Arc::new(source),
            signal_task: None,
        }
    }

    /// Route OS termination signals into the message channel as `Quit`.
    pub fn spawn_signal_handler(&mut self) {
        if self.signal_task.is_none() {
            self.signal_task = Some(signals::spawn_signal_handler(self.msg_tx.clone()));
        }
    }

    /// Activate the initial route and issue its first load. Starts polling
    /// when `auto_poll` is configured.
    pub fn start(&mut self, route: ViewRoute) {
        let view = route.view;
        info!(route = %route, "starting");
        self.state.explorer_mut(view).set_scope(route.scope.clone());
        self.state.route = route;
        self.process_message(Message::Load { view });

        if self.state.settings.explorer.auto_poll {
            self.process_message(Message::TogglePolling);
        }
    }

    /// Process a single message through the TEA update cycle.
    pub fn process_message(&mut self, msg: Message) {
        process::process_message(&mut self.state, msg, &self.msg_tx, &self.source);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed. Used by the TUI runner
    /// which needs to drain all pending messages before rendering.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Whether any view still awaits a response.
    pub fn has_pending_requests(&self) -> bool {
        self.state.test_run_pending
            || ViewKind::ALL
                .iter()
                .any(|&kind| self.state.explorer(kind).is_loading())
    }

    /// Process messages until no request is in flight.
    ///
    /// Returns `false` when `limit` elapses first.
    pub async fn settle(&mut self, limit: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + limit;
        while self.has_pending_requests() {
            match tokio::time::timeout_at(deadline, self.msg_rx.recv()).await {
                Ok(Some(msg)) => self.process_message(msg),
                Ok(None) => return false,
                Err(_) => {
                    warn!("requests still pending after {:?}", limit);
                    return false;
                }
            }
        }
        true
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Stop every background poll task.
    pub fn shutdown(&mut self) {
        info!("shutting down");
        self.state.stop_all_polling();
        if let Some(task) = self.signal_task.take() {
            task.abort();
        }
    }
}
