//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `explorer`: Load, navigation and filter handlers for the active view

pub(crate) mod explorer;
pub(crate) mod keys;
pub(crate) mod update;


use std::time::Duration;

use qadash_client::TestRunRequest;
use qadash_core::{RecordId, RequestToken, ViewKind};

use crate::message::Message;

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Fetch a view's collection in the background and reply with
    /// `Message::CollectionLoaded` carrying `token`.
    FetchCollection {
        view: ViewKind,
        token: RequestToken,
        scope: Option<String>,
    },

    /// Fetch the detail document of an expanded record and reply with
    /// `Message::DetailLoaded`.
    FetchDetail { view: ViewKind, id: RecordId },

    /// Start the interval task for a view. The resulting `PollHandle` is
    /// attached to the view by `process_message`.
    StartPolling { view: ViewKind, interval: Duration },

    /// POST the start-test request and reply with `Message::TestRunStarted`.
    StartTestRun { request: TestRunRequest },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
