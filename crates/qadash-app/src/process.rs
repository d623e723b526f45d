//! Message processing
//!
//! Runs a message through the TEA update loop, following chained messages
//! and dispatching every resulting action.

use std::sync::Arc;

use qadash_client::CollectionSource;
use qadash_core::prelude::*;
use tokio::sync::mpsc;

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message<S>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    source: &Arc<S>,
) where
    S: CollectionSource + Send + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            if let Some(poll) = handle_action(action, msg_tx, source) {
                let view = poll.view();
                // Replacing a handle drops (and stops) the previous task.
                if state.view_mut(view).poll.replace(poll).is_some() {
                    debug!(%view, "replaced existing poll task");
                }
            }
        }

        msg = result.message;
    }
}
