//! Action handlers: UpdateAction dispatch and background task spawning

use std::sync::Arc;

use qadash_client::CollectionSource;
use tokio::sync::mpsc;

use crate::handler::UpdateAction;
use crate::message::Message;
use crate::polling::PollHandle;

pub(crate) mod fetch;

/// Execute an action by spawning a background task.
///
/// `StartPolling` yields the new [`PollHandle`]; the caller attaches it to
/// the view so the task lives exactly as long as the view keeps polling.
pub fn handle_action<S>(
    action: UpdateAction,
    msg_tx: &mpsc::Sender<Message>,
    source: &Arc<S>,
) -> Option<PollHandle>
where
    S: CollectionSource + Send + Sync + 'static,
{
    match action {
        UpdateAction::FetchCollection { view, token, scope } => {
            fetch::spawn_fetch_collection(source.clone(), view, token, scope, msg_tx.clone());
            None
        }

        UpdateAction::FetchDetail { view, id } => {
            fetch::spawn_fetch_detail(source.clone(), view, id, msg_tx.clone());
            None
        }

        UpdateAction::StartPolling { view, interval } => {
            Some(PollHandle::spawn(view, interval, msg_tx.clone()))
        }

        UpdateAction::StartTestRun { request } => {
            fetch::spawn_start_test_run(source.clone(), request, msg_tx.clone());
            None
        }
    }
}
