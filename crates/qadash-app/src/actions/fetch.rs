//! One-shot backend requests.
//!
//! Each task performs a single request through the [`CollectionSource`] and
//! reports back with one message. Errors are flattened to their display text
//! because [`Message`] must stay `Clone`.

use std::sync::Arc;

use qadash_client::{CollectionSource, TestRunRequest};
use qadash_core::prelude::*;
use qadash_core::{RecordId, RequestToken, ViewKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::message::Message;

/// Fetch a view's collection and reply with `CollectionLoaded`.
pub(crate) fn spawn_fetch_collection<S>(
    source: Arc<S>,
    view: ViewKind,
    token: RequestToken,
    scope: Option<String>,
    msg_tx: mpsc::Sender<Message>,
) -> JoinHandle<()>
where
    S: CollectionSource + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = source
            .fetch_collection(view.schema(), scope)
            .await
            .map_err(|e| {
                if e.is_load_failure() {
                    warn!(%view, %token, "collection fetch failed: {}", e);
                } else {
                    error!(%view, %token, "collection request not sent: {}", e);
                }
                e.to_string()
            });
        if msg_tx
            .send(Message::CollectionLoaded {
                view,
                token,
                result,
            })
            .await
            .is_err()
        {
            debug!(%view, "engine gone before collection arrived");
        }
    })
}

/// Fetch one record's detail and reply with `DetailLoaded`.
pub(crate) fn spawn_fetch_detail<S>(
    source: Arc<S>,
    view: ViewKind,
    id: RecordId,
    msg_tx: mpsc::Sender<Message>,
) -> JoinHandle<()>
where
    S: CollectionSource + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = source
            .fetch_detail(view.schema(), id.clone())
            .await
            .map_err(|e| {
                if e.is_load_failure() {
                    warn!(%view, id = %id, "detail fetch failed: {}", e);
                } else {
                    error!(%view, id = %id, "detail request not sent: {}", e);
                }
                e.to_string()
            });
        let _ = msg_tx
            .send(Message::DetailLoaded { view, id, result })
            .await;
    })
}

/// POST the start-test request and reply with `TestRunStarted`.
pub(crate) fn spawn_start_test_run<S>(
    source: Arc<S>,
    request: TestRunRequest,
    msg_tx: mpsc::Sender<Message>,
) -> JoinHandle<()>
where
    S: CollectionSource + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let run_id = request.run_id.clone();
        let result = source.start_test_run(request).await.map_err(|e| {
            error!(run_id = %run_id, "start test run failed: {}", e);
            e.to_string()
        });
        let _ = msg_tx.send(Message::TestRunStarted { result }).await;
    })
}
