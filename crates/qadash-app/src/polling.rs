//! Scoped polling tasks
//!
//! A [`PollHandle`] owns one interval task that sends
//! [`Message::PollTick`] for a view. The task lives exactly as long as the
//! handle: dropping it signals shutdown over a `watch` channel and aborts
//! the task, so a view that is torn down can never be ticked again.

use std::time::Duration;

use qadash_core::prelude::*;
use qadash_core::ViewKind;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::message::Message;

/// Handle to a running poll task. Stops the task on drop.
#[derive(Debug)]
pub struct PollHandle {
    view: ViewKind,
    interval: Duration,
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Spawn a task ticking `view` every `interval`. The first tick fires
    /// one interval from now.
    pub fn spawn(view: ViewKind, interval: Duration, msg_tx: mpsc::Sender<Message>) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        trace!("poll tick for {}", view);
                        if msg_tx.send(Message::PollTick { view }).await.is_err() {
                            // Engine is gone.
                            break;
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            debug!("poll task for {} stopped", view);
        });

        info!("polling {} every {}s", view, interval.as_secs());
        Self {
            view,
            interval,
            shutdown_tx,
            task,
        }
    }

    pub fn view(&self) -> ViewKind {
        self.view
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
        self.task.abort();
    }
}
