//! Termination signals routed into the message channel as `Quit`

use std::future::Future;

use qadash_core::prelude::*;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::message::Message;

/// Listen for SIGINT/SIGTERM (Ctrl+C on Windows) and quit the explorer.
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>) -> JoinHandle<()> {
    tokio::spawn(quit_on(termination(), tx))
}

/// Send `Quit` once `signal` fires. A listener that cannot be installed
/// leaves the explorer running with only the keyboard quit.
async fn quit_on<F>(signal: F, tx: mpsc::Sender<Message>)
where
    F: Future<Output = Result<&'static str>>,
{
    match signal.await {
        Ok(name) => {
            info!("{} received, quitting", name);
            if tx.send(Message::Quit).await.is_err() {
                debug!("explorer already gone");
            }
        }
        Err(e) => warn!("signal listener unavailable: {}", e),
    }
}

#[cfg(unix)]
async fn termination() -> Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let listen = |kind: SignalKind, name: &str| {
        signal(kind).map_err(|e| Error::terminal(format!("cannot listen for {name}: {e}")))
    };
    let mut interrupt = listen(SignalKind::interrupt(), "SIGINT")?;
    let mut terminate = listen(SignalKind::terminate(), "SIGTERM")?;

    let name = tokio::select! {
        _ = interrupt.recv() => "SIGINT",
        _ = terminate.recv() => "SIGTERM",
    };
    Ok(name)
}

#[cfg(windows)]
async fn termination() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| Error::terminal(format!("cannot listen for Ctrl+C: {e}")))?;
    Ok("Ctrl+C")
}
