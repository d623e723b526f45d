//! Main TUI runner - entry point and event loop

use qadash_app::{Engine, Settings};
use qadash_core::prelude::*;
use qadash_core::ViewRoute;

use crate::{event, render};

/// Run the interactive explorer starting at `route`
///
/// Requires the multi-threaded tokio runtime: the event loop blocks on
/// terminal input while fetch and poll tasks keep running on other workers.
pub async fn run(settings: Settings, route: ViewRoute) -> Result<()> {
    let mut engine = Engine::new(settings)?;
    engine.spawn_signal_handler();
    engine.start(route);

    // ratatui installs a panic hook that restores the terminal
    let mut term = ratatui::try_init().context("Failed to initialize terminal")?;
    let result = tokio::task::block_in_place(|| run_loop(&mut term, &mut engine));

    engine.shutdown();
    ratatui::restore();

    if let Err(ref e) = result {
        tracing::error!("TUI loop failed: {:?}", e);
    }
    result
}

/// Main event loop
///
/// Replies from fetch and poll tasks arrive on the engine channel and are
/// folded into state before every frame.
fn run_loop(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine) -> Result<()> {
    while !engine.should_quit() {
        let processed = engine.drain_pending_messages();
        if processed > 0 {
            trace!("processed {} background messages", processed);
        }

        terminal
            .draw(|frame| render::view(frame, &engine.state))
            .context("Failed to draw frame")?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }
    info!("quit requested");
    Ok(())
}
