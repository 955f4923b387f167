//! Main TUI runner - entry point and event loop

use simcon_app::Engine;
use simcon_client::ControlApi;
use simcon_core::prelude::*;

use crate::{event, render, terminal};

/// Run the console until the operator quits or a signal arrives.
///
/// Must be called from within a multi-threaded tokio runtime: the event loop
/// blocks on terminal polling while background tasks run on other workers.
pub async fn run<A>(mut engine: Engine<A>) -> Result<()>
where
    A: ControlApi + Send + Sync + 'static,
{
    terminal::install_panic_hook();
    let mut term = ratatui::init();

    engine.start();
    let result = run_loop(&mut term, &mut engine);

    if let Err(e) = &result {
        error!("Event loop failed: {}", e);
    }

    engine.shutdown();
    ratatui::restore();

    result
}

/// Main event loop
fn run_loop<A>(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine<A>) -> Result<()>
where
    A: ControlApi + Send + Sync + 'static,
{
    while !engine.should_quit() {
        // Results from background tasks and signals
        engine.drain_pending_messages();
        if engine.should_quit() {
            break;
        }

        terminal
            .draw(|frame| render::view(frame, &engine.state))
            .context("Failed to draw frame")?;

        if let Some(message) = event::poll().context("Failed to read terminal events")? {
            engine.process_message(message);
        }
    }

    info!("Event loop finished");
    Ok(())
}
