//! Main entry point for the console.
//!
//! Resolves settings, starts logging and the engine process, then runs the
//! TUI event loop and restores the terminal on exit.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use repl_console::app::App;
use repl_console::config::{Cli, load_settings};
use repl_console::engine::{Engine, ProcessEngine};
use repl_console::session::{LineKind, Session};
use repl_console::utils::guard::ExitGuard;
use repl_console::utils::logger;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli).context("failed to load configuration")?;

    // Initialize logging before anything else; the guard flushes on exit
    let _log_guard = logger::init_logging(settings.log_dir.as_deref());

    let mut session = Session::new(settings.history_capacity);
    let mut startup_errors = Vec::new();

    let engine: Option<Arc<dyn Engine>> = match &settings.engine {
        Some(program) => match ProcessEngine::spawn(program, &settings.engine_args) {
            Ok(engine) => Some(Arc::new(engine)),
            Err(e) => {
                tracing::error!("Failed to start engine '{}': {}", program, e);
                startup_errors.push(format!("Failed to start engine '{}': {}", program, e));
                None
            }
        },
        None => None,
    };

    session.banner(engine.as_ref().map(|engine| engine.name()));
    for message in startup_errors {
        session.append(LineKind::Error, message);
    }

    if let Some(path) = &settings.schema_file {
        match std::fs::read_to_string(path) {
            Ok(text) => session.schema_input_mut().set(text),
            Err(e) => session.append(
                LineKind::Error,
                format!("Failed to read schema file {}: {}", path.display(), e),
            ),
        }
    }

    let mut terminal = ratatui::init();

    // Restores the terminal on both normal exit and panic
    let _terminal_guard = ExitGuard::new(ratatui::restore);

    let mut app = App::new(session, engine);
    // draw 1st frame
    app.draw(&mut terminal)?;
    // run event-driven main loop of app
    app.run(&mut terminal).await?;

    app.session().log_summary();
    Ok(())
}
