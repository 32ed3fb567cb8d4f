//! Logging initialization and configuration.
//!
//! Logs go to a file so they never interfere with the TUI. Each run gets
//! its own file, e.g. `logs/repl-console.2026-10-19-14-30-25.log`.
//!
//! The directory is, in order of preference: `--log-dir`, then
//! `REPL_CONSOLE_LOG_DIR`, then the `log_dir` key of the config file, and
//! finally `logs/` next to the executable.
//!
//! # Configuration
//!
//! The log level can be controlled via the `RUST_LOG` environment variable:
//! - `RUST_LOG=debug` - also log every dispatched engine request
//! - `RUST_LOG=info` - startup, engine lifecycle and the exit summary (default)
//! - `RUST_LOG=warn` - engine stderr and delivery problems
//! - `RUST_LOG=error` - engine faults only
//!
//! Per-module filters work as usual, e.g. `RUST_LOG=repl_console::engine=debug`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default log directory: `logs/` next to the executable, or in the
/// working directory when the executable path is unknown.
pub fn default_log_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("logs")))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// File name for a run started now.
pub fn log_file_name() -> String {
    format!("repl-console.{}.log", Local::now().format("%Y-%m-%d-%H-%M-%S"))
}

/// Initialize file logging.
///
/// Returns the writer guard; logs are flushed when it is dropped, so keep
/// it alive for the whole run. Returns `None` (and logs nothing) if the
/// log file could not be created.
pub fn init_logging(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let log_dir = log_dir.map(Path::to_path_buf).unwrap_or_else(default_log_dir);

    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create logs directory: {}", e);
        return None;
    }

    let log_path = log_dir.join(log_file_name());
    let log_file = match fs::File::create(&log_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: Failed to create log file: {}", e);
            return None;
        }
    };

    // Non-blocking writer keeps the event loop off the disk
    let (non_blocking, guard) = tracing_appender::non_blocking(log_file);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false) // No ANSI colors in log files
        .with_target(true) // Include module path
        .with_thread_ids(true) // Engine calls run on blocking-pool threads
        .with_line_number(true);

    // Default to "info" if RUST_LOG is not set or invalid
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized - writing to {}", log_path.display());
    Some(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_name_shape() {
        let name = log_file_name();
        assert!(name.starts_with("repl-console."));
        assert!(name.ends_with(".log"));
        // repl-console. + YYYY-MM-DD-HH-MM-SS + .log
        assert_eq!(name.len(), "repl-console.".len() + 19 + ".log".len());
    }

    #[test]
    fn test_default_log_dir_is_named_logs() {
        assert!(default_log_dir().ends_with("logs"));
    }
}
