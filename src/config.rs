//! Console configuration.
//!
//! Settings are resolved in layers, later ones winning:
//! built-in defaults, the TOML config file, `REPL_CONSOLE_*` environment
//! variables, then command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use crate::session::DEFAULT_HISTORY_CAPACITY;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "repl-console.toml";

pub const ENV_ENGINE: &str = "REPL_CONSOLE_ENGINE";
pub const ENV_HISTORY_CAPACITY: &str = "REPL_CONSOLE_HISTORY_CAPACITY";
pub const ENV_LOG_DIR: &str = "REPL_CONSOLE_LOG_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("history capacity must be at least 1")]
    ZeroCapacity,
}

/// Command-line flags.
#[derive(Parser, Debug, Default)]
#[command(name = "repl-console", version, about = "Interactive console for an external command engine")]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Engine program to spawn
    #[arg(long)]
    pub engine: Option<String>,

    /// Argument passed to the engine program (repeatable)
    #[arg(long = "engine-arg", allow_hyphen_values = true)]
    pub engine_args: Vec<String>,

    /// Number of commands kept in history
    #[arg(long)]
    pub history_capacity: Option<usize>,

    /// Directory for log files
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// JSON file pre-filled into the schema editor
    #[arg(long)]
    pub schema_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub engine: Option<String>,
    pub engine_args: Vec<String>,
    pub history_capacity: usize,
    pub log_dir: Option<PathBuf>,
    pub schema_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine: None,
            engine_args: Vec::new(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            log_dir: None,
            schema_file: None,
        }
    }
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment overrides read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(v) = lookup(ENV_ENGINE) {
            self.engine = Some(v);
        }
        if let Some(v) = lookup(ENV_HISTORY_CAPACITY) {
            self.history_capacity = v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: ENV_HISTORY_CAPACITY,
                value: v.clone(),
            })?;
        }
        if let Some(v) = lookup(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(v));
        }
        Ok(())
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(engine) = &cli.engine {
            self.engine = Some(engine.clone());
        }
        if !cli.engine_args.is_empty() {
            self.engine_args = cli.engine_args.clone();
        }
        if let Some(capacity) = cli.history_capacity {
            self.history_capacity = capacity;
        }
        if let Some(dir) = &cli.log_dir {
            self.log_dir = Some(dir.clone());
        }
        if let Some(file) = &cli.schema_file {
            self.schema_file = Some(file.clone());
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

/// Resolve the final settings for this run.
pub fn load_settings(cli: &Cli) -> Result<Settings, ConfigError> {
    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                Settings::from_file(default_path)?
            } else {
                Settings::default()
            }
        }
    };

    settings.apply_env(|key| std::env::var(key).ok())?;
    settings.apply_cli(cli);
    settings.validate()?;
    Ok(settings)
}
