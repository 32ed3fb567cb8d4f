//! Interactive session state.
//!
//! [`Session`] owns everything that changes while the console runs: the
//! command history, the output log, both input buffers and the request
//! currently waiting on the engine. It is only mutated through the
//! operations below, which the event layer reaches via [`crate::App`].
//!
//! Engine calls are split in two halves so the app can run the blocking
//! call off the event loop: `begin_*` validates input and renders the echo,
//! [`Session::finish`] classifies and renders the reply. [`Session::submit`]
//! and [`Session::load_schema`] chain both halves synchronously.

pub mod classify;
mod history;
mod input;
pub mod output;


use tracing::{error, info, warn};

use crate::engine::{Engine, EngineFault, EngineRequest};

pub use classify::{classify, Outcome, ERROR_SENTINEL};
pub use history::{History, DEFAULT_HISTORY_CAPACITY};
pub use input::InputBuffer;
pub use output::{LineKind, OutputLog, SessionLine};

pub const NOT_INITIALIZED: &str = "REPL not initialized";
pub const EMPTY_SCHEMA: &str = "Please provide JSON command definitions";
pub const BUSY: &str = "Engine is busy; wait for the current request to finish";

/// Running totals for the session summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub submitted: u32,
    pub succeeded: u32,
    /// Sentinel-prefixed replies
    pub failed: u32,
    /// Calls that did not complete
    pub faults: u32,
    pub schemas_loaded: u32,
}

#[derive(Debug)]
pub struct Session {
    history: History,
    log: OutputLog,
    command_input: InputBuffer,
    schema_input: InputBuffer,
    stats: SessionStats,
    pending: Option<EngineRequest>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl Session {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            history: History::with_capacity(history_capacity),
            log: OutputLog::new(),
            command_input: InputBuffer::new(),
            schema_input: InputBuffer::new(),
            stats: SessionStats::default(),
            pending: None,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn log(&self) -> &OutputLog {
        &self.log
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn command_input(&self) -> &InputBuffer {
        &self.command_input
    }

    /// Editing access; typing here never touches the history buffer.
    pub fn command_input_mut(&mut self) -> &mut InputBuffer {
        &mut self.command_input
    }

    pub fn schema_input(&self) -> &InputBuffer {
        &self.schema_input
    }

    pub fn schema_input_mut(&mut self) -> &mut InputBuffer {
        &mut self.schema_input
    }

    pub fn pending(&self) -> Option<&EngineRequest> {
        self.pending.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn append(&mut self, kind: LineKind, text: impl Into<String>) {
        self.log.append(kind, text);
    }

    /// Startup banner.
    pub fn banner(&mut self, engine_name: Option<&str>) {
        self.append(LineKind::System, "Interactive command console");
        match engine_name {
            Some(name) => self.append(LineKind::System, format!("Connected to engine: {}", name)),
            None => self.append(LineKind::System, "No engine configured; commands cannot run"),
        }
        self.append(
            LineKind::System,
            "Enter runs a command, Up/Down browse history, Tab switches to the schema editor",
        );
    }

    /// Up arrow: overlay the input with an older command.
    pub fn history_older(&mut self) {
        if let Some(entry) = self.history.older() {
            self.command_input.set(entry);
        }
    }

    /// Down arrow: overlay the input with a newer command, or clear it when
    /// leaving history browsing.
    pub fn history_newer(&mut self) {
        if let Some(entry) = self.history.newer() {
            self.command_input.set(entry);
        }
    }

    /// Render the history as system lines.
    pub fn show_history(&mut self) {
        if self.history.is_empty() {
            self.append(LineKind::System, "No commands in history");
            return;
        }
        let lines: Vec<String> = self
            .history
            .iter()
            .enumerate()
            .map(|(idx, cmd)| format!("{:>3}: {}", idx + 1, cmd))
            .collect();
        for line in lines {
            self.log.append(LineKind::System, line);
        }
    }

    /// First half of a command submission.
    ///
    /// Returns the request to send, or `None` when nothing should reach the
    /// engine (blank input, busy, or no engine).
    pub fn begin_submit(&mut self, engine_available: bool) -> Option<EngineRequest> {
        let command = self.command_input.text().trim().to_string();
        if command.is_empty() {
            return None;
        }
        if self.is_busy() {
            self.append(LineKind::System, BUSY);
            return None;
        }
        if !engine_available {
            self.append(LineKind::Error, NOT_INITIALIZED);
            return None;
        }

        self.append(LineKind::Command, format!("> {}", command));
        self.history.record(&command);
        self.command_input.clear();
        self.stats.submitted += 1;

        let request = EngineRequest::Execute(command);
        self.pending = Some(request.clone());
        Some(request)
    }

    /// First half of a schema load. Sends the editor text verbatim.
    pub fn begin_load_schema(&mut self, engine_available: bool) -> Option<EngineRequest> {
        if self.schema_input.text().trim().is_empty() {
            self.append(LineKind::Error, EMPTY_SCHEMA);
            return None;
        }
        if self.is_busy() {
            self.append(LineKind::System, BUSY);
            return None;
        }
        if !engine_available {
            self.append(LineKind::Error, NOT_INITIALIZED);
            return None;
        }

        let request = EngineRequest::LoadSchema(self.schema_input.text().to_string());
        self.pending = Some(request.clone());
        Some(request)
    }

    /// Second half: classify the engine reply and render it.
    pub fn finish(&mut self, request: EngineRequest, result: Result<String, EngineFault>) {
        if self.pending.as_ref() != Some(&request) {
            warn!("Reply for {} does not match the pending request", request.op_name());
        }
        self.pending = None;

        let outcome = match result {
            Ok(reply) => classify(reply),
            Err(fault) => {
                error!("Engine call {} failed: {}", request.op_name(), fault);
                self.stats.faults += 1;
                self.append(LineKind::Error, format!("Error: {}", fault));
                return;
            }
        };

        if outcome.is_error() {
            self.stats.failed += 1;
        } else {
            self.stats.succeeded += 1;
            if matches!(request, EngineRequest::LoadSchema(_)) {
                self.stats.schemas_loaded += 1;
                self.schema_input.clear();
            }
        }
        self.log.append_outcome(outcome);
    }

    /// Submit the command input and wait for the engine.
    pub fn submit(&mut self, engine: Option<&dyn Engine>) {
        if let Some(request) = self.begin_submit(engine.is_some()) {
            self.complete_with(request, engine);
        }
    }

    /// Load the schema editor text into the engine and wait for it.
    pub fn load_schema(&mut self, engine: Option<&dyn Engine>) {
        if let Some(request) = self.begin_load_schema(engine.is_some()) {
            self.complete_with(request, engine);
        }
    }

    fn complete_with(&mut self, request: EngineRequest, engine: Option<&dyn Engine>) {
        if let Some(engine) = engine {
            let result = request.dispatch(engine);
            self.finish(request, result);
        }
    }

    /// Log the session summary.
    pub fn log_summary(&self) {
        let stats = self.stats;
        info!(
            submitted = stats.submitted,
            succeeded = stats.succeeded,
            failed = stats.failed,
            faults = stats.faults,
            schemas_loaded = stats.schemas_loaded,
            history = self.history.len(),
            errors_shown = self.log.count(LineKind::Error),
            "Session finished"
        );
    }
}
