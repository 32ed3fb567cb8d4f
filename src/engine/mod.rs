//! Execution engine seam.
//!
//! The console never interprets commands itself. Everything goes through an
//! [`Engine`], an opaque component that takes text and answers with text.
//! Engine-reported errors travel inside the reply (see
//! [`crate::session::classify`]); an [`EngineFault`] means the call itself
//! failed.

mod process;

pub use process::{ProcessEngine, WireReply, WireRequest};

use thiserror::Error;

/// Failure of an engine call, distinct from an error reply.
#[derive(Debug, Error)]
pub enum EngineFault {
    #[error("engine I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("engine closed its output stream")]
    Closed,

    #[error("malformed engine reply: {0}")]
    Protocol(#[from] serde_json::Error),

    #[error("engine lock poisoned")]
    Poisoned,

    /// Fault declared by the engine itself.
    #[error("{0}")]
    Engine(String),
}

/// The two calls the console makes into an execution engine.
pub trait Engine: Send + Sync {
    /// Short name used in the banner and logs.
    fn name(&self) -> &str;

    fn execute_command(&self, text: &str) -> Result<String, EngineFault>;

    fn load_commands_json(&self, text: &str) -> Result<String, EngineFault>;

    /// Stop the engine so that a call blocked inside it returns with a fault.
    ///
    /// Called when the console exits while a request is still in flight;
    /// must not wait for that request. The default does nothing.
    fn shutdown(&self) {}
}

/// A call waiting to be sent to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineRequest {
    Execute(String),
    LoadSchema(String),
}

impl EngineRequest {
    /// Perform the call. Blocks until the engine replies.
    pub fn dispatch(&self, engine: &dyn Engine) -> Result<String, EngineFault> {
        match self {
            EngineRequest::Execute(text) => engine.execute_command(text),
            EngineRequest::LoadSchema(text) => engine.load_commands_json(text),
        }
    }

    pub fn op_name(&self) -> &'static str {
        match self {
            EngineRequest::Execute(_) => "execute_command",
            EngineRequest::LoadSchema(_) => "load_commands_json",
        }
    }
}
