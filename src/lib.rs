//! repl-console - an interactive terminal console for a command engine
//!
//! The console keeps a bounded command history, forwards commands and
//! command-schema documents to an opaque engine, classifies each reply as
//! success or error by the `❌` sentinel, and renders a colored output log.
//!
//! - [`session`]: history, dispatch, classification and the output log
//! - [`engine`]: the engine trait and the child-process implementation
//! - [`app`], [`event`], [`ui`]: the TUI around a session
//!
//! # Example
//!
//! ```
//! use repl_console::engine::{Engine, EngineFault};
//! use repl_console::session::{LineKind, Session};
//!
//! struct Echo;
//!
//! impl Engine for Echo {
//!     fn name(&self) -> &str {
//!         "echo"
//!     }
//!     fn execute_command(&self, text: &str) -> Result<String, EngineFault> {
//!         Ok(text.to_string())
//!     }
//!     fn load_commands_json(&self, _text: &str) -> Result<String, EngineFault> {
//!         Ok("loaded".to_string())
//!     }
//! }
//!
//! let mut session = Session::default();
//! session.command_input_mut().set("hello");
//! session.submit(Some(&Echo));
//!
//! let kinds: Vec<LineKind> = session.log().lines().iter().map(|l| l.kind()).collect();
//! assert_eq!(kinds, vec![LineKind::Command, LineKind::Success]);
//! ```

pub mod app;
pub mod config;
pub mod engine;
pub mod event;
pub mod schema;
pub mod session;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use app::{ActivePane, App};
pub use engine::{Engine, EngineFault, EngineRequest, ProcessEngine};
pub use event::{AppEvent, UserEvent, init_app_eventsource, init_user_event};
pub use session::{LineKind, Outcome, Session, classify};
