//! Event handling system for the console.
//!
//! Two channels feed the main loop:
//!
//! - **User Events**: direct input from the terminal (keyboard, resize),
//!   read on a dedicated thread so input is never blocked.
//! - **App Events**: replies coming back from engine calls that run on the
//!   blocking pool.
//!
//! # Submodules
//!
//! - `console`: key handling for the command line
//! - `schema`: key handling for the schema editor

pub mod console;
pub mod schema;

use std::thread;

use tokio::sync::mpsc::{self, Receiver, UnboundedReceiver, UnboundedSender};
use std::io::Result;

use crate::engine::{EngineFault, EngineRequest};

/// Type alias for user input events from the terminal.
pub type UserEvent = crossterm::event::Event;

/// Initializes the user event stream.
///
/// Spawns a thread that reads terminal events with `crossterm::event::read()`
/// and forwards them. The thread stops once the receiver is dropped.
pub fn init_user_event() -> Receiver<Result<UserEvent>> {
    let (tx, rx) = mpsc::channel(64);
    thread::spawn(move || {
        loop {
            if tx.blocking_send(crossterm::event::read()).is_err() {
                break;
            }
        }
    });
    rx
}

/// Application-wide events for inter-component communication.
#[non_exhaustive]
#[derive(Debug)]
pub enum AppEvent {
    /// An engine call finished (successfully or not).
    EngineReply {
        request: EngineRequest,
        result: std::result::Result<String, EngineFault>,
    },
}

/// Initializes the application event system.
///
/// At most one engine request is in flight, so at most one reply is ever
/// queued.
pub fn init_app_eventsource() -> (UnboundedSender<AppEvent>, UnboundedReceiver<AppEvent>) {
    mpsc::unbounded_channel()
}
