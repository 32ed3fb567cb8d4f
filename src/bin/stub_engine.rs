//! Minimal command engine speaking the console's JSON Lines protocol.
//!
//! Reads one request per line from stdin and writes one reply per line to
//! stdout. Commands are only known after a schema document naming them has
//! been loaded; each command's `routine` picks its behavior.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::{debug, info, warn};

use repl_console::engine::{WireReply, WireRequest};
use repl_console::schema::CommandSchemaDocument;

#[derive(Default)]
struct StubEngine {
    // qualified name -> routine
    commands: HashMap<String, String>,
}

impl StubEngine {
    fn handle(&mut self, request: WireRequest) -> WireReply {
        match request.op.as_str() {
            "load_commands_json" => self.load(&request.text),
            "execute_command" => self.execute(&request.text),
            other => WireReply::Fault {
                fault: format!("unsupported operation: {}", other),
            },
        }
    }

    fn load(&mut self, text: &str) -> WireReply {
        let document: CommandSchemaDocument = match serde_json::from_str(text) {
            Ok(document) => document,
            Err(e) => {
                return WireReply::Output {
                    output: format!("❌ parse error: {}", e),
                };
            }
        };

        let count = document.commands.len();
        for command in document.commands {
            debug!("Registering {} -> {}", command.qualified_name(), command.routine);
            self.commands.insert(command.qualified_name(), command.routine);
        }
        info!("Loaded {} command(s)", count);
        WireReply::Output {
            output: format!("✅ Loaded {} command(s)", count),
        }
    }

    fn execute(&self, text: &str) -> WireReply {
        let (word, rest) = match text.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (text, ""),
        };

        let Some(routine) = self.commands.get(word) else {
            return WireReply::Output {
                output: format!("❌ Unknown command: {}", word),
            };
        };

        match routine.as_str() {
            "greet" => WireReply::Output {
                output: format!("Hello {}", rest),
            },
            "echo" => WireReply::Output {
                output: rest.to_string(),
            },
            "fault" => WireReply::Fault {
                fault: format!("routine for '{}' crashed", word),
            },
            other => WireReply::Output {
                output: format!("❌ Routine not available: {}", other),
            },
        }
    }
}

fn main() -> Result<()> {
    // stdout carries the protocol, so diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let mut engine = StubEngine::default();
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let reply = match serde_json::from_str::<WireRequest>(&line) {
            Ok(request) => engine.handle(request),
            Err(e) => {
                warn!("Malformed request: {}", e);
                WireReply::Fault {
                    fault: format!("malformed request: {}", e),
                }
            }
        };
        writeln!(stdout, "{}", serde_json::to_string(&reply)?)?;
        stdout.flush()?;
    }
    Ok(())
}
