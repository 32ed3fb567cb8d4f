//! Engine running as a child process.
//!
//! The child is spawned once and kept alive for the whole session. Requests
//! and replies are exchanged as JSON Lines over its stdin/stdout; stderr is
//! forwarded to the log file so it never pollutes the TUI.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{Engine, EngineFault};

/// One request line sent to the engine process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRequest {
    /// `execute_command` or `load_commands_json`
    pub op: String,
    pub text: String,
}

/// One reply line read back from the engine process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireReply {
    Output { output: String },
    Fault { fault: String },
}

struct EngineIo {
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

/// Engine reached through a long-lived child process.
pub struct ProcessEngine {
    name: String,
    io: Mutex<EngineIo>,
    child: Mutex<Child>,
}

impl ProcessEngine {
    /// Spawn `program` with `args` and wire up its standard streams.
    pub fn spawn(program: &str, args: &[String]) -> Result<Self, EngineFault> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            if let Err(e) = child.kill() {
                debug!("Failed to kill engine without pipes: {}", e);
            }
            return Err(EngineFault::Closed);
        };

        if let Some(stderr) = child.stderr.take() {
            let engine_name = program.to_string();
            std::thread::spawn(move || {
                for line in BufReader::new(stderr).lines() {
                    match line {
                        Ok(line) => warn!(engine = %engine_name, "{}", line),
                        Err(_) => break,
                    }
                }
            });
        }

        info!("Spawned engine '{}' (pid {})", program, child.id());

        Ok(Self {
            name: program.to_string(),
            io: Mutex::new(EngineIo {
                stdin,
                stdout: BufReader::new(stdout),
            }),
            child: Mutex::new(child),
        })
    }

    fn call(&self, op: &str, text: &str) -> Result<String, EngineFault> {
        let mut io = self.io.lock().map_err(|_| EngineFault::Poisoned)?;

        let request = serde_json::to_string(&WireRequest {
            op: op.to_string(),
            text: text.to_string(),
        })?;
        writeln!(io.stdin, "{}", request)?;
        io.stdin.flush()?;

        let mut line = String::new();
        if io.stdout.read_line(&mut line)? == 0 {
            return Err(EngineFault::Closed);
        }

        match serde_json::from_str::<WireReply>(line.trim_end())? {
            WireReply::Output { output } => Ok(output),
            WireReply::Fault { fault } => Err(EngineFault::Engine(fault)),
        }
    }
}

impl Engine for ProcessEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute_command(&self, text: &str) -> Result<String, EngineFault> {
        self.call("execute_command", text)
    }

    fn load_commands_json(&self, text: &str) -> Result<String, EngineFault> {
        self.call("load_commands_json", text)
    }

    // Only the child lock is taken here; a stuck `call` holds the io lock
    // and sees EOF once the process is gone.
    fn shutdown(&self) {
        let Ok(mut child) = self.child.lock() else {
            warn!("Engine '{}' lock poisoned, cannot stop it", self.name);
            return;
        };
        match child.kill() {
            Ok(()) => info!("Stopped engine '{}'", self.name),
            Err(e) => debug!("Engine '{}' already stopped: {}", self.name, e),
        }
    }
}

impl Drop for ProcessEngine {
    fn drop(&mut self) {
        if let Ok(child) = self.child.get_mut() {
            if let Err(e) = child.kill() {
                debug!("Engine already stopped: {}", e);
            }
            if let Err(e) = child.wait() {
                debug!("Failed to reap engine process: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    #[test]
    fn test_reply_output_shape() {
        let reply: WireReply = serde_json::from_str(r#"{"output":"Hello bob"}"#).unwrap();
        assert_eq!(reply, WireReply::Output { output: "Hello bob".to_string() });
    }

    #[test]
    fn test_reply_fault_shape() {
        let reply: WireReply = serde_json::from_str(r#"{"fault":"routine panicked"}"#).unwrap();
        assert_eq!(reply, WireReply::Fault { fault: "routine panicked".to_string() });
    }

    #[test]
    fn test_reply_rejects_unknown_shape() {
        assert!(serde_json::from_str::<WireReply>(r#"{"result":1}"#).is_err());
    }

    #[test]
    fn test_request_is_single_line() {
        let line = serde_json::to_string(&WireRequest {
            op: "load_commands_json".to_string(),
            text: "{\n  \"commands\": []\n}".to_string(),
        })
        .unwrap();
        assert!(!line.contains('\n'));
        assert!(line.contains("\"op\":\"load_commands_json\""));
    }

    #[test]
    fn test_spawn_missing_program_faults() {
        let result = ProcessEngine::spawn("definitely-not-an-engine-binary", &[]);
        assert!(matches!(result, Err(EngineFault::Io(_))));
    }

    #[test]
    fn test_shutdown_unblocks_call_to_silent_engine() {
        // `sleep` never answers, so the call blocks until the child dies
        let engine = Arc::new(ProcessEngine::spawn("sleep", &["30".to_string()]).unwrap());
        let caller = {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || engine.execute_command("greet bob"))
        };
        std::thread::sleep(Duration::from_millis(100));

        let started = Instant::now();
        engine.shutdown();
        let result = caller.join().unwrap();

        assert!(result.is_err());
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_shutdown_twice_is_harmless() {
        let engine = ProcessEngine::spawn("sleep", &["30".to_string()]).unwrap();
        engine.shutdown();
        engine.shutdown();
        assert!(engine.execute_command("greet bob").is_err());
    }
}
