//! Scripted Command Runner for Testing

use async_trait::async_trait;
use pathfinder_harness::error::{Error, Result};
use pathfinder_harness::models::{CommandOutput, CommandSpec};
use pathfinder_harness::CommandRunner;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// How the stub answers one program
#[derive(Debug, Clone)]
pub enum StubResponse {
    /// Finish with this status and output
    Output(CommandOutput),
    /// Fail as if the program could not be started
    SpawnFailure(String),
    /// Panic inside the runner
    Panic(String),
}

impl StubResponse {
    pub fn ok(stdout: &str) -> Self {
        StubResponse::Output(CommandOutput {
            exit_code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        })
    }

    pub fn exit(exit_code: i32, stdout: &str, stderr: &str) -> Self {
        StubResponse::Output(CommandOutput {
            exit_code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        })
    }
}

/// Runner answering by program name and recording every call
///
/// Clones share the call log and the script. Unscripted programs succeed
/// with empty output, except `find`, which reports one executable.
#[derive(Debug, Clone, Default)]
pub struct StubRunner {
    calls: Arc<Mutex<Vec<CommandSpec>>>,
    // Keyed by program name, or by the first argument for `make`
    script: Arc<Mutex<HashMap<String, StubResponse>>>,
}

pub const DEFAULT_EXECUTABLE: &str = "../build/debug/pathFinder";

impl StubRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the response for a key, see [`StubRunner::key_for`]
    pub fn respond(self, key: &str, response: StubResponse) -> Self {
        self.script
            .lock()
            .unwrap()
            .insert(key.to_string(), response);
        self
    }

    /// Every command run so far, in order
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    /// Command lines run so far, in order
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.command_line()).collect()
    }

    /// `make clean` is keyed as "clean", other programs by file name
    fn key_for(spec: &CommandSpec) -> String {
        if spec.program == "make" {
            if let Some(target) = spec.args.first() {
                return target.clone();
            }
        }
        spec.program
            .rsplit('/')
            .next()
            .unwrap_or(&spec.program)
            .to_string()
    }
}

#[async_trait]
impl CommandRunner for StubRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(spec.clone());

        let scripted = self.script.lock().unwrap().get(&Self::key_for(spec)).cloned();
        let response = scripted.unwrap_or_else(|| {
            if spec.program == "find" {
                StubResponse::ok(&format!("{}\n", DEFAULT_EXECUTABLE))
            } else {
                StubResponse::ok("")
            }
        });

        match response {
            StubResponse::Output(output) => Ok(output),
            StubResponse::SpawnFailure(reason) => Err(Error::CommandSpawnFailed {
                command: spec.command_line(),
                reason,
            }),
            StubResponse::Panic(message) => panic!("{}", message),
        }
    }
}
