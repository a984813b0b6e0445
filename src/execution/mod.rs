//! External command execution
//!
//! Every subprocess the harness starts goes through [`CommandRunner`]: run
//! to completion, capture exit status, stdout and stderr. Tests replace
//! [`SystemRunner`] with a stub at this seam.
//!
//! There is no timeout; a hung build or executable blocks the caller.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::process::Command;

use crate::error::{Error, Result};
use crate::models::{CommandOutput, CommandSpec};

/// Runs one external command to completion
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Spawn `spec`, wait for it, and capture its status and output
    ///
    /// A non-zero exit is not an error; only failing to start is.
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput>;
}

#[async_trait]
impl<T: CommandRunner + ?Sized> CommandRunner for Arc<T> {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        (**self).run(spec).await
    }
}

/// Runner backed by real processes
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    /// Extra environment variables for every command
    env_vars: HashMap<String, String>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set environment variable
    pub fn set_env(&mut self, key: String, value: String) {
        self.env_vars.insert(key, value);
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        debug!("Running: {}", spec);

        let mut command = Command::new(&spec.program);
        command.args(&spec.args).envs(&self.env_vars);
        if let Some(dir) = &spec.working_dir {
            command.current_dir(dir);
        }

        let output = command
            .output()
            .await
            .map_err(|e| Error::CommandSpawnFailed {
                command: spec.command_line(),
                reason: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let exit_code = output.status.code().unwrap_or(-1);

        debug!("{} exited with code {}", spec.program, exit_code);
        Ok(CommandOutput {
            exit_code,
            stdout,
            stderr,
        })
    }
}
