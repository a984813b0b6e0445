//! Run report printed after the execution step

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::models::{Scenario, StepResult};

/// Width of the closing separator line
const SEPARATOR_WIDTH: usize = 50;

/// Everything shown to the user about the final execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub scenario: String,
    pub rows: u32,
    pub cols: u32,
    pub path_length: u64,
    /// Exact command line that was executed
    pub command_line: String,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

impl RunReport {
    pub fn new(scenario: &Scenario, path_length: u64, result: &StepResult) -> Self {
        Self {
            scenario: scenario.label.clone(),
            rows: scenario.rows,
            cols: scenario.cols,
            path_length,
            command_line: result.command.command_line(),
            exit_code: result.output.exit_code,
            stdout: result.output.stdout.clone(),
            stderr: result.output.stderr.clone(),
            duration: result.duration,
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

impl fmt::Display for RunReport {
    /// Stdout is always shown, stderr only for a failed run
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Results for {} matrix ===", self.scenario)?;
        writeln!(f, "Command: {}", self.command_line)?;
        writeln!(f, "Exit code: {}", self.exit_code)?;
        writeln!(f, "Output:\n{}", self.stdout)?;
        if !self.success() {
            writeln!(f, "Error output:\n{}", self.stderr)?;
        }
        write!(f, "{}", "-".repeat(SEPARATOR_WIDTH))
    }
}
