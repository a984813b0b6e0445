//! Pipeline Step Model
//!
//! External commands the orchestrator issues and the captured result of
//! each. Results live only for the duration of one run.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Stages of one orchestrator run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessStep {
    Clean,
    Build,
    Locate,
    SelectScenario,
    Execute,
    Report,
}

impl ProcessStep {
    /// Text shown next to the spinner while the step runs
    pub fn progress_message(&self) -> &'static str {
        match self {
            ProcessStep::Clean => "Cleaning",
            ProcessStep::Build => "Building",
            ProcessStep::Locate => "Searching",
            ProcessStep::SelectScenario => "Waiting",
            ProcessStep::Execute => "Running",
            ProcessStep::Report => "Reporting",
        }
    }
}

impl fmt::Display for ProcessStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessStep::Clean => "Clean",
            ProcessStep::Build => "Build",
            ProcessStep::Locate => "Locate",
            ProcessStep::SelectScenario => "Select scenario",
            ProcessStep::Execute => "Execute",
            ProcessStep::Report => "Report",
        };
        write!(f, "{}", name)
    }
}

/// A program with its arguments and optional working directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    /// Build from an argv-style vector; `None` when it is empty
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            working_dir: None,
        })
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Program and arguments joined by single spaces
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command_line())
    }
}

/// Exit status and captured streams of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    /// Exit code, -1 when the process was killed by a signal
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// One step's command together with what it produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub step: ProcessStep,
    pub command: CommandSpec,
    pub output: CommandOutput,
    /// When the step started (in local time)
    pub started_at: DateTime<Local>,
    pub duration: Duration,
}

impl StepResult {
    pub fn success(&self) -> bool {
        self.output.success()
    }
}
