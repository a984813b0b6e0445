//! Process orchestration
//!
//! Runs the fixed pipeline against the external project:
//!
//! 1. clean, 2. debug build, 3. locate the built executable,
//! 4. ask which scenario to run, 5. execute it, 6. print the report.
//!
//! Each external step runs with the progress indicator spinning and stops
//! it before anything else is printed. The first failing step aborts the
//! run; nothing is retried or rolled back. Failures never escape
//! [`ProcessOrchestrator::run`]: they are printed and returned as
//! [`PipelineOutcome::Aborted`], and the indicator is stopped on every
//! path, panics included.

pub mod prompt;
pub mod report;

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};

use crate::config::{Config, ExecutionSettings, ProjectSettings};
use crate::console::Console;
use crate::error::{Error, ErrorKind, Result};
use crate::execution::CommandRunner;
use crate::models::{CommandSpec, ProcessStep, Scenario, ScenarioSet, StepResult};
use crate::progress::ProgressIndicator;

pub use prompt::{FixedPrompt, LinePrompt, ScenarioPrompt};
pub use report::RunReport;

/// How a pipeline run ended
#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    /// The executable ran; its own exit code is in the report
    Completed(RunReport),
    /// A step failed before the executable could run
    Aborted {
        step: Option<ProcessStep>,
        kind: ErrorKind,
        message: String,
    },
}

impl PipelineOutcome {
    /// True only when the executable ran and exited with 0
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Completed(report) if report.success())
    }

    pub fn report(&self) -> Option<&RunReport> {
        match self {
            PipelineOutcome::Completed(report) => Some(report),
            PipelineOutcome::Aborted { .. } => None,
        }
    }
}

/// Drives the external project through the pipeline
pub struct ProcessOrchestrator<R: CommandRunner> {
    runner: R,
    project: ProjectSettings,
    execution: ExecutionSettings,
    scenarios: ScenarioSet,
    console: Console,
    indicator: ProgressIndicator,
    current_step: Option<ProcessStep>,
}

impl<R: CommandRunner> ProcessOrchestrator<R> {
    pub fn new(runner: R, config: &Config, console: Console) -> Self {
        let indicator = ProgressIndicator::new(console.clone())
            .with_interval(Duration::from_millis(config.execution.frame_interval_ms));

        Self {
            runner,
            project: config.project.clone(),
            execution: config.execution.clone(),
            scenarios: ScenarioSet::from_config(config),
            console,
            indicator,
            current_step: None,
        }
    }

    pub fn scenarios(&self) -> &ScenarioSet {
        &self.scenarios
    }

    pub fn indicator(&self) -> &ProgressIndicator {
        &self.indicator
    }

    /// Run the whole pipeline, reporting instead of returning failures
    pub async fn run<P: ScenarioPrompt>(&mut self, prompt: &mut P) -> PipelineOutcome {
        self.current_step = None;
        let result = AssertUnwindSafe(self.run_pipeline(prompt))
            .catch_unwind()
            .await;

        // The terminal must not be left animating, whatever happened above
        self.indicator.stop().await;

        let error = match result {
            Ok(Ok(report)) => return PipelineOutcome::Completed(report),
            Ok(Err(e)) => e,
            Err(payload) => Error::Other(panic_message(&*payload)),
        };

        let kind = error.kind();
        let message = match kind {
            ErrorKind::Configuration => error.to_string(),
            ErrorKind::ExternalTool => format!("Error: {}", error),
            ErrorKind::Unexpected => format!("Unexpected error during pipeline: {}", error),
        };
        error!(
            "Pipeline aborted at {}: {}",
            self.current_step
                .map(|s| s.to_string())
                .unwrap_or_else(|| "start".to_string()),
            error
        );
        let _ = self.console.line(&message);

        PipelineOutcome::Aborted {
            step: self.current_step,
            kind,
            message,
        }
    }

    async fn run_pipeline<P: ScenarioPrompt>(&mut self, prompt: &mut P) -> Result<RunReport> {
        self.console.line("Building the project...")?;

        let spec = self.command(&self.project.clean_command)?;
        let clean = self.run_step(ProcessStep::Clean, spec).await?;
        ensure_success(&clean)?;

        let spec = self.command(&self.project.build_command)?;
        let build = self.run_step(ProcessStep::Build, spec).await?;
        ensure_success(&build)?;
        self.console.line("Build successful.")?;

        let executable = self.locate_executable().await?;
        self.console.line(&format!(
            "Found {} executable: {}",
            self.project.executable_name, executable
        ))?;

        let scenario = self.select_scenario(prompt).await?;
        self.console.line(&format!(
            "Running pathfinding test for {} matrix ({}x{})...",
            scenario.label, scenario.rows, scenario.cols
        ))?;

        let path_length = scenario.path_length(self.execution.path_length_fraction);
        let spec = self.execute_spec(&executable, &scenario, path_length);
        let result = self.run_step(ProcessStep::Execute, spec).await?;

        self.current_step = Some(ProcessStep::Report);
        let report = RunReport::new(&scenario, path_length, &result);
        self.console.line(&report.to_string())?;
        Ok(report)
    }

    /// Run one external command with the indicator spinning
    async fn run_step(&mut self, step: ProcessStep, spec: CommandSpec) -> Result<StepResult> {
        self.current_step = Some(step);
        debug!("{} step: {}", step, spec);

        self.indicator.set_message(step.progress_message());
        self.indicator.start();
        let started_at = chrono::Local::now();
        let clock = Instant::now();
        let output = self.runner.run(&spec).await;
        self.indicator.stop().await;

        let output = output?;
        let duration = clock.elapsed();
        info!(
            "{} step finished in {:.2?} with exit code {}",
            step, duration, output.exit_code
        );

        Ok(StepResult {
            step,
            command: spec,
            output,
            started_at,
            duration,
        })
    }

    /// Search the project tree; the first hit in search order wins
    async fn locate_executable(&mut self) -> Result<String> {
        let spec = CommandSpec::new("find").args([
            self.project.root.to_string_lossy().into_owned(),
            "-name".to_string(),
            self.project.executable_name.clone(),
            "-type".to_string(),
            "f".to_string(),
        ]);
        let result = self.run_step(ProcessStep::Locate, spec).await?;

        let mut candidates = result
            .output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty());

        let first = candidates.next().ok_or_else(|| Error::ExecutableNotFound {
            name: self.project.executable_name.clone(),
            search_root: self.project.root.clone(),
        })?;
        let ignored = candidates.count();
        if ignored > 0 {
            warn!("Found {} more candidates, using {}", ignored, first);
        }
        Ok(first.to_string())
    }

    async fn select_scenario<P: ScenarioPrompt>(&mut self, prompt: &mut P) -> Result<Scenario> {
        self.current_step = Some(ProcessStep::SelectScenario);
        self.console.write_str(&format!(
            "Enter matrix size to test ({}): ",
            self.scenarios.labels().join(", ")
        ))?;

        let answer = prompt.read_label().await?;
        let scenario = self.scenarios.resolve(&answer)?.clone();
        debug!("Selected scenario {}", scenario.label);
        Ok(scenario)
    }

    fn execute_spec(&self, executable: &str, scenario: &Scenario, path_length: u64) -> CommandSpec {
        let mut spec = CommandSpec::new(executable).args([
            "--rows".to_string(),
            scenario.rows.to_string(),
            "--cols".to_string(),
            scenario.cols.to_string(),
            "--pathLength".to_string(),
            path_length.to_string(),
            "--blockedCellsFile".to_string(),
            scenario.blocked_cells_file.to_string_lossy().into_owned(),
        ]);
        if let Some(points) = self.execution.max_starting_points {
            spec = spec.args(["--maxStartingPoints".to_string(), points.to_string()]);
        }
        if self.execution.enable_measurement {
            spec = spec.arg("--enableMeasurement");
        }
        spec
    }

    /// Project command from argv, run in the project root
    fn command(&self, argv: &[String]) -> Result<CommandSpec> {
        let spec = CommandSpec::from_argv(argv).ok_or_else(|| Error::ConfigValidationFailed {
            field: "project".to_string(),
            reason: "command must not be empty".to_string(),
        })?;
        Ok(spec.current_dir(&self.project.root))
    }
}

fn ensure_success(result: &StepResult) -> Result<()> {
    if result.success() {
        return Ok(());
    }
    Err(Error::StepFailed {
        step: result.step,
        exit_code: result.output.exit_code,
        stderr: result.output.stderr.trim_end().to_string(),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with a non-string payload".to_string()
    }
}
