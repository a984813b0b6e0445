//! Configuration management for the harness
//!
//! Defaults reproduce the stock scenario table (small/medium/large at a
//! 45% blocked fraction) and the `make`-driven external project layout.
//! Every section can be overridden from a TOML or JSON file, see
//! [`loader::ConfigLoader`].

pub mod loader;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Largest dimension the external executable accepts (16-bit unsigned)
pub const MAX_DIMENSION: u32 = u16::MAX as u32;

/// Highest blocked fraction accepted from configuration
pub const MAX_CONFIGURED_FRACTION: f64 = 0.5;

/// Placeholder replaced by the scenario label in `file_pattern`
pub const LABEL_PLACEHOLDER: &str = "{label}";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Blocked cells generation
    pub generator: GeneratorSettings,

    /// External project commands
    pub project: ProjectSettings,

    /// Execution step parameters
    pub execution: ExecutionSettings,

    /// Size classes, in prompt order
    pub scenarios: Vec<ScenarioConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generator: GeneratorSettings::default(),
            project: ProjectSettings::default(),
            execution: ExecutionSettings::default(),
            scenarios: vec![
                ScenarioConfig::new("small", 100, 100),
                ScenarioConfig::new("medium", 200, 200),
                ScenarioConfig::new("large", 500, 500),
            ],
        }
    }
}

impl Config {
    /// Check every section, reporting the first offending field
    pub fn validate(&self) -> Result<()> {
        self.generator.validate()?;
        self.project.validate()?;
        self.execution.validate()?;

        if self.scenarios.is_empty() {
            return Err(invalid("scenarios", "at least one scenario is required"));
        }

        let mut seen = HashSet::new();
        for (index, scenario) in self.scenarios.iter().enumerate() {
            let label = scenario.label.trim().to_lowercase();
            if label.is_empty() {
                return Err(invalid(
                    &format!("scenarios[{}].label", index),
                    "label must not be empty",
                ));
            }
            if !seen.insert(label.clone()) {
                return Err(invalid(
                    &format!("scenarios[{}].label", index),
                    &format!("duplicate label '{}'", label),
                ));
            }
            for (name, value) in [("rows", scenario.rows), ("cols", scenario.cols)] {
                if value == 0 || value > MAX_DIMENSION {
                    return Err(invalid(
                        &format!("scenarios[{}].{}", index, name),
                        &format!("must be between 1 and {}, got {}", MAX_DIMENSION, value),
                    ));
                }
            }
        }

        Ok(())
    }
}

/// What to do when a scenario's blocked cells file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReusePolicy {
    /// Keep any existing file untouched
    Trust,
    /// Keep the file only when its header records the requested dimensions
    #[default]
    VerifyHeader,
}

/// Blocked cells generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Share of cells to block
    pub fraction: f64,

    /// Base seed; scenario `i` samples with `seed + i`
    pub seed: u64,

    /// Directory the files are written to
    pub output_dir: PathBuf,

    /// File name pattern, `{label}` is replaced by the scenario label
    pub file_pattern: String,

    /// Handling of files left by an earlier run
    pub reuse: ReusePolicy,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            fraction: 0.45,
            seed: 42,
            output_dir: PathBuf::from("."),
            file_pattern: "blocked_cells_{label}.txt".to_string(),
            reuse: ReusePolicy::VerifyHeader,
        }
    }
}

impl GeneratorSettings {
    /// Blocked cells file for a scenario label
    pub fn file_path_for(&self, label: &str) -> PathBuf {
        self.output_dir
            .join(self.file_pattern.replace(LABEL_PLACEHOLDER, label))
    }

    fn validate(&self) -> Result<()> {
        if !self.fraction.is_finite() || self.fraction <= 0.0 || self.fraction > MAX_CONFIGURED_FRACTION
        {
            return Err(invalid(
                "generator.fraction",
                &format!(
                    "must be in (0, {}], got {}",
                    MAX_CONFIGURED_FRACTION, self.fraction
                ),
            ));
        }
        if !self.file_pattern.contains(LABEL_PLACEHOLDER) {
            return Err(invalid(
                "generator.file_pattern",
                "must contain the {label} placeholder",
            ));
        }
        Ok(())
    }
}

/// External project settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    /// Project root, working directory of clean/build and root of the search
    pub root: PathBuf,

    /// Clean command, argv style
    pub clean_command: Vec<String>,

    /// Debug build command, argv style
    pub build_command: Vec<String>,

    /// File name of the built executable
    pub executable_name: String,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from(".."),
            clean_command: vec!["make".to_string(), "clean".to_string()],
            build_command: vec!["make".to_string(), "build_debug".to_string()],
            executable_name: "pathFinder".to_string(),
        }
    }
}

impl ProjectSettings {
    fn validate(&self) -> Result<()> {
        if self.clean_command.is_empty() {
            return Err(invalid("project.clean_command", "command must not be empty"));
        }
        if self.build_command.is_empty() {
            return Err(invalid("project.build_command", "command must not be empty"));
        }
        if self.executable_name.trim().is_empty() {
            return Err(invalid("project.executable_name", "name must not be empty"));
        }
        Ok(())
    }
}

/// Parameters of the final execution step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionSettings {
    /// Path length as a share of all cells
    pub path_length_fraction: f64,

    /// Pass `--enableMeasurement`
    pub enable_measurement: bool,

    /// Pass `--maxStartingPoints N` when set
    pub max_starting_points: Option<u32>,

    /// Spinner frame interval in milliseconds
    pub frame_interval_ms: u64,
}

impl Default for ExecutionSettings {
    fn default() -> Self {
        Self {
            path_length_fraction: 0.01,
            enable_measurement: true,
            max_starting_points: None,
            frame_interval_ms: 100,
        }
    }
}

impl ExecutionSettings {
    fn validate(&self) -> Result<()> {
        if !self.path_length_fraction.is_finite()
            || self.path_length_fraction <= 0.0
            || self.path_length_fraction > 1.0
        {
            return Err(invalid(
                "execution.path_length_fraction",
                &format!("must be in (0, 1], got {}", self.path_length_fraction),
            ));
        }
        if self.frame_interval_ms == 0 {
            return Err(invalid("execution.frame_interval_ms", "must be positive"));
        }
        Ok(())
    }
}

/// One size class as written in the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub label: String,
    pub rows: u32,
    pub cols: u32,
}

impl ScenarioConfig {
    pub fn new(label: &str, rows: u32, cols: u32) -> Self {
        Self {
            label: label.to_string(),
            rows,
            cols,
        }
    }
}

fn invalid(field: &str, reason: &str) -> Error {
    Error::ConfigValidationFailed {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
