//! Scenario Model
//!
//! A named matrix size class ("small", "medium", ...) resolved against the
//! configuration, together with the blocked cells file that belongs to it.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{Error, Result};

/// One size class ready for generation and execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Lower-case label
    pub label: String,
    pub rows: u32,
    pub cols: u32,
    /// Blocked cells file for this size class
    pub blocked_cells_file: PathBuf,
}

impl Scenario {
    pub fn new(label: impl Into<String>, rows: u32, cols: u32, blocked_cells_file: PathBuf) -> Self {
        Self {
            label: label.into().to_lowercase(),
            rows,
            cols,
            blocked_cells_file,
        }
    }

    pub fn total_cells(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.cols)
    }

    /// Path length handed to the executable: `floor(rows * cols * fraction)`
    pub fn path_length(&self, fraction: f64) -> u64 {
        (self.total_cells() as f64 * fraction).floor() as u64
    }
}

/// Ordered, read-only table of scenarios
#[derive(Debug, Clone, Default)]
pub struct ScenarioSet {
    scenarios: Vec<Scenario>,
}

impl ScenarioSet {
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        Self { scenarios }
    }

    /// Build the table from configuration, deriving each file name
    pub fn from_config(config: &Config) -> Self {
        let scenarios = config
            .scenarios
            .iter()
            .map(|entry| {
                let label = entry.label.trim().to_lowercase();
                let file = config.generator.file_path_for(&label);
                Scenario::new(label, entry.rows, entry.cols, file)
            })
            .collect();
        Self { scenarios }
    }

    /// Labels in configured order
    pub fn labels(&self) -> Vec<String> {
        self.scenarios.iter().map(|s| s.label.clone()).collect()
    }

    /// Look up a label, ignoring case and surrounding whitespace
    pub fn resolve(&self, input: &str) -> Result<&Scenario> {
        let wanted = input.trim().to_lowercase();
        self.scenarios
            .iter()
            .find(|s| s.label == wanted)
            .ok_or_else(|| Error::UnknownScenario {
                label: wanted,
                valid: self.labels(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
