//! Core data models for the harness
//!
//! Grid coordinates and the blocked cell set produced by the generator,
//! scenario definitions shared by generator and orchestrator, and the
//! step/result records of one pipeline run.

pub mod cell;
pub mod scenario;
pub mod step;

// Re-exports for convenience
pub use cell::{BlockedCellSet, BlockedCellsHeader, Cell};
pub use scenario::{Scenario, ScenarioSet};
pub use step::{CommandOutput, CommandSpec, ProcessStep, StepResult};
