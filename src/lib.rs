//! Pathfinder Harness - reproducible obstacle layouts for an external
//! pathfinding program, and a driver that builds and runs it
//!
//! ## Features
//!
//! - **Blocked cells generation:** unique, uniformly sampled grid cells
//!   written as a sorted `row,col` file with a dimension header
//! - **Reproducible:** sampling is seeded from configuration
//! - **Orchestration:** clean, build, locate and run the external program,
//!   then report its output
//! - **Progress indicator:** a single-line spinner while external steps run
//! - **Configuration:** TOML or JSON files, built-in defaults
//!
//! ## Module Organization
//!
//! - [`generator`] - Blocked cells sampling and the file format
//! - [`orchestrator`] - The clean/build/locate/select/execute/report pipeline
//! - [`progress`] - Spinner with idempotent start/stop
//! - [`execution`] - The subprocess seam (`CommandRunner`)
//! - [`console`] - Output sink shared by spinner and orchestrator
//! - [`config`] - Configuration structures and loading
//! - [`models`] - Cells, scenarios, steps and their results
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use pathfinder_harness::{Config, CoordinateSetGenerator, ScenarioSet};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let generator = CoordinateSetGenerator::from_settings(&config.generator);
//! for outcome in generator.generate_all(&ScenarioSet::from_config(&config))? {
//!     println!("{}", outcome);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! The pipeline is sequential. The only concurrent work is the spinner
//! task, which runs strictly between a `start` and the `stop` that joins
//! it, so it never shares the terminal with foreground output.

#[macro_use]
extern crate tracing;

pub mod config;
pub mod console;
pub mod error;
pub mod execution;
pub mod generator;
pub mod models;
pub mod orchestrator;
pub mod progress;

// Re-exports for core functionality
pub use config::loader::ConfigLoader;
pub use config::Config;
pub use console::Console;
pub use error::{Error, ErrorKind, Result};
pub use execution::{CommandRunner, SystemRunner};
pub use generator::{CoordinateSetGenerator, GenerationOutcome};
pub use models::{Scenario, ScenarioSet};
pub use orchestrator::{PipelineOutcome, ProcessOrchestrator};
pub use progress::ProgressIndicator;

/// The current version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The application name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");
