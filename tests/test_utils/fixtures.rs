//! Test Fixtures
//!
//! Common configuration and file helpers for testing

use pathfinder_harness::config::ScenarioConfig;
use pathfinder_harness::Config;
use std::fs;
use std::path::Path;

/// Default configuration writing its files into `output_dir`
pub fn create_test_config(output_dir: &Path) -> Config {
    let mut config = Config::default();
    config.generator.output_dir = output_dir.to_path_buf();
    config.execution.frame_interval_ms = 5;
    config
}

/// Small grids that generate quickly
pub fn create_test_scenarios() -> Vec<ScenarioConfig> {
    vec![
        ScenarioConfig::new("tiny", 10, 10),
        ScenarioConfig::new("narrow", 3, 40),
        ScenarioConfig::new("square", 25, 25),
    ]
}

/// Body lines of a blocked cells file, without the comment header
pub fn read_cell_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
