//! Integration Tests for Configuration Loading
//!
//! Files are written to temporary directories and read back through the
//! public loader, the way the binary does it.

use pathfinder_harness::config::loader::{ConfigFormat, LoadOptions};
use pathfinder_harness::config::{ReusePolicy, ScenarioConfig};
use pathfinder_harness::error::{Error, ErrorKind};
use pathfinder_harness::{Config, ConfigLoader, ScenarioSet};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_toml_overrides_merge_with_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("harness.toml");
    fs::write(
        &path,
        r#"
[generator]
fraction = 0.3
seed = 99
output_dir = "data"
reuse = "trust"

[project]
root = "/opt/pathfinder"
build_command = ["cmake", "--build", "build"]

[execution]
max_starting_points = 4
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_path(&path).unwrap();
    assert_eq!(config.generator.fraction, 0.3);
    assert_eq!(config.generator.seed, 99);
    assert_eq!(config.generator.reuse, ReusePolicy::Trust);
    assert_eq!(config.project.root, PathBuf::from("/opt/pathfinder"));
    assert_eq!(config.project.build_command, vec!["cmake", "--build", "build"]);
    assert_eq!(config.project.clean_command, vec!["make", "clean"]);
    assert_eq!(config.execution.max_starting_points, Some(4));
    assert!(config.execution.enable_measurement);
    assert_eq!(config.scenarios.len(), 3);

    let scenarios = ScenarioSet::from_config(&config);
    assert_eq!(
        scenarios.resolve("medium").unwrap().blocked_cells_file,
        PathBuf::from("data/blocked_cells_medium.txt")
    );
}

#[test]
fn test_json_config_with_custom_scenarios() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("harness.json");
    fs::write(
        &path,
        r#"{
  "scenarios": [
    { "label": "Tiny", "rows": 8, "cols": 8 },
    { "label": "wide", "rows": 10, "cols": 300 }
  ]
}"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_path(&path).unwrap();
    assert_eq!(
        config.scenarios,
        vec![
            ScenarioConfig::new("Tiny", 8, 8),
            ScenarioConfig::new("wide", 10, 300)
        ]
    );

    let scenarios = ScenarioSet::from_config(&config);
    assert_eq!(scenarios.labels(), vec!["tiny", "wide"]);
    let err = scenarios.resolve("small").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid size 'small'. Valid options are: tiny, wide"
    );
}

#[test]
fn test_invalid_values_are_configuration_errors() {
    let temp_dir = TempDir::new().unwrap();
    let cases = [
        ("fraction.toml", "[generator]\nfraction = 0.0\n"),
        ("pattern.toml", "[generator]\nfile_pattern = \"cells.txt\"\n"),
        ("clean.toml", "[project]\nclean_command = []\n"),
        ("empty.toml", "scenarios = []\n"),
        (
            "size.toml",
            "[[scenarios]]\nlabel = \"huge\"\nrows = 100000\ncols = 10\n",
        ),
    ];

    for (name, content) in cases {
        let path = temp_dir.path().join(name);
        fs::write(&path, content).unwrap();
        let err = ConfigLoader::load_from_path(&path).unwrap_err();
        assert!(
            matches!(err, Error::ConfigValidationFailed { .. }),
            "{} gave {:?}",
            name,
            err
        );
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = ConfigLoader::load_from_path(&temp_dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::ConfigLoadFailed { .. }));
}

#[test]
fn test_search_prefers_toml_over_json() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path().join("pathfinder-harness");

    let mut toml_config = Config::default();
    toml_config.generator.seed = 1;
    ConfigLoader::save_to_path(&toml_config, &base.with_extension("toml")).unwrap();
    let mut json_config = Config::default();
    json_config.generator.seed = 2;
    ConfigLoader::save_to_path(&json_config, &base.with_extension("json")).unwrap();

    let mut loader = ConfigLoader::new();
    loader.set_search_path(base);
    let loaded = loader.load_with_options(LoadOptions::default()).unwrap();
    assert_eq!(loaded.generator.seed, 1);
}

#[test]
fn test_broken_search_file_falls_through_to_default() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path().join("pathfinder-harness");
    fs::write(base.with_extension("toml"), "not = [valid").unwrap();

    let mut loader = ConfigLoader::new();
    loader.set_search_path(base);
    let loaded = loader.load_with_options(LoadOptions::default()).unwrap();
    assert_eq!(loaded.generator.seed, 42);
}

#[test]
fn test_rendered_config_round_trips() {
    let mut config = Config::default();
    config.execution.max_starting_points = Some(12);
    config.generator.reuse = ReusePolicy::Trust;

    let rendered = ConfigLoader::render(&config, ConfigFormat::Toml).unwrap();
    assert!(rendered.contains("reuse = \"trust\""));
    assert!(rendered.contains("executable_name = \"pathFinder\""));

    let parsed: Config = toml::from_str(&rendered).unwrap();
    assert_eq!(parsed.execution.max_starting_points, Some(12));
    assert_eq!(parsed.scenarios, config.scenarios);
}
