//! Pathfinder Harness command line
//!
//! Generates the blocked cells files for every configured scenario, then
//! cleans, builds, locates and runs the external pathfinding program for
//! one scenario chosen interactively or with `--scenario`.

use std::env;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use pathfinder_harness::config::loader::{ConfigFormat, ConfigLoader};
use pathfinder_harness::orchestrator::{FixedPrompt, LinePrompt};
use pathfinder_harness::{
    Config, Console, CoordinateSetGenerator, PipelineOutcome, ProcessOrchestrator, ScenarioSet,
    SystemRunner,
};

#[derive(Parser)]
#[command(name = "pathfinder-harness")]
#[command(version)]
#[command(about = "Generate blocked cells files and run the pathFinder executable against them")]
struct Cli {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, global = true, env = "PATHFINDER_HARNESS_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate blocked cells files only
    Generate {
        /// Override the base random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Override the blocked fraction (at most 0.5)
        #[arg(long)]
        fraction: Option<f64>,
    },

    /// Generate files, then clean, build and run the executable (default)
    Run {
        /// Scenario label; prompts on stdin when omitted
        #[arg(short, long)]
        scenario: Option<String>,
    },

    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    info!("Starting {} v{}", pathfinder_harness::NAME, pathfinder_harness::VERSION);
    let mut config = load_configuration(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Run { scenario: None }) {
        Commands::Config => {
            print!("{}", ConfigLoader::render(&config, ConfigFormat::Toml)?);
        }
        Commands::Generate { seed, fraction } => {
            if let Some(seed) = seed {
                config.generator.seed = seed;
            }
            if let Some(fraction) = fraction {
                config.generator.fraction = fraction;
            }
            config.validate().context("Invalid generator overrides")?;
            generate_files(&config)?;
        }
        Commands::Run { scenario } => {
            generate_files(&config)?;
            let outcome = run_pipeline(&config, scenario).await;
            if !outcome.is_success() {
                process::exit(1);
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so they never interleave with the spinner line
fn init_logging(debug_flag: bool) {
    let debug_env = env::var("PATHFINDER_HARNESS_DEBUG")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let log_level = if debug_flag || debug_env { "debug" } else { "info" };

    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Explicit files must load; searched locations fall back to defaults
fn load_configuration(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        debug!("Loading config from: {}", path.display());
        return ConfigLoader::load_from_path(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()));
    }

    match ConfigLoader::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            warn!("Failed to load configuration: {}. Using defaults", e);
            Ok(Config::default())
        }
    }
}

fn generate_files(config: &Config) -> Result<()> {
    println!("=== Blocked Cells Coordinate Generator ===");
    println!("Generating test files for pathfinding algorithm validation\n");

    let generator = CoordinateSetGenerator::from_settings(&config.generator);
    let outcomes = generator
        .generate_all(&ScenarioSet::from_config(config))
        .context("Blocked cells generation failed")?;
    for outcome in outcomes {
        println!("{}", outcome);
    }
    Ok(())
}

async fn run_pipeline(config: &Config, scenario: Option<String>) -> PipelineOutcome {
    println!("\n=== Running Pathfinding Tests ===");

    let mut orchestrator = ProcessOrchestrator::new(SystemRunner::new(), config, Console::stdout());
    match scenario {
        Some(label) => orchestrator.run(&mut FixedPrompt::new(label)).await,
        None => orchestrator.run(&mut LinePrompt::stdin()).await,
    }
}
