//! Blocked cells generation
//!
//! Samples a fixed number of unique cells uniformly from a grid by
//! rejection sampling and persists them with [`file::write_blocked_cells`].
//! Sampling is driven by a seeded ChaCha generator, so a given seed always
//! yields the same file.
//!
//! Rejection sampling needs about `target / (1 - fraction)` draws, which
//! stays cheap for the fractions configuration allows (at most 0.5).
//! Targets that cannot be met at all are refused before the first draw.

pub mod file;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::path::{Path, PathBuf};

pub use crate::config::ReusePolicy;
use crate::config::{GeneratorSettings, MAX_DIMENSION};
use crate::error::{Error, Result};
use crate::models::{BlockedCellSet, BlockedCellsHeader, Cell, Scenario, ScenarioSet};

pub use file::{
    read_blocked_cells, read_header, write_blocked_cells, BlockedCellsFile, LineError,
};

/// Number of cells to block: `floor(rows * cols * fraction)`
///
/// Fails for empty or oversized grids, negative or non-finite fractions,
/// fractions of 1.0 and above, and any target larger than the grid.
pub fn target_count(rows: u32, cols: u32, fraction: f64) -> Result<u64> {
    if rows == 0 || cols == 0 || rows > MAX_DIMENSION || cols > MAX_DIMENSION {
        return Err(Error::InvalidDimensions { rows, cols });
    }
    if !fraction.is_finite() || fraction < 0.0 {
        return Err(Error::InvalidFraction { fraction });
    }

    let total = u64::from(rows) * u64::from(cols);
    let target = (total as f64 * fraction).floor() as u64;
    if fraction >= 1.0 || target > total {
        return Err(Error::ImpossibleTarget {
            rows,
            cols,
            fraction,
            target,
        });
    }
    Ok(target)
}

/// What a generation request ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// A new file was written
    Generated { path: PathBuf, count: usize },
    /// An existing file was kept as-is
    Skipped { path: PathBuf },
    /// An existing file recorded other dimensions and was replaced
    Regenerated {
        path: PathBuf,
        count: usize,
        previous: Option<BlockedCellsHeader>,
    },
}

impl GenerationOutcome {
    pub fn path(&self) -> &Path {
        match self {
            GenerationOutcome::Generated { path, .. }
            | GenerationOutcome::Skipped { path }
            | GenerationOutcome::Regenerated { path, .. } => path,
        }
    }

    pub fn was_written(&self) -> bool {
        !matches!(self, GenerationOutcome::Skipped { .. })
    }
}

impl fmt::Display for GenerationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationOutcome::Generated { path, count } => write!(
                f,
                "Generated {} with {} unique blocked cell coordinates.",
                path.display(),
                count
            ),
            GenerationOutcome::Skipped { path } => write!(
                f,
                "File {} already exists. Skipping generation.",
                path.display()
            ),
            GenerationOutcome::Regenerated {
                path,
                count,
                previous,
            } => {
                let previous = previous
                    .map(|h| format!("{}x{}", h.rows, h.cols))
                    .unwrap_or_else(|| "unknown size".to_string());
                write!(
                    f,
                    "Regenerated {} ({} on disk) with {} unique blocked cell coordinates.",
                    path.display(),
                    previous,
                    count
                )
            }
        }
    }
}

/// Deterministic blocked cells generator
#[derive(Debug, Clone)]
pub struct CoordinateSetGenerator {
    fraction: f64,
    seed: u64,
    reuse: ReusePolicy,
}

impl CoordinateSetGenerator {
    /// Create a generator with an explicit fraction and seed
    pub fn new(fraction: f64, seed: u64) -> Self {
        Self {
            fraction,
            seed,
            reuse: ReusePolicy::default(),
        }
    }

    pub fn from_settings(settings: &GeneratorSettings) -> Self {
        Self {
            fraction: settings.fraction,
            seed: settings.seed,
            reuse: settings.reuse,
        }
    }

    pub fn with_reuse(mut self, reuse: ReusePolicy) -> Self {
        self.reuse = reuse;
        self
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw unique cells until the target count is reached
    pub fn sample<R: Rng>(&self, rows: u32, cols: u32, rng: &mut R) -> Result<BlockedCellSet> {
        let target = target_count(rows, cols, self.fraction)?;
        if self.fraction > crate::config::MAX_CONFIGURED_FRACTION {
            warn!(
                "Sampling {} cells at fraction {} will need many retries",
                target, self.fraction
            );
        }

        let target = usize::try_from(target)
            .map_err(|_| Error::Other(format!("target {} does not fit in memory", target)))?;
        let mut cells = BlockedCellSet::with_capacity(rows, cols, target);
        let mut draws: u64 = 0;
        while cells.len() < target {
            let cell = Cell::new(rng.random_range(0..rows), rng.random_range(0..cols));
            cells.insert(cell);
            draws += 1;
        }

        debug!(
            "Sampled {} cells for {}x{} in {} draws",
            cells.len(),
            rows,
            cols,
            draws
        );
        Ok(cells)
    }

    /// Produce the file at `path` using this generator's seed
    pub fn generate(&self, rows: u32, cols: u32, path: &Path) -> Result<GenerationOutcome> {
        self.generate_seeded(rows, cols, path, self.seed)
    }

    /// Produce the file for one scenario with an explicit seed
    pub fn generate_scenario(&self, scenario: &Scenario, seed: u64) -> Result<GenerationOutcome> {
        self.generate_seeded(scenario.rows, scenario.cols, &scenario.blocked_cells_file, seed)
    }

    /// Produce every scenario's file; scenario `i` is sampled with `seed + i`
    pub fn generate_all(&self, scenarios: &ScenarioSet) -> Result<Vec<GenerationOutcome>> {
        scenarios
            .iter()
            .enumerate()
            .map(|(index, scenario)| {
                self.generate_scenario(scenario, self.seed.wrapping_add(index as u64))
            })
            .collect()
    }

    fn generate_seeded(&self, rows: u32, cols: u32, path: &Path, seed: u64) -> Result<GenerationOutcome> {
        // Impossible requests fail even when a file is already present
        let target = target_count(rows, cols, self.fraction)?;

        let mut previous = None;
        if path.exists() {
            match self.reuse {
                ReusePolicy::Trust => {
                    info!("File {} already exists. Skipping generation.", path.display());
                    return Ok(GenerationOutcome::Skipped {
                        path: path.to_path_buf(),
                    });
                }
                ReusePolicy::VerifyHeader => {
                    let header = read_header(path)?;
                    if header.is_some_and(|h| h.matches(rows, cols)) {
                        info!("File {} already exists. Skipping generation.", path.display());
                        return Ok(GenerationOutcome::Skipped {
                            path: path.to_path_buf(),
                        });
                    }
                    warn!(
                        "File {} does not describe a {}x{} matrix, regenerating",
                        path.display(),
                        rows,
                        cols
                    );
                    previous = Some(header);
                }
            }
        }

        info!(
            "Generating {} blocked cells for {}x{} matrix.",
            target, rows, cols
        );
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let cells = self.sample(rows, cols, &mut rng)?;
        write_blocked_cells(path, &cells)?;

        let path = path.to_path_buf();
        let count = cells.len();
        Ok(match previous {
            Some(previous) => GenerationOutcome::Regenerated {
                path,
                count,
                previous,
            },
            None => GenerationOutcome::Generated { path, count },
        })
    }
}

impl Default for CoordinateSetGenerator {
    fn default() -> Self {
        Self::from_settings(&GeneratorSettings::default())
    }
}
