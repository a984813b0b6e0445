//! Blocked cells file format
//!
//! ```text
//! # Blocked cells coordinates for pathfinding tests
//! # Format: row,col (0-indexed)
//! # Matrix size: <rows>x<cols>
//! <row>,<col>
//! ```
//!
//! Body lines are sorted ascending by `(row, col)` and never repeat.

use once_cell::sync::OnceCell;
use regex::Regex;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::{BlockedCellSet, BlockedCellsHeader, Cell};

pub const TITLE_LINE: &str = "# Blocked cells coordinates for pathfinding tests";
pub const FORMAT_LINE: &str = "# Format: row,col (0-indexed)";

struct Patterns {
    matrix_size: Regex,
    cell: Regex,
}

impl Patterns {
    fn compile() -> Result<Self> {
        Ok(Self {
            matrix_size: Regex::new(r"^#\s*Matrix size:\s*(\d+)x(\d+)\s*$")?,
            cell: Regex::new(r"^(\d+),(\d+)$")?,
        })
    }
}

static PATTERNS: OnceCell<Patterns> = OnceCell::new();

fn patterns() -> Result<&'static Patterns> {
    PATTERNS.get_or_try_init(Patterns::compile)
}

/// Why a blocked cells file was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    #[error("cell listed before the matrix size header")]
    CellBeforeHeader,

    #[error("expected 'row,col', got '{0}'")]
    NotACell(String),

    #[error("index {0} does not fit in 32 bits")]
    IndexOverflow(String),

    #[error("cell {cell} outside {rows}x{cols} matrix")]
    OutOfBounds { cell: Cell, rows: u32, cols: u32 },

    #[error("duplicate cell {0}")]
    Duplicate(Cell),

    #[error("cell {cell} listed after {previous}")]
    Unsorted { cell: Cell, previous: Cell },

    #[error("missing matrix size header")]
    MissingHeader,
}

/// Contents of a parsed blocked cells file
#[derive(Debug, Clone)]
pub struct BlockedCellsFile {
    pub header: BlockedCellsHeader,
    /// Cells in file order, which is ascending
    pub cells: Vec<Cell>,
}

/// Write header and sorted body
///
/// The file is written next to its destination and renamed into place, so
/// an interrupted write never leaves a truncated file behind for the
/// reuse check to trust.
pub fn write_blocked_cells(path: &Path, cells: &BlockedCellSet) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let staging = staging_path(path);
    let written = write_to(&staging, cells);
    if let Err(e) = written {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }
    fs::rename(&staging, path)?;
    Ok(())
}

fn write_to(path: &Path, cells: &BlockedCellSet) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{}", TITLE_LINE)?;
    writeln!(writer, "{}", FORMAT_LINE)?;
    writeln!(writer, "# Matrix size: {}x{}", cells.rows(), cells.cols())?;
    for cell in cells.sorted() {
        writeln!(writer, "{}", cell)?;
    }
    writer.flush()?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

/// Read only the dimensions recorded in the header
///
/// Returns `None` when the header comment block carries no matrix size.
pub fn read_header(path: &Path) -> Result<Option<BlockedCellsHeader>> {
    let patterns = patterns()?;
    let reader = BufReader::new(File::open(path)?);

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.starts_with('#') {
            break;
        }
        if let Some(header) = parse_matrix_size(patterns, trimmed) {
            return Ok(Some(header));
        }
    }

    Ok(None)
}

/// Parse and check a whole file
///
/// Rejects a missing matrix size, lines that are not `row,col`, cells
/// outside the recorded dimensions, repeated cells and unsorted bodies.
/// Blank lines and `#` comments are skipped.
pub fn read_blocked_cells(path: &Path) -> Result<BlockedCellsFile> {
    let patterns = patterns()?;
    let reader = BufReader::new(File::open(path)?);
    let malformed = |line: usize, reason: LineError| Error::MalformedBlockedCells {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut header: Option<BlockedCellsHeader> = None;
    let mut cells: Vec<Cell> = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('#') {
            if header.is_none() {
                header = parse_matrix_size(patterns, trimmed);
            }
            continue;
        }

        let dims = header.ok_or_else(|| malformed(line_no, LineError::CellBeforeHeader))?;
        let captures = patterns
            .cell
            .captures(trimmed)
            .ok_or_else(|| malformed(line_no, LineError::NotACell(trimmed.to_string())))?;
        let row = parse_index(&captures[1])
            .ok_or_else(|| malformed(line_no, LineError::IndexOverflow(captures[1].to_string())))?;
        let col = parse_index(&captures[2])
            .ok_or_else(|| malformed(line_no, LineError::IndexOverflow(captures[2].to_string())))?;
        let cell = Cell::new(row, col);

        if !cell.within(dims.rows, dims.cols) {
            return Err(malformed(
                line_no,
                LineError::OutOfBounds {
                    cell,
                    rows: dims.rows,
                    cols: dims.cols,
                },
            ));
        }
        if let Some(&previous) = cells.last() {
            if previous == cell {
                return Err(malformed(line_no, LineError::Duplicate(cell)));
            }
            if previous > cell {
                return Err(malformed(line_no, LineError::Unsorted { cell, previous }));
            }
        }
        cells.push(cell);
    }

    let header = header.ok_or_else(|| malformed(0, LineError::MissingHeader))?;
    Ok(BlockedCellsFile { header, cells })
}

fn parse_matrix_size(patterns: &Patterns, line: &str) -> Option<BlockedCellsHeader> {
    let captures = patterns.matrix_size.captures(line)?;
    Some(BlockedCellsHeader {
        rows: parse_index(&captures[1])?,
        cols: parse_index(&captures[2])?,
    })
}

fn parse_index(digits: &str) -> Option<u32> {
    digits.parse().ok()
}
