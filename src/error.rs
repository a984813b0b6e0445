//! Error types and Result aliases for the harness

use std::fmt;
use std::path::PathBuf;

use crate::generator::file::LineError;
use crate::models::ProcessStep;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// Broad failure category, used to decide how an abort is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input detected before any subprocess runs
    Configuration,
    /// An external tool exited non-zero or could not be found
    ExternalTool,
    /// Anything else: filesystem trouble, spawn failures, panics
    Unexpected,
}

/// Main error type for the harness
#[derive(Debug)]
pub enum Error {
    // === Sampling errors ===
    /// Requested number of blocked cells cannot be drawn from the grid
    ImpossibleTarget {
        rows: u32,
        cols: u32,
        fraction: f64,
        target: u64,
    },

    /// Fraction is negative or not a number
    InvalidFraction {
        fraction: f64,
    },

    /// Grid with a zero or oversized dimension
    InvalidDimensions {
        rows: u32,
        cols: u32,
    },

    /// Blocked cells file that does not follow the line format
    MalformedBlockedCells {
        path: PathBuf,
        line: usize,
        reason: LineError,
    },

    // === Scenario errors ===
    /// Label that matches none of the configured scenarios
    UnknownScenario {
        label: String,
        valid: Vec<String>,
    },

    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Configuration file not found
    ConfigNotFound,

    /// Configuration validation failed
    ConfigValidationFailed {
        field: String,
        reason: String,
    },

    /// Failed to serialize configuration
    ConfigSerializationFailed {
        format: String,
        reason: String,
    },

    /// Failed to parse configuration
    ConfigParseFailed {
        format: String,
        reason: String,
    },

    // === External tool errors ===
    /// A pipeline step exited with a non-zero status
    StepFailed {
        step: ProcessStep,
        exit_code: i32,
        stderr: String,
    },

    /// The built executable was not found under the project tree
    ExecutableNotFound {
        name: String,
        search_root: PathBuf,
    },

    /// Failed to spawn an external command
    CommandSpawnFailed {
        command: String,
        reason: String,
    },

    // === I/O and serialization errors ===
    /// I/O errors
    Io(std::io::Error),

    /// Serialization errors
    Serde(serde_json::Error),

    /// TOML parsing errors
    Toml(toml::de::Error),

    /// Regex compilation errors
    Regex(regex::Error),

    /// Generic errors
    Other(String),
}

impl Error {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ImpossibleTarget { .. }
            | Error::InvalidFraction { .. }
            | Error::InvalidDimensions { .. }
            | Error::UnknownScenario { .. }
            | Error::ConfigLoadFailed { .. }
            | Error::ConfigNotFound
            | Error::ConfigValidationFailed { .. }
            | Error::ConfigSerializationFailed { .. }
            | Error::ConfigParseFailed { .. } => ErrorKind::Configuration,

            Error::StepFailed { .. } | Error::ExecutableNotFound { .. } => ErrorKind::ExternalTool,

            Error::MalformedBlockedCells { .. }
            | Error::CommandSpawnFailed { .. }
            | Error::Io(_)
            | Error::Serde(_)
            | Error::Toml(_)
            | Error::Regex(_)
            | Error::Other(_) => ErrorKind::Unexpected,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Sampling errors
            Error::ImpossibleTarget {
                rows,
                cols,
                fraction,
                target,
            } => write!(
                f,
                "Cannot place {} blocked cells (fraction {}) in a {}x{} matrix",
                target, fraction, rows, cols
            ),
            Error::InvalidFraction { fraction } => {
                write!(f, "Blocked fraction must be a non-negative number, got {}", fraction)
            }
            Error::InvalidDimensions { rows, cols } => {
                write!(f, "Invalid matrix dimensions {}x{}", rows, cols)
            }
            Error::MalformedBlockedCells { path, line, reason } => write!(
                f,
                "Malformed blocked cells file '{}' at line {}: {}",
                path.display(),
                line,
                reason
            ),

            // Scenario errors
            Error::UnknownScenario { label, valid } => write!(
                f,
                "Invalid size '{}'. Valid options are: {}",
                label,
                valid.join(", ")
            ),

            // Configuration errors
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path.display(), reason)
            }
            Error::ConfigNotFound => write!(f, "Configuration file not found"),
            Error::ConfigValidationFailed { field, reason } => {
                write!(f, "Configuration validation failed for '{}': {}", field, reason)
            }
            Error::ConfigSerializationFailed { format, reason } => {
                write!(f, "Failed to serialize config as {}: {}", format, reason)
            }
            Error::ConfigParseFailed { format, reason } => {
                write!(f, "Failed to parse {} config: {}", format, reason)
            }

            // External tool errors
            Error::StepFailed {
                step: ProcessStep::Clean,
                stderr,
                ..
            } => write!(f, "Clean failed: {}", stderr),
            Error::StepFailed {
                step: ProcessStep::Build,
                exit_code,
                stderr,
            } => write!(
                f,
                "Build failed with code {}\nBuild errors:\n{}",
                exit_code, stderr
            ),
            Error::StepFailed {
                step,
                exit_code,
                stderr,
            } => write!(f, "{} step failed with code {}: {}", step, exit_code, stderr),
            Error::ExecutableNotFound { name, search_root } => write!(
                f,
                "{} executable not found under '{}'",
                name,
                search_root.display()
            ),
            Error::CommandSpawnFailed { command, reason } => {
                write!(f, "Failed to spawn command '{}': {}", command, reason)
            }

            // I/O and serialization errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serde(err) => write!(f, "Serialization error: {}", err),
            Error::Toml(err) => write!(f, "TOML parsing error: {}", err),
            Error::Regex(err) => write!(f, "Regex compilation error: {}", err),

            // Generic fallback
            Error::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Serde(err) => Some(err),
            Error::Toml(err) => Some(err),
            Error::Regex(err) => Some(err),
            Error::MalformedBlockedCells { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Regex(err)
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Other(err.to_string())
    }
}
