//! Error types for program generation.

use thiserror::Error;

/// Errors that can occur while building or loading a program.
#[derive(Error, Debug)]
pub enum ProgramError {
    /// Unit token outside `mm`, `cm`, `dm`, `m`, `in`, `inch` (strict mode).
    #[error("unknown unit: {0:?}")]
    UnknownUnit(String),

    /// Positioning token other than `absolute`, `relative`, `0` or `1`.
    #[error("unknown positioning mode: {0:?}")]
    UnknownPositioning(String),

    /// Position list with no coordinates or more than three.
    #[error("invalid position: {0}")]
    InvalidPosition(String),

    /// NaN or infinite numeric input (strict mode).
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Which input carried the value.
        field: &'static str,
        /// The offending value.
        value: f64,
    },

    /// A directive was issued after the program was terminated.
    #[error("program is closed")]
    Closed,

    /// I/O error reading a job file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML job file.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed JSON job file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProgramError {
    /// Create a non-finite input error.
    pub fn non_finite(field: &'static str, value: f64) -> Self {
        Self::NonFinite { field, value }
    }
}

/// Result type for program operations.
pub type Result<T> = std::result::Result<T, ProgramError>;
