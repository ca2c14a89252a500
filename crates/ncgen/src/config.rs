//! Program configuration.

use serde::{Deserialize, Serialize};

use crate::position::Position;
use crate::positioning::Positioning;

/// Settings applied when a [`Program`](crate::Program) is opened.
///
/// Lengths and feedrates are in `unit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramConfig {
    /// Program name (upper-cased on emission). Generated when unset.
    pub name: Option<String>,
    /// Start position. Defaults to `(0, 0, clearance)`.
    pub start: Option<Position>,
    /// Finish position used by `park`. Defaults to `(0, 0, clearance)`.
    pub finish: Option<Position>,
    /// Unit token (`mm`, `cm`, `dm`, `m`, `in`, `inch`).
    pub unit: String,
    /// Positioning mode.
    pub positioning: Positioning,
    /// Default feedrate (unit per minute).
    pub feedrate: f64,
    /// Safe retract height.
    pub clearance: f64,
    /// Prefix directive lines with `N` words.
    pub line_numbering: bool,
    /// Reject unknown units and non-finite numbers instead of passing them through.
    pub strict: bool,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            name: None,
            start: None,
            finish: None,
            unit: "cm".into(),
            positioning: Positioning::Absolute,
            feedrate: 50.0,
            clearance: 10.0,
            line_numbering: true,
            strict: false,
        }
    }
}

impl ProgramConfig {
    /// Start position, falling back to `(0, 0, clearance)`.
    pub fn start_position(&self) -> Position {
        self.start
            .unwrap_or_else(|| Position::new(0.0, 0.0, self.clearance))
    }

    /// Finish position, falling back to `(0, 0, clearance)`.
    pub fn finish_position(&self) -> Position {
        self.finish
            .unwrap_or_else(|| Position::new(0.0, 0.0, self.clearance))
    }
}
