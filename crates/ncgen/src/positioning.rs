//! Positioning mode (absolute or relative coordinates).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::code::Opcode;
use crate::error::ProgramError;

/// How target coordinates are interpreted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "PositioningToken")]
pub enum Positioning {
    /// Coordinates are relative to the program origin (`G90`).
    #[default]
    Absolute,
    /// Coordinates are relative to the current position (`G91`).
    Relative,
}

impl Positioning {
    /// Parse `absolute`, `relative`, `0` or `1` (case-insensitive).
    pub fn parse(token: &str) -> Result<Self, ProgramError> {
        match token.trim().to_ascii_lowercase().as_str() {
            "absolute" | "0" => Ok(Positioning::Absolute),
            "relative" | "1" => Ok(Positioning::Relative),
            _ => Err(ProgramError::UnknownPositioning(token.to_string())),
        }
    }

    /// Numeric code used by configuration files (0 absolute, 1 relative).
    pub fn from_code(code: i64) -> Result<Self, ProgramError> {
        match code {
            0 => Ok(Positioning::Absolute),
            1 => Ok(Positioning::Relative),
            other => Err(ProgramError::UnknownPositioning(other.to_string())),
        }
    }

    /// The positioning-mode opcode (`G90` or `G91`).
    pub fn opcode(self) -> Opcode {
        match self {
            Positioning::Absolute => Opcode::Absolute,
            Positioning::Relative => Opcode::Relative,
        }
    }
}

impl fmt::Display for Positioning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Positioning::Absolute => f.write_str("absolute"),
            Positioning::Relative => f.write_str("relative"),
        }
    }
}

/// Raw positioning value as it appears in a configuration file.
#[derive(Deserialize)]
#[serde(untagged)]
enum PositioningToken {
    Code(i64),
    Word(String),
}

impl TryFrom<PositioningToken> for Positioning {
    type Error = ProgramError;

    fn try_from(token: PositioningToken) -> Result<Self, Self::Error> {
        match token {
            PositioningToken::Code(code) => Positioning::from_code(code),
            PositioningToken::Word(word) => Positioning::parse(&word),
        }
    }
}
