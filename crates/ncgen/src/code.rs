//! Opcode catalogue.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A preparatory (`G`) or miscellaneous (`M`) function word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `G00` rapid positioning.
    Rapid,
    /// `G01` linear feed.
    Linear,
    /// `G20` inch units.
    Inch,
    /// `G21` metric units.
    Metric,
    /// `G90` absolute positioning.
    Absolute,
    /// `G91` relative positioning.
    Relative,
    /// `M00` forced stop.
    ForcedStop,
    /// `M03` spindle clockwise.
    SpindleCw,
    /// `M04` spindle counter-clockwise.
    SpindleCcw,
    /// `M05` spindle stop.
    SpindleStop,
    /// `M07` mist coolant.
    CoolantMist,
    /// `M08` flood coolant.
    CoolantFlood,
    /// `M09` coolant stop.
    CoolantStop,
    /// `M30` program end and rewind.
    ProgramEnd,
}

impl Opcode {
    /// Address letter.
    pub fn letter(self) -> char {
        match self {
            Opcode::Rapid
            | Opcode::Linear
            | Opcode::Inch
            | Opcode::Metric
            | Opcode::Absolute
            | Opcode::Relative => 'G',
            _ => 'M',
        }
    }

    /// Numeric code.
    pub fn number(self) -> u8 {
        match self {
            Opcode::Rapid => 0,
            Opcode::Linear => 1,
            Opcode::Inch => 20,
            Opcode::Metric => 21,
            Opcode::Absolute => 90,
            Opcode::Relative => 91,
            Opcode::ForcedStop => 0,
            Opcode::SpindleCw => 3,
            Opcode::SpindleCcw => 4,
            Opcode::SpindleStop => 5,
            Opcode::CoolantMist => 7,
            Opcode::CoolantFlood => 8,
            Opcode::CoolantStop => 9,
            Opcode::ProgramEnd => 30,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}", self.letter(), self.number())
    }
}

/// Kind of motion block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motion {
    /// Fastest non-cutting move.
    Rapid,
    /// Controlled-speed cutting move.
    Linear,
}

impl Motion {
    /// The opcode for this motion.
    pub fn opcode(self) -> Opcode {
        match self {
            Motion::Rapid => Opcode::Rapid,
            Motion::Linear => Opcode::Linear,
        }
    }
}
