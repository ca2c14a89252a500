//! Unit systems and scaling to machine units.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::code::Opcode;

/// Unit in which the caller expresses coordinates and feedrates.
///
/// The controller works in millimeters or inches. Metric units are
/// multiplied into millimeters; inches are emitted unscaled and flagged
/// with `G20` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Unit {
    /// Millimeters (×1).
    #[serde(rename = "mm")]
    Millimeter,
    /// Centimeters (×10).
    #[default]
    #[serde(rename = "cm")]
    Centimeter,
    /// Decimeters (×100).
    #[serde(rename = "dm")]
    Decimeter,
    /// Meters (×1000).
    #[serde(rename = "m")]
    Meter,
    /// Inches (×1, selects `G20`).
    #[serde(rename = "inch", alias = "in")]
    Inch,
}

impl Unit {
    /// Parse a unit token, ignoring case and surrounding whitespace.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "mm" => Some(Unit::Millimeter),
            "cm" => Some(Unit::Centimeter),
            "dm" => Some(Unit::Decimeter),
            "m" => Some(Unit::Meter),
            "in" | "inch" => Some(Unit::Inch),
            _ => None,
        }
    }

    /// Parse a unit token, treating anything unrecognized as millimeters.
    pub fn parse_lenient(token: &str) -> Self {
        Self::parse(token).unwrap_or_else(|| {
            tracing::debug!(unit = token, "unrecognized unit, emitting values unscaled");
            Unit::Millimeter
        })
    }

    /// Multiplier from this unit to the emitted value.
    pub fn factor(self) -> f64 {
        match self {
            Unit::Centimeter => 10.0,
            Unit::Decimeter => 100.0,
            Unit::Meter => 1000.0,
            Unit::Millimeter | Unit::Inch => 1.0,
        }
    }

    /// Scale a value expressed in this unit.
    pub fn scale(self, value: f64) -> f64 {
        value * self.factor()
    }

    /// Whether the controller must be switched to inch mode.
    pub fn is_imperial(self) -> bool {
        matches!(self, Unit::Inch)
    }

    /// The unit-selection opcode (`G20` or `G21`).
    pub fn select_opcode(self) -> Opcode {
        if self.is_imperial() {
            Opcode::Inch
        } else {
            Opcode::Metric
        }
    }

    /// Short token for this unit.
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Millimeter => "mm",
            Unit::Centimeter => "cm",
            Unit::Decimeter => "dm",
            Unit::Meter => "m",
            Unit::Inch => "inch",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_tokens() {
        assert_eq!(Unit::parse("cm"), Some(Unit::Centimeter));
        assert_eq!(Unit::parse(" MM "), Some(Unit::Millimeter));
        assert_eq!(Unit::parse("in"), Some(Unit::Inch));
        assert_eq!(Unit::parse("inch"), Some(Unit::Inch));
        assert_eq!(Unit::parse("feet"), None);
        assert_eq!(Unit::parse("millimeter"), None);
    }

    #[test]
    fn test_lenient_falls_back_to_mm() {
        assert_eq!(Unit::parse_lenient("furlong"), Unit::Millimeter);
        assert_eq!(Unit::parse_lenient("dm"), Unit::Decimeter);
    }

    #[test]
    fn test_scale() {
        assert_relative_eq!(Unit::Centimeter.scale(5.0), 50.0);
        assert_relative_eq!(Unit::Decimeter.scale(1.5), 150.0);
        assert_relative_eq!(Unit::Meter.scale(0.25), 250.0);
        assert_relative_eq!(Unit::Millimeter.scale(3.2), 3.2);
        assert_relative_eq!(Unit::Inch.scale(3.2), 3.2);
    }

    #[test]
    fn test_select_opcode() {
        assert_eq!(Unit::Inch.select_opcode(), Opcode::Inch);
        assert_eq!(Unit::Meter.select_opcode(), Opcode::Metric);
    }

    #[test]
    fn test_serde_tokens() {
        let unit: Unit = serde_json::from_str("\"in\"").unwrap();
        assert_eq!(unit, Unit::Inch);
        assert_eq!(serde_json::to_string(&Unit::Decimeter).unwrap(), "\"dm\"");
    }
}
