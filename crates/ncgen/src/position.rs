//! Target positions with optional axis components.

use serde::{Deserialize, Serialize};

use crate::error::ProgramError;

/// A target position. Each axis is optional so a move can touch a single
/// axis; absent axes are left out of the emitted block, never zeroed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "PositionRepr")]
pub struct Position {
    /// X component.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Y component.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Z component.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Position {
    /// A position with all three axes set.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }

    /// A position with only X and Y set.
    pub fn xy(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: None,
        }
    }

    /// A position with only Z set.
    pub fn z(z: f64) -> Self {
        Self {
            z: Some(z),
            ..Self::default()
        }
    }

    /// Replace the X component.
    pub fn with_x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    /// Replace the Y component.
    pub fn with_y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    /// Replace the Z component.
    pub fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    /// Present components in X, Y, Z order, tagged with their axis letter.
    pub fn components(&self) -> impl Iterator<Item = (char, f64)> {
        [('X', self.x), ('Y', self.y), ('Z', self.z)]
            .into_iter()
            .filter_map(|(axis, value)| value.map(|v| (axis, v)))
    }

    /// True if no axis is set.
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.z.is_none()
    }
}

impl From<[f64; 3]> for Position {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<[f64; 2]> for Position {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::xy(x, y)
    }
}

impl From<(f64, f64, f64)> for Position {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self::xy(x, y)
    }
}

/// Either `[x, y, z?]` or `{ x?, y?, z? }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum PositionRepr {
    Sequence(Vec<Option<f64>>),
    Keyed {
        #[serde(default)]
        x: Option<f64>,
        #[serde(default)]
        y: Option<f64>,
        #[serde(default)]
        z: Option<f64>,
    },
}

impl TryFrom<PositionRepr> for Position {
    type Error = ProgramError;

    fn try_from(repr: PositionRepr) -> Result<Self, Self::Error> {
        match repr {
            PositionRepr::Sequence(values) => {
                if values.is_empty() || values.len() > 3 {
                    return Err(ProgramError::InvalidPosition(format!(
                        "expected 1 to 3 coordinates, got {}",
                        values.len()
                    )));
                }
                let axis = |i: usize| values.get(i).copied().flatten();
                Ok(Position {
                    x: axis(0),
                    y: axis(1),
                    z: axis(2),
                })
            }
            PositionRepr::Keyed { x, y, z } => Ok(Position { x, y, z }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pair_leaves_z_unset() {
        let p = Position::from([1.0, 2.0]);
        assert_eq!(p.x, Some(1.0));
        assert_eq!(p.y, Some(2.0));
        assert_eq!(p.z, None);
    }

    #[test]
    fn test_components_order() {
        let p = Position::z(4.0).with_x(1.0);
        let axes: Vec<char> = p.components().map(|(axis, _)| axis).collect();
        assert_eq!(axes, vec!['X', 'Z']);
    }

    #[test]
    fn test_is_empty() {
        assert!(Position::default().is_empty());
        assert!(!Position::z(0.0).is_empty());
    }

    #[test]
    fn test_deserialize_sequence() {
        let p: Position = serde_json::from_str("[0, 65.5]").unwrap();
        assert_eq!(p, Position::xy(0.0, 65.5));
        let p: Position = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(p, Position::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_deserialize_rejects_bad_sequence_length() {
        assert!(serde_json::from_str::<Position>("[]").is_err());
        assert!(serde_json::from_str::<Position>("[1, 2, 3, 4]").is_err());
        let p: Position = serde_json::from_str("[null, null, 2]").unwrap();
        assert_eq!(p, Position::z(2.0));
    }

    #[test]
    fn test_deserialize_keyed() {
        let p: Position = serde_json::from_str(r#"{"z": 5}"#).unwrap();
        assert_eq!(p, Position::z(5.0));
    }

    #[test]
    fn test_serialize_skips_missing_axes() {
        let json = serde_json::to_string(&Position::z(2.5)).unwrap();
        assert_eq!(json, r#"{"z":2.5}"#);
    }
}
