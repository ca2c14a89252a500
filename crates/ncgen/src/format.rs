//! Word formatting for emitted blocks.
//!
//! All helpers here are pure: they take already-resolved values and a
//! [`Unit`] and return text.

use crate::position::Position;
use crate::unit::Unit;

/// Render a number in its natural decimal form.
///
/// Integral values print without a fractional part (`655`), fractional
/// values print as given (`327.5`). Negative zero prints as `0` and
/// non-finite values print as `NaN`, `Infinity` or `-Infinity`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

/// Axis words for the present components of `position`, space separated.
pub fn axis_words(position: &Position, unit: Unit) -> String {
    position
        .components()
        .map(|(axis, value)| format!("{}{}", axis, format_number(unit.scale(value))))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Feedrate word (`F` + scaled feedrate).
pub fn feedrate_word(feedrate: f64, unit: Unit) -> String {
    format!("F{}", format_number(unit.scale(feedrate)))
}

/// Line-number word, zero-padded to three digits.
pub fn line_number_word(number: u32) -> String {
    format!("N{:03}", number)
}

/// Program-name word.
pub fn program_name_word(name: &str) -> String {
    format!("O{}", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(655.0), "655");
        assert_eq!(format_number(327.5), "327.5");
        assert_eq!(format_number(-12.25), "-12.25");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_axis_words_scaled() {
        let words = axis_words(&Position::xy(12.8, 32.75), Unit::Centimeter);
        assert_eq!(words, "X128 Y327.5");
    }

    #[test]
    fn test_axis_words_only_present_axes() {
        assert_eq!(axis_words(&Position::z(10.0), Unit::Centimeter), "Z100");
        assert_eq!(axis_words(&Position::default(), Unit::Millimeter), "");
    }

    #[test]
    fn test_axis_words_nan_passthrough() {
        let words = axis_words(&Position::xy(f64::NAN, 1.0), Unit::Millimeter);
        assert_eq!(words, "XNaN Y1");
    }

    #[test]
    fn test_feedrate_word() {
        assert_eq!(feedrate_word(50.0, Unit::Centimeter), "F500");
        assert_eq!(feedrate_word(12.5, Unit::Inch), "F12.5");
    }

    #[test]
    fn test_line_number_word() {
        assert_eq!(line_number_word(1), "N001");
        assert_eq!(line_number_word(42), "N042");
        assert_eq!(line_number_word(1234), "N1234");
    }

    #[test]
    fn test_program_name_word() {
        assert_eq!(program_name_word("123"), "O123");
    }
}
