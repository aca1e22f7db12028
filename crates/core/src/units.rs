//! CSS lengths as they appear in inline styles.
//!
//! Only the units the drag engine writes or reads back are modelled: pixel
//! and percentage lengths plus the `auto` keyword.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit of a CSS length.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum_macros::EnumString,
    strum_macros::Display,
)]
pub enum Unit {
    #[default]
    #[serde(rename = "px")]
    #[strum(serialize = "px")]
    Px,
    #[serde(rename = "%")]
    #[strum(serialize = "%")]
    Percent,
}

/// A parsed CSS length value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Length {
    Auto,
    Value(f32, Unit),
}

impl Length {
    pub fn px(value: f32) -> Self {
        Length::Value(value, Unit::Px)
    }

    pub fn percent(value: f32) -> Self {
        Length::Value(value, Unit::Percent)
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Length::Auto)
    }

    /// Resolve to pixels; percentages resolve against `reference`.
    pub fn to_px(&self, reference: f32) -> Option<f32> {
        match self {
            Length::Auto => None,
            Length::Value(v, Unit::Px) => Some(*v),
            Length::Value(v, Unit::Percent) => Some(v / 100.0 * reference),
        }
    }
}

/// Error returned when a style value is not a length we understand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLengthError(pub String);

impl fmt::Display for ParseLengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid length: {:?}", self.0)
    }
}

impl std::error::Error for ParseLengthError {}

impl FromStr for Length {
    type Err = ParseLengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Length::Auto);
        }

        let (number, unit) = if let Some(n) = s.strip_suffix("px") {
            (n, Unit::Px)
        } else if let Some(n) = s.strip_suffix('%') {
            (n, Unit::Percent)
        } else {
            // Unitless numbers are treated as pixels, like jQuery's css() setter
            (s, Unit::Px)
        };

        number
            .trim()
            .parse::<f32>()
            .map(|v| Length::Value(v, unit))
            .map_err(|_| ParseLengthError(s.to_string()))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Auto => write!(f, "auto"),
            Length::Value(v, unit) => write!(f, "{v}{unit}"),
        }
    }
}

impl TryFrom<String> for Length {
    type Error = ParseLengthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Length> for String {
    fn from(value: Length) -> Self {
        value.to_string()
    }
}

/// Normalize a float to the precision of `step`.
///
/// Integral values pass through untouched; fractional values are rounded to
/// as many decimals as `step` carries (a step of `0.01` keeps two). A NaN
/// input yields `default`.
pub fn normalize_float(value: f32, step: f32, default: f32) -> f32 {
    if value.is_nan() {
        return default;
    }
    if value.floor() == value {
        return value;
    }

    let decimals = step_decimals(step);
    if decimals == 0 {
        return value;
    }
    let factor = 10f32.powi(decimals as i32);
    (value * factor).round() / factor
}

fn step_decimals(step: f32) -> usize {
    let text = step.to_string();
    text.split('.').nth(1).map(|d| d.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lengths() {
        assert_eq!("120px".parse::<Length>().unwrap(), Length::px(120.0));
        assert_eq!("50%".parse::<Length>().unwrap(), Length::percent(50.0));
        assert_eq!(" auto ".parse::<Length>().unwrap(), Length::Auto);
        assert_eq!("12".parse::<Length>().unwrap(), Length::px(12.0));
        assert!("wide".parse::<Length>().is_err());
    }

    #[test]
    fn test_length_display() {
        assert_eq!(Length::px(10.5).to_string(), "10.5px");
        assert_eq!(Length::percent(25.0).to_string(), "25%");
        assert_eq!(Length::Auto.to_string(), "auto");
    }

    #[test]
    fn test_percent_resolves_against_reference() {
        assert_eq!(Length::percent(50.0).to_px(300.0), Some(150.0));
        assert_eq!(Length::Auto.to_px(300.0), None);
    }

    #[test]
    fn test_normalize_float() {
        assert_eq!(normalize_float(12.0, 1.0, 0.0), 12.0);
        assert_eq!(normalize_float(12.3456, 0.01, 0.0), 12.35);
        // Integer steps keep fractional values as they are
        assert_eq!(normalize_float(12.5, 1.0, 0.0), 12.5);
        assert_eq!(normalize_float(f32::NAN, 1.0, 7.0), 7.0);
    }
}
