//! Theme swatches

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An sRGB color with alpha in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        match digits.len() {
            3 => {
                let mut channels = digits
                    .chars()
                    .filter_map(|c| c.to_digit(16))
                    .map(|d| (d * 17) as u8);
                Some(Self::new(
                    channels.next()?,
                    channels.next()?,
                    channels.next()?,
                    1.0,
                ))
            }
            6 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, 1.0)),
            8 => Some(Self::new(
                byte(0)?,
                byte(2)?,
                byte(4)?,
                f64::from(byte(6)?) / 255.0,
            )),
            _ => None,
        }
    }

    /// This color with its alpha scaled by `alpha`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: (self.a * alpha).clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            let alpha = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
            format!("#{:02x}{:02x}{:02x}{alpha:02x}", self.r, self.g, self.b)
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl TryFrom<String> for Rgba {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgba::from_hex(&value).ok_or_else(|| format!("invalid hex color: {value}"))
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_hex()
    }
}

/// Source of swatch colors.
pub trait Theme {
    fn resolve_swatch(&self, swatch_id: &str) -> Option<Rgba>;
}

/// In-memory swatch table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    #[serde(default)]
    pub swatches: BTreeMap<String, Rgba>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_swatch(mut self, id: impl Into<String>, color: Rgba) -> Self {
        self.swatches.insert(id.into(), color);
        self
    }
}

impl Theme for Palette {
    fn resolve_swatch(&self, swatch_id: &str) -> Option<Rgba> {
        self.swatches.get(swatch_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("#fff", Some(Rgba::new(255, 255, 255, 1.0)) ; "short")]
    #[test_case("#102030", Some(Rgba::new(16, 32, 48, 1.0)) ; "long")]
    #[test_case("#00000000", Some(Rgba::new(0, 0, 0, 0.0)) ; "with alpha")]
    #[test_case("102030", None ; "missing hash")]
    #[test_case("#12345", None ; "bad length")]
    #[test_case("#zzzzzz", None ; "not hex")]
    fn parses_hex(input: &str, expected: Option<Rgba>) {
        assert_eq!(Rgba::from_hex(input), expected);
    }

    #[test]
    fn displays_as_css_rgba() {
        let color = Rgba::new(255, 0, 0, 1.0).with_alpha(0.5);
        assert_eq!(color.to_string(), "rgba(255, 0, 0, 0.5)");
    }

    #[test]
    fn palette_deserializes_hex_strings() {
        let palette: Palette =
            serde_json::from_str(r##"{"swatches": {"brand": "#336699"}}"##).unwrap();
        assert_eq!(
            palette.resolve_swatch("brand"),
            Some(Rgba::new(0x33, 0x66, 0x99, 1.0))
        );
        assert_eq!(palette.resolve_swatch("missing"), None);
    }
}
