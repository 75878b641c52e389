use serde::{Deserialize, Serialize};

use super::{malformed, Data};
use crate::responsive::ResponsiveValue;

/// A stored color: a theme swatch reference with alpha, a raw color, or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swatch_id: Option<String>,
    #[serde(default = "opaque")]
    pub alpha: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

fn opaque() -> f64 {
    1.0
}

impl ColorData {
    pub fn swatch(id: impl Into<String>, alpha: f64) -> Self {
        Self {
            swatch_id: Some(id.into()),
            alpha,
            color: None,
        }
    }

    pub fn raw(color: impl Into<String>) -> Self {
        Self {
            swatch_id: None,
            alpha: 1.0,
            color: Some(color.into()),
        }
    }
}

/// A bare string is a raw color. Objects need a swatch or a color; alpha is
/// clamped into `0..=1`.
pub fn parse(data: &Data) -> Option<ColorData> {
    match data {
        Data::Null => None,
        Data::String(color) if !color.is_empty() => Some(ColorData::raw(color.clone())),
        Data::Object(_) => match serde_json::from_value::<ColorData>(data.clone()) {
            Ok(mut color) if color.swatch_id.is_some() || color.color.is_some() => {
                if !color.alpha.is_finite() {
                    color.alpha = 1.0;
                }
                color.alpha = color.alpha.clamp(0.0, 1.0);
                Some(color)
            }
            _ => {
                malformed("color", data);
                None
            }
        },
        other => {
            malformed("color", other);
            None
        }
    }
}

pub fn to_data(color: &ColorData) -> Data {
    serde_json::to_value(color).unwrap_or(Data::Null)
}

pub fn parse_responsive(data: &Data) -> ResponsiveValue<ColorData> {
    ResponsiveValue::parse_with(data, parse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn swatch_with_default_alpha() {
        let color = parse(&json!({"swatchId": "brand"})).unwrap();
        assert_eq!(color, ColorData::swatch("brand", 1.0));
    }

    #[test]
    fn string_is_raw_color() {
        assert_eq!(parse(&json!("#ff0000")), Some(ColorData::raw("#ff0000")));
    }

    #[test]
    fn empty_object_is_malformed() {
        assert_eq!(parse(&json!({"alpha": 0.5})), None);
    }

    #[test]
    fn alpha_is_clamped() {
        let color = parse(&json!({"swatchId": "a", "alpha": 3})).unwrap();
        assert_eq!(color.alpha, 1.0);
    }

    #[test]
    fn responsive_skips_bad_entries() {
        let value = parse_responsive(&json!([
            {"deviceId": "desktop", "value": {"swatchId": "a"}},
            {"deviceId": "mobile", "value": 4},
        ]));
        assert_eq!(value.len(), 1);
        assert!(value.get("desktop").is_some());
    }
}
