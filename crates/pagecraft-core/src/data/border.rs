//! Borders and border radii
//!
//! Both are stored as per-device overrides. A border override holds up to
//! four sides (`borderTop`, `borderRight`, ...) with a width, a line style and
//! a color. A radius override holds up to four corner lengths.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::color::{self, ColorData};
use super::length::{self, Length};
use super::{malformed, Data};
use crate::responsive::ResponsiveValue;

pub const SIDE_KEYS: [&str; 4] = ["borderTop", "borderRight", "borderBottom", "borderLeft"];

const CORNER_KEYS: [&str; 4] = [
    "borderTopLeftRadius",
    "borderTopRightRadius",
    "borderBottomRightRadius",
    "borderBottomLeftRadius",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// One border line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Border {
    pub width: Option<Length>,
    pub style: BorderStyle,
    pub color: Option<ColorData>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BorderSides {
    pub top: Option<Border>,
    pub right: Option<Border>,
    pub bottom: Option<Border>,
    pub left: Option<Border>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderRadii {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_left: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_right: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_right: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_left: Option<Length>,
}

/// A line needs a width or a color; the style defaults to solid.
pub fn parse_line(data: &Data) -> Option<Border> {
    let map = data.as_object()?;
    let border = Border {
        width: map.get("width").and_then(length::parse_length),
        style: map
            .get("style")
            .and_then(|s| serde_json::from_value(s.clone()).ok())
            .unwrap_or_default(),
        color: map.get("color").and_then(color::parse),
    };
    (border.width.is_some() || border.color.is_some()).then_some(border)
}

pub fn line_to_data(border: &Border) -> Data {
    let mut map = Map::new();
    if let Some(width) = &border.width {
        map.insert("width".to_string(), length::length_to_data(width));
    }
    map.insert(
        "style".to_string(),
        serde_json::to_value(border.style).unwrap_or(Value::Null),
    );
    if let Some(color) = &border.color {
        map.insert("color".to_string(), color::to_data(color));
    }
    Value::Object(map)
}

pub fn parse_sides(data: &Data) -> Option<BorderSides> {
    let map = data.as_object()?;
    let [top, right, bottom, left] = SIDE_KEYS.map(|key| map.get(key).and_then(parse_line));
    let sides = BorderSides {
        top,
        right,
        bottom,
        left,
    };
    (sides != BorderSides::default()).then_some(sides)
}

pub fn parse_responsive(data: &Data) -> Option<ResponsiveValue<BorderSides>> {
    match data {
        Data::Null => None,
        Data::Array(_) => Some(ResponsiveValue::parse_with(data, parse_sides)),
        other => {
            malformed("border", other);
            None
        }
    }
}

pub fn parse_radii(data: &Data) -> Option<BorderRadii> {
    let map = data.as_object()?;
    let [top_left, top_right, bottom_right, bottom_left] =
        CORNER_KEYS.map(|key| map.get(key).and_then(length::parse_length));
    let radii = BorderRadii {
        top_left,
        top_right,
        bottom_right,
        bottom_left,
    };
    (radii != BorderRadii::default()).then_some(radii)
}

pub fn parse_responsive_radii(data: &Data) -> Option<ResponsiveValue<BorderRadii>> {
    match data {
        Data::Null => None,
        Data::Array(_) => Some(ResponsiveValue::parse_with(data, parse_radii)),
        other => {
            malformed("border-radius", other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sides_parse_independently() {
        let borders = parse_responsive(&json!([{"deviceId": "desktop", "value": {
            "borderTop": {"width": 1, "style": "dashed", "color": {"swatchId": "ink"}},
            "borderLeft": {"width": null, "style": "solid"},
            "borderBottom": "nonsense"
        }}]))
        .unwrap();
        let sides = borders.get("desktop").unwrap();
        let top = sides.top.as_ref().unwrap();
        assert_eq!(top.width, Some(Length::px(1.0)));
        assert_eq!(top.style, BorderStyle::Dashed);
        assert_eq!(top.color, Some(ColorData::swatch("ink", 1.0)));
        assert!(sides.left.is_none());
        assert!(sides.bottom.is_none());
    }

    #[test]
    fn empty_overrides_are_skipped() {
        let borders = parse_responsive(&json!([
            {"deviceId": "desktop", "value": {}},
            {"deviceId": "mobile", "value": {"borderRight": {"width": 2}}}
        ]))
        .unwrap();
        assert_eq!(borders.len(), 1);
        assert!(borders.get("mobile").is_some());
    }

    #[test]
    fn radii_read_corner_lengths() {
        let radii = parse_responsive_radii(&json!([{"deviceId": "desktop", "value": {
            "borderTopLeftRadius": {"value": 4, "unit": "px"},
            "borderBottomRightRadius": 50
        }}]))
        .unwrap();
        let radii = radii.get("desktop").unwrap();
        assert_eq!(radii.top_left, Some(Length::px(4.0)));
        assert_eq!(radii.bottom_right, Some(Length::px(50.0)));
        assert_eq!(radii.top_right, None);
        assert_eq!(parse_responsive_radii(&json!({"borderTopLeftRadius": 4})), None);
    }
}
