//! Typography
//!
//! Stored as `{id?, style}` where `id` names a shared typography preset and
//! `style` holds per-device overrides of individual text properties. Each
//! property falls back toward the base breakpoint on its own.

use serde::Serialize;
use serde_json::Value;

use super::color::{self, ColorData};
use super::length::{self, Length};
use super::{malformed, Data};
use crate::responsive::ResponsiveValue;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(skip)]
    pub color: Option<ColorData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uppercase: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
}

impl TypographyStyle {
    /// Fill every unset property from `wider`.
    pub fn fill_from(&mut self, wider: &TypographyStyle) {
        fn fill<T: Clone>(slot: &mut Option<T>, wider: &Option<T>) {
            if slot.is_none() {
                slot.clone_from(wider);
            }
        }
        fill(&mut self.font_family, &wider.font_family);
        fill(&mut self.font_size, &wider.font_size);
        fill(&mut self.font_weight, &wider.font_weight);
        fill(&mut self.line_height, &wider.line_height);
        fill(&mut self.letter_spacing, &wider.letter_spacing);
        fill(&mut self.color, &wider.color);
        fill(&mut self.text_align, &wider.text_align);
        fill(&mut self.uppercase, &wider.uppercase);
        fill(&mut self.underline, &wider.underline);
        fill(&mut self.strikethrough, &wider.strikethrough);
        fill(&mut self.italic, &wider.italic);
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypographyData {
    pub id: Option<String>,
    pub style: ResponsiveValue<TypographyStyle>,
}

fn finite(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).filter(|n| n.is_finite())
}

/// Properties that fail to parse are left unset.
pub fn parse_style(data: &Data) -> Option<TypographyStyle> {
    let map = data.as_object()?;
    let text = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
    let flag = |key: &str| map.get(key).and_then(Value::as_bool);
    Some(TypographyStyle {
        font_family: text("fontFamily"),
        font_size: map.get("fontSize").and_then(length::parse_length),
        font_weight: finite(map.get("fontWeight")),
        line_height: finite(map.get("lineHeight")),
        letter_spacing: finite(map.get("letterSpacing")),
        color: map.get("color").and_then(color::parse),
        text_align: text("textAlign"),
        uppercase: flag("uppercase"),
        underline: flag("underline"),
        strikethrough: flag("strikethrough"),
        italic: flag("italic"),
    })
}

pub fn parse(data: &Data) -> Option<TypographyData> {
    let map = match data {
        Data::Null => return None,
        Data::Object(map) => map,
        other => {
            malformed("typography", other);
            return None;
        }
    };
    Some(TypographyData {
        id: map.get("id").and_then(Value::as_str).map(str::to_string),
        style: map
            .get("style")
            .map(|style| ResponsiveValue::parse_with(style, parse_style))
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_preset_and_overrides() {
        let typography = parse(&json!({
            "id": "heading-1",
            "style": [
                {"deviceId": "desktop", "value": {
                    "fontFamily": "Inter", "fontSize": {"value": 32, "unit": "px"},
                    "fontWeight": 700, "color": {"swatchId": "ink"}
                }},
                {"deviceId": "mobile", "value": {"fontSize": {"value": 24, "unit": "px"},
                                                 "fontWeight": "bold"}}
            ]
        }))
        .unwrap();
        assert_eq!(typography.id.as_deref(), Some("heading-1"));
        let mobile = typography.style.get("mobile").unwrap();
        assert_eq!(mobile.font_size, Some(Length::px(24.0)));
        assert_eq!(mobile.font_weight, None);
    }

    #[test]
    fn fill_keeps_narrow_values() {
        let mut narrow = TypographyStyle {
            font_size: Some(Length::px(14.0)),
            ..TypographyStyle::default()
        };
        let wide = TypographyStyle {
            font_size: Some(Length::px(18.0)),
            italic: Some(true),
            ..TypographyStyle::default()
        };
        narrow.fill_from(&wide);
        assert_eq!(narrow.font_size, Some(Length::px(14.0)));
        assert_eq!(narrow.italic, Some(true));
    }
}
