//! Style data: per-device width, margin, padding and border

use serde_json::{Map, Value};

use super::border::{self, Border};
use super::length::{self, BoxSides, Length};
use super::{malformed, Data};
use crate::responsive::ResponsiveValue;

/// Style data. Each property is independently responsive and optional.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleData {
    pub width: Option<ResponsiveValue<Length>>,
    pub margin: Option<ResponsiveValue<BoxSides>>,
    pub padding: Option<ResponsiveValue<BoxSides>>,
    pub border: Option<ResponsiveValue<Border>>,
}

pub fn parse(data: &Data) -> Option<StyleData> {
    let map = match data {
        Data::Null => return None,
        Data::Object(map) => map,
        other => {
            malformed("style", other);
            return None;
        }
    };

    Some(StyleData {
        width: map.get("width").and_then(length::parse_width),
        margin: map.get("margin").and_then(length::parse_responsive_box_sides),
        padding: map.get("padding").and_then(length::parse_responsive_box_sides),
        border: map
            .get("border")
            .filter(|b| b.is_array())
            .map(|b| ResponsiveValue::parse_with(b, border::parse_line)),
    })
}

pub fn to_data(style: &StyleData) -> Data {
    let mut map = Map::new();
    if let Some(width) = &style.width {
        map.insert("width".to_string(), length::width_to_data(width));
    }
    if let Some(margin) = &style.margin {
        map.insert("margin".to_string(), length::responsive_box_sides_to_data(margin));
    }
    if let Some(padding) = &style.padding {
        map.insert("padding".to_string(), length::responsive_box_sides_to_data(padding));
    }
    if let Some(borders) = &style.border {
        map.insert("border".to_string(), borders.to_data_with(border::line_to_data));
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BorderStyle, ColorData};
    use serde_json::json;

    #[test]
    fn parses_each_property() {
        let style = parse(&json!({
            "width": [{"deviceId": "desktop", "value": {"value": 100, "unit": "%"}}],
            "padding": [{"deviceId": "desktop", "value": {"paddingTop": 4}}],
            "border": [{"deviceId": "desktop", "value": {"width": 1, "color": {"swatchId": "ink"}}}],
        }))
        .unwrap();

        assert_eq!(
            style.width.unwrap().get("desktop"),
            Some(&Length::percent(100.0))
        );
        assert!(style.margin.is_none());
        let border = style.border.unwrap();
        let border = border.get("desktop").unwrap();
        assert_eq!(border.style, BorderStyle::Solid);
        assert_eq!(border.color, Some(ColorData::swatch("ink", 1.0)));
    }

    #[test]
    fn writes_what_it_reads() {
        let style = StyleData {
            border: Some(ResponsiveValue::single(
                "desktop",
                Border {
                    width: Some(Length::px(2.0)),
                    style: BorderStyle::Dashed,
                    color: None,
                },
            )),
            ..StyleData::default()
        };
        assert_eq!(parse(&to_data(&style)), Some(style));
    }
}
