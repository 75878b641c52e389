//! Box shadows, stored per device as a list of `{id, payload}` entries

use serde_json::Value;

use super::color::{self, ColorData};
use super::{malformed, Data};
use crate::responsive::ResponsiveValue;

/// One shadow. Offsets and radii are pixels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shadow {
    pub color: Option<ColorData>,
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur_radius: f64,
    pub spread_radius: f64,
    pub inset: bool,
}

impl Shadow {
    /// CSS `box-shadow` layer with `color` already resolved.
    pub fn css(&self, color: &str) -> String {
        let inset = if self.inset { "inset " } else { "" };
        format!(
            "{inset}{}px {}px {}px {}px {color}",
            self.offset_x, self.offset_y, self.blur_radius, self.spread_radius
        )
    }
}

fn number(payload: &Value, key: &str) -> f64 {
    payload
        .get(key)
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

pub fn parse_shadow(entry: &Data) -> Option<Shadow> {
    let payload = entry.get("payload").filter(|p| p.is_object())?;
    Some(Shadow {
        color: payload.get("color").and_then(color::parse),
        offset_x: number(payload, "offsetX"),
        offset_y: number(payload, "offsetY"),
        blur_radius: number(payload, "blurRadius"),
        spread_radius: number(payload, "spreadRadius"),
        inset: payload.get("inset").and_then(Value::as_bool).unwrap_or(false),
    })
}

pub fn parse_responsive(data: &Data) -> Option<ResponsiveValue<Vec<Shadow>>> {
    match data {
        Data::Null => None,
        Data::Array(_) => Some(ResponsiveValue::parse_with(data, |layers| {
            layers
                .as_array()
                .map(|layers| layers.iter().filter_map(parse_shadow).collect())
        })),
        other => {
            malformed("shadows", other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn layers_keep_order_and_skip_garbage() {
        let shadows = parse_responsive(&json!([{"deviceId": "desktop", "value": [
            {"id": "a", "payload": {"offsetX": 0, "offsetY": 2, "blurRadius": 4,
                                    "color": {"swatchId": "ink", "alpha": 0.2}}},
            {"id": "b"},
            {"id": "c", "payload": {"spreadRadius": 1, "inset": true}}
        ]}]))
        .unwrap();
        let layers = shadows.get("desktop").unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].offset_y, 2.0);
        assert_eq!(layers[0].color, Some(ColorData::swatch("ink", 0.2)));
        assert!(layers[1].inset);
    }

    #[test]
    fn css_layer() {
        let shadow = Shadow {
            offset_y: 2.0,
            blur_radius: 4.5,
            inset: true,
            ..Shadow::default()
        };
        assert_eq!(shadow.css("black"), "inset 0px 2px 4.5px 0px black");
    }
}
