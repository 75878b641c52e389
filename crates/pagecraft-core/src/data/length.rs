//! Lengths, box sides and their responsive forms
//!
//! Older documents stored lengths as bare pixel numbers and box sides under
//! prefixed keys (`marginTop`, `paddingLeft`). Both are still read.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::{envelope, malformed, open_envelope, Data};
use crate::responsive::ResponsiveValue;

pub const RESPONSIVE_LENGTH_V1: &str = "responsive-length::v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "px")]
    Px,
    #[serde(rename = "%")]
    Percent,
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthUnit::Px => write!(f, "px"),
            LengthUnit::Percent => write!(f, "%"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Length {
    pub value: f64,
    #[serde(default)]
    pub unit: LengthUnit,
}

impl Length {
    pub fn px(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Px,
        }
    }

    pub fn percent(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Percent,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// One side of a box: a length or `auto`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SideValue {
    Auto,
    Length(Length),
}

impl fmt::Display for SideValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SideValue::Auto => write!(f, "auto"),
            SideValue::Length(length) => write!(f, "{length}"),
        }
    }
}

impl Serialize for SideValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SideValue::Auto => serializer.serialize_str("auto"),
            SideValue::Length(length) => length.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BoxSides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<SideValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<SideValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<SideValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<SideValue>,
}

impl BoxSides {
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.right.is_none() && self.bottom.is_none() && self.left.is_none()
    }
}

pub fn parse_length(data: &Data) -> Option<Length> {
    let length = match data {
        Data::Number(n) => n.as_f64().map(Length::px),
        Data::Object(_) => serde_json::from_value::<Length>(data.clone()).ok(),
        _ => None,
    };
    length.filter(|l| l.value.is_finite())
}

pub fn length_to_data(length: &Length) -> Data {
    serde_json::json!({ "value": length.value, "unit": length.unit })
}

pub fn parse_side(data: &Data) -> Option<SideValue> {
    match data {
        Data::String(s) if s == "auto" => Some(SideValue::Auto),
        other => parse_length(other).map(SideValue::Length),
    }
}

pub fn side_to_data(side: &SideValue) -> Data {
    match side {
        SideValue::Auto => Data::from("auto"),
        SideValue::Length(length) => length_to_data(length),
    }
}

const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];

fn side_entry<'a>(map: &'a Map<String, Value>, side: &str) -> Option<&'a Value> {
    if let Some(value) = map.get(side) {
        return Some(value);
    }
    map.iter()
        .find(|(key, _)| {
            key.len() > side.len()
                && key.to_ascii_lowercase().ends_with(side)
                && key[key.len() - side.len()..].starts_with(|c: char| c.is_ascii_uppercase())
        })
        .map(|(_, value)| value)
}

pub fn parse_box_sides(data: &Data) -> Option<BoxSides> {
    let map = data.as_object()?;
    let [top, right, bottom, left] =
        SIDES.map(|side| side_entry(map, side).and_then(parse_side));
    let sides = BoxSides {
        top,
        right,
        bottom,
        left,
    };
    (!sides.is_empty()).then_some(sides)
}

pub fn box_sides_to_data(sides: &BoxSides) -> Data {
    let mut map = Map::new();
    for (name, side) in SIDES
        .iter()
        .zip([sides.top, sides.right, sides.bottom, sides.left])
    {
        if let Some(side) = side {
            map.insert((*name).to_string(), side_to_data(&side));
        }
    }
    Value::Object(map)
}

/// Responsive lengths are read from the current envelope or a bare override
/// array.
pub fn parse_responsive_length(data: &Data) -> Option<ResponsiveValue<Length>> {
    if data.is_null() {
        return None;
    }
    let overrides = open_envelope(data, RESPONSIVE_LENGTH_V1).unwrap_or(data);
    if !overrides.is_array() {
        malformed("responsive-length", data);
        return None;
    }
    Some(ResponsiveValue::parse_with(overrides, parse_length))
}

pub fn responsive_length_to_data(value: &ResponsiveValue<Length>) -> Data {
    envelope(RESPONSIVE_LENGTH_V1, value.to_data_with(length_to_data))
}

/// Width data is written as a bare override array; the envelope is read too.
pub fn parse_width(data: &Data) -> Option<ResponsiveValue<Length>> {
    parse_responsive_length(data)
}

pub fn width_to_data(value: &ResponsiveValue<Length>) -> Data {
    value.to_data_with(length_to_data)
}

pub fn parse_responsive_box_sides(data: &Data) -> Option<ResponsiveValue<BoxSides>> {
    match data {
        Data::Null => None,
        Data::Array(_) => Some(ResponsiveValue::parse_with(data, parse_box_sides)),
        other => {
            malformed("box-sides", other);
            None
        }
    }
}

pub fn responsive_box_sides_to_data(value: &ResponsiveValue<BoxSides>) -> Data {
    value.to_data_with(box_sides_to_data)
}
