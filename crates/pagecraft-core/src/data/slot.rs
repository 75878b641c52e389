use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{malformed, Data};
use crate::responsive::ResponsiveValue;

/// Column layout of a slot on one device. `spans` has one entry per child.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlotColumn {
    pub count: u32,
    #[serde(default)]
    pub spans: Vec<u32>,
}

pub type SlotColumns = ResponsiveValue<SlotColumn>;

/// References to child elements, in render order, plus their layout.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SlotData {
    pub elements: Vec<String>,
    pub columns: SlotColumns,
}

/// Element entries may be keys or, in older documents, inline element
/// objects carrying their own `key`.
pub fn parse(data: &Data) -> Option<SlotData> {
    if data.is_null() {
        return None;
    }
    let Some(entries) = data.get("elements").and_then(Value::as_array) else {
        malformed("slot", data);
        return None;
    };

    let elements = entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(key) => Some(key.clone()),
            other => other.get("key").and_then(Value::as_str).map(str::to_string),
        })
        .collect();
    let columns = data
        .get("columns")
        .map(|columns| {
            ResponsiveValue::parse_with(columns, |c| serde_json::from_value(c.clone()).ok())
        })
        .unwrap_or_default();

    Some(SlotData { elements, columns })
}

pub fn to_data(slot: &SlotData) -> Data {
    serde_json::json!({
        "elements": slot.elements,
        "columns": slot
            .columns
            .to_data_with(|c| serde_json::to_value(c).unwrap_or(Value::Null)),
    })
}

/// Split inline element objects out of legacy slot data.
///
/// Returns the hoisted `(key, element)` pairs; `data` is rewritten to refer
/// to them by key. Data that is not a slot with inline elements is left as
/// is.
pub fn hoist_inline_elements(data: &mut Data) -> Vec<(String, Map<String, Value>)> {
    let Some(entries) = data.get_mut("elements").and_then(Value::as_array_mut) else {
        return Vec::new();
    };

    let mut hoisted = Vec::new();
    for entry in entries.iter_mut() {
        let key = match entry {
            Value::Object(element) if element.contains_key("type") => {
                element.get("key").and_then(Value::as_str).map(str::to_string)
            }
            _ => None,
        };
        if let Some(key) = key {
            let element = std::mem::replace(entry, Value::String(key.clone()));
            if let Value::Object(mut element) = element {
                element.remove("key");
                hoisted.push((key, element));
            }
        }
    }
    hoisted
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_keys_and_columns() {
        let slot = parse(&json!({
            "elements": ["a", {"key": "b", "type": "Box"}],
            "columns": [{"deviceId": "desktop", "value": {"count": 2, "spans": [1, 1]}}],
        }))
        .unwrap();
        assert_eq!(slot.elements, ["a", "b"]);
        assert_eq!(slot.columns.get("desktop").map(|c| c.count), Some(2));
    }

    #[test]
    fn hoists_inline_elements() {
        let mut data = json!({
            "elements": [
                "kept",
                {"key": "inline", "type": "Text", "props": {"text": "hi"}},
            ]
        });
        let hoisted = hoist_inline_elements(&mut data);
        assert_eq!(data["elements"], json!(["kept", "inline"]));
        assert_eq!(hoisted.len(), 1);
        assert_eq!(hoisted[0].0, "inline");
        assert_eq!(hoisted[0].1["type"], "Text");
        assert!(!hoisted[0].1.contains_key("key"));
    }

    #[test]
    fn missing_elements_is_malformed() {
        assert_eq!(parse(&json!({"columns": []})), None);
    }
}
