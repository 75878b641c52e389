use serde::{Deserialize, Serialize};

use super::{malformed, Data};

/// The option picked in a combobox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboboxValue {
    pub id: String,
    pub label: String,
    pub value: Data,
}

pub fn parse(data: &Data) -> Option<ComboboxValue> {
    if data.is_null() {
        return None;
    }
    match serde_json::from_value(data.clone()) {
        Ok(value) => Some(value),
        Err(_) => {
            malformed("combobox", data);
            None
        }
    }
}

pub fn to_data(value: &ComboboxValue) -> Data {
    serde_json::json!({ "id": value.id, "label": value.label, "value": value.value })
}
