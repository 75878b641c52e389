use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{malformed, Data};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: String,
    pub value: Data,
}

/// Items of a list. Item values stay raw; they are parsed by the item
/// descriptor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListData {
    pub items: Vec<ListItem>,
}

/// Items without an id (older data stored bare values) get `item-{index}`.
pub fn parse(data: &Data) -> Option<ListData> {
    let entries = match data {
        Data::Null => return None,
        Data::Array(entries) => entries,
        other => {
            malformed("list", other);
            return None;
        }
    };

    let items = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| ListItem {
            id: item_id(entry, index),
            value: item_value(entry).clone(),
        })
        .collect();
    Some(ListData { items })
}

/// Id of the stored entry at `index`.
pub fn item_id(entry: &Data, index: usize) -> String {
    match (entry.get("id").and_then(Value::as_str), entry.get("value")) {
        (Some(id), Some(_)) => id.to_string(),
        _ => format!("item-{index}"),
    }
}

/// Value of a stored entry. Bare entries are their own value.
pub fn item_value(entry: &Data) -> &Data {
    entry.get("value").unwrap_or(entry)
}

pub fn item_value_mut(entry: &mut Data) -> &mut Data {
    if entry.get("value").is_some() {
        &mut entry["value"]
    } else {
        entry
    }
}

pub fn to_data(list: &ListData) -> Data {
    Data::Array(
        list.items
            .iter()
            .map(|item| serde_json::json!({ "id": item.id, "value": item.value }))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_values_get_positional_ids() {
        let list = parse(&json!(["a", {"id": "x", "value": "b"}])).unwrap();
        let ids: Vec<_> = list.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["item-0", "x"]);
        assert_eq!(list.items[0].value, json!("a"));
    }

    #[test]
    fn entry_accessors_agree_with_parse() {
        let data = json!([{"value": "a"}, {"id": "x"}, {"id": "y", "value": "b"}]);
        let entries = data.as_array().unwrap();
        let list = parse(&data).unwrap();
        for (index, (entry, item)) in entries.iter().zip(&list.items).enumerate() {
            assert_eq!(item_id(entry, index), item.id);
            assert_eq!(item_value(entry), &item.value);
        }

        let mut bare = json!("plain");
        *item_value_mut(&mut bare) = json!("edited");
        assert_eq!(bare, json!("edited"));
    }

    #[test]
    fn object_is_malformed() {
        assert_eq!(parse(&json!({"id": "x"})), None);
    }
}
