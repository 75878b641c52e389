//! Per-device values
//!
//! A [`ResponsiveValue`] stores at most one override per device. Lookups that
//! apply breakpoint fallback live on [`Breakpoints`](crate::Breakpoints).

use serde::{Deserialize, Serialize};

use crate::data::Data;

/// One device's override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceOverride<T> {
    #[serde(rename = "deviceId")]
    pub device_id: String,
    pub value: T,
}

/// Ordered overrides, at most one per device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponsiveValue<T>(Vec<DeviceOverride<T>>);

impl<T> Default for ResponsiveValue<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> ResponsiveValue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A value with a single override for `device_id`.
    pub fn single(device_id: impl Into<String>, value: T) -> Self {
        Self(vec![DeviceOverride {
            device_id: device_id.into(),
            value,
        }])
    }

    /// Exact override for a device, without fallback.
    pub fn get(&self, device_id: &str) -> Option<&T> {
        self.0
            .iter()
            .find(|o| o.device_id == device_id)
            .map(|o| &o.value)
    }

    /// Set or replace the override for a device.
    pub fn set(&mut self, device_id: impl Into<String>, value: T) {
        let device_id = device_id.into();
        match self.0.iter_mut().find(|o| o.device_id == device_id) {
            Some(existing) => existing.value = value,
            None => self.0.push(DeviceOverride { device_id, value }),
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, device_id: impl Into<String>, value: T) -> Self {
        self.set(device_id, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeviceOverride<T>> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut DeviceOverride<T>> {
        self.0.iter_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> ResponsiveValue<U> {
        ResponsiveValue(
            self.0
                .iter()
                .map(|o| DeviceOverride {
                    device_id: o.device_id.clone(),
                    value: f(&o.value),
                })
                .collect(),
        )
    }

    /// Lenient parse of stored overrides.
    ///
    /// Entries that are not `{deviceId, value}` objects, or whose value
    /// `parse_value` rejects, are skipped. A repeated device keeps its first
    /// entry, matching lookup order.
    pub fn parse_with(data: &Data, mut parse_value: impl FnMut(&Data) -> Option<T>) -> Self {
        let Some(entries) = data.as_array() else {
            return Self::default();
        };

        let mut overrides: Vec<DeviceOverride<T>> = Vec::with_capacity(entries.len());
        for entry in entries {
            let Some(device_id) = entry.get("deviceId").and_then(Data::as_str) else {
                continue;
            };
            if overrides.iter().any(|o| o.device_id == device_id) {
                continue;
            }
            let Some(value) = entry.get("value").and_then(&mut parse_value) else {
                continue;
            };
            overrides.push(DeviceOverride {
                device_id: device_id.to_string(),
                value,
            });
        }
        Self(overrides)
    }

    /// Serialize with a per-value encoder.
    pub fn to_data_with(&self, mut encode: impl FnMut(&T) -> Data) -> Data {
        Data::Array(
            self.0
                .iter()
                .map(|o| {
                    serde_json::json!({
                        "deviceId": o.device_id,
                        "value": encode(&o.value),
                    })
                })
                .collect(),
        )
    }
}

impl<T> FromIterator<(String, T)> for ResponsiveValue<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        let mut value = Self::default();
        for (device_id, v) in iter {
            value.set(device_id, v);
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_replaces_existing_override() {
        let mut value = ResponsiveValue::single("desktop", 1);
        value.set("desktop", 2);
        value.set("mobile", 3);
        assert_eq!(value.get("desktop"), Some(&2));
        assert_eq!(value.len(), 2);
    }

    #[test]
    fn parse_skips_malformed_entries_and_duplicates() {
        let data = json!([
            { "deviceId": "desktop", "value": 10 },
            { "deviceId": "desktop", "value": 20 },
            { "value": 30 },
            { "deviceId": "mobile", "value": "wide" },
            "garbage"
        ]);
        let value = ResponsiveValue::parse_with(&data, Data::as_f64);
        assert_eq!(value.get("desktop"), Some(&10.0));
        assert_eq!(value.get("mobile"), None);
        assert_eq!(value.len(), 1);
    }

    #[test]
    fn non_array_parses_to_empty() {
        let value = ResponsiveValue::parse_with(&json!({"deviceId": "desktop"}), Data::as_f64);
        assert!(value.is_empty());
    }

    #[test]
    fn serializes_as_plain_array() {
        let value = ResponsiveValue::single("desktop", "a".to_string());
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!([{ "deviceId": "desktop", "value": "a" }])
        );
    }
}
