use serde_json::{Map, Value};

use super::{data_type, malformed, Data, DATA_TYPE_KEY};

pub const IMAGE_V1: &str = "image::v1";

/// Either an uploaded file or an external url.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageData {
    File {
        id: String,
    },
    External {
        url: String,
        width: Option<f64>,
        height: Option<f64>,
    },
}

/// Legacy data is the bare file id.
pub fn parse(data: &Data) -> Option<ImageData> {
    match data {
        Data::Null => None,
        Data::String(id) if !id.is_empty() => Some(ImageData::File { id: id.clone() }),
        Data::Object(map) if data_type(data) == Some(IMAGE_V1) => {
            let parsed = match map.get("type").and_then(Value::as_str) {
                Some("file") => map
                    .get("id")
                    .and_then(Value::as_str)
                    .map(|id| ImageData::File { id: id.to_string() }),
                Some("external") => {
                    map.get("url")
                        .and_then(Value::as_str)
                        .map(|url| ImageData::External {
                            url: url.to_string(),
                            width: map.get("width").and_then(Value::as_f64),
                            height: map.get("height").and_then(Value::as_f64),
                        })
                }
                _ => None,
            };
            if parsed.is_none() {
                malformed("image", data);
            }
            parsed
        }
        other => {
            malformed("image", other);
            None
        }
    }
}

pub fn to_data(image: &ImageData) -> Data {
    let mut map = Map::new();
    map.insert(DATA_TYPE_KEY.to_string(), Value::from(IMAGE_V1));
    match image {
        ImageData::File { id } => {
            map.insert("type".to_string(), Value::from("file"));
            map.insert("id".to_string(), Value::from(id.as_str()));
        }
        ImageData::External { url, width, height } => {
            map.insert("type".to_string(), Value::from("external"));
            map.insert("url".to_string(), Value::from(url.as_str()));
            if let Some(width) = width {
                map.insert("width".to_string(), Value::from(*width));
            }
            if let Some(height) = height {
                map.insert("height".to_string(), Value::from(*height));
            }
        }
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_string_is_file_id() {
        assert_eq!(
            parse(&json!("file-1")),
            Some(ImageData::File {
                id: "file-1".into()
            })
        );
    }

    #[test]
    fn external_keeps_dimensions() {
        let image = ImageData::External {
            url: "https://cdn.test/a.png".into(),
            width: Some(640.0),
            height: None,
        };
        assert_eq!(parse(&to_data(&image)), Some(image));
    }

    #[test]
    fn untagged_objects_are_malformed() {
        assert_eq!(parse(&json!({"type": "file", "id": "x"})), None);
    }
}
