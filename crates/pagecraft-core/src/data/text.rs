//! Plain string data: text inputs, text areas, selects, icon radio groups and
//! element ids.

use super::{malformed, open_envelope, Data};

pub const ICON_RADIO_GROUP_V1: &str = "icon-radio-group::v1";

pub fn parse(data: &Data) -> Option<&str> {
    match data {
        Data::Null => None,
        Data::String(text) => Some(text),
        other => {
            malformed("text", other);
            None
        }
    }
}

pub fn to_data(text: &str) -> Data {
    Data::String(text.to_string())
}

/// Icon radio groups store the chosen value bare or in a versioned envelope.
pub fn parse_icon_radio(data: &Data) -> Option<&str> {
    parse(open_envelope(data, ICON_RADIO_GROUP_V1).unwrap_or(data))
}

/// Element ids must be non-empty and free of whitespace to be usable as html
/// ids.
pub fn parse_element_id(data: &Data) -> Option<&str> {
    parse(data).filter(|id| !id.is_empty() && !id.chars().any(char::is_whitespace))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_strings_parse() {
        assert_eq!(parse(&json!("hi")), Some("hi"));
        assert_eq!(parse(&json!(1)), None);
    }

    #[test]
    fn icon_radio_reads_both_layouts() {
        assert_eq!(parse_icon_radio(&json!("left")), Some("left"));
        assert_eq!(
            parse_icon_radio(&json!({"@@pagecraft/type": "icon-radio-group::v1", "value": "right"})),
            Some("right")
        );
        assert_eq!(parse_icon_radio(&json!(3)), None);
    }

    #[test]
    fn element_ids_reject_whitespace() {
        assert_eq!(parse_element_id(&json!("hero")), Some("hero"));
        assert_eq!(parse_element_id(&json!("my hero")), None);
        assert_eq!(parse_element_id(&json!("")), None);
    }
}
