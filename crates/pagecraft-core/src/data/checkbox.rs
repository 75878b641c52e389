use super::{envelope, malformed, open_envelope, Data};

pub const CHECKBOX_V1: &str = "checkbox::v1";

/// Accepts a bare boolean or the v1 envelope.
pub fn parse(data: &Data) -> Option<bool> {
    match data {
        Data::Null => None,
        Data::Bool(value) => Some(*value),
        other => match open_envelope(other, CHECKBOX_V1).and_then(Data::as_bool) {
            Some(value) => Some(value),
            None => {
                malformed("checkbox", other);
                None
            }
        },
    }
}

pub fn to_data(value: bool) -> Data {
    envelope(CHECKBOX_V1, Data::Bool(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!(true), Some(true) ; "legacy bool")]
    #[test_case(json!({"@@pagecraft/type": "checkbox::v1", "value": false}), Some(false) ; "v1")]
    #[test_case(json!({"@@pagecraft/type": "checkbox::v2", "value": false}), None ; "unknown version")]
    #[test_case(json!("yes"), None ; "string")]
    #[test_case(Data::Null, None ; "null")]
    fn parses(data: Data, expected: Option<bool>) {
        assert_eq!(parse(&data), expected);
    }

    #[test]
    fn writes_current_version() {
        assert_eq!(parse(&to_data(true)), Some(true));
        assert_eq!(to_data(true)["@@pagecraft/type"], "checkbox::v1");
    }
}
