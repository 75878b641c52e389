use super::{envelope, malformed, open_envelope, Data};

pub const NUMBER_V1: &str = "number::v1";

/// Accepts a bare finite number or the v1 envelope.
pub fn parse(data: &Data) -> Option<f64> {
    let value = match data {
        Data::Null => return None,
        Data::Number(n) => n.as_f64(),
        other => open_envelope(other, NUMBER_V1).and_then(Data::as_f64),
    };

    match value {
        Some(n) if n.is_finite() => Some(n),
        _ => {
            malformed("number", data);
            None
        }
    }
}

pub fn to_data(value: f64) -> Data {
    envelope(NUMBER_V1, Data::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_legacy_and_v1() {
        assert_eq!(parse(&json!(12)), Some(12.0));
        assert_eq!(parse(&json!(1.5)), Some(1.5));
        assert_eq!(parse(&json!({"@@pagecraft/type": "number::v1", "value": 3})), Some(3.0));
        assert_eq!(parse(&json!("12")), None);
    }

    #[test]
    fn round_trips_through_current_shape() {
        assert_eq!(parse(&to_data(42.25)), Some(42.25));
    }
}
