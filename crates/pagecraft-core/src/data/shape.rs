use super::{malformed, Data, Props};

/// Shape data is an object of field name to raw nested data.
pub fn parse(data: &Data) -> Option<&Props> {
    match data {
        Data::Null => None,
        Data::Object(fields) => Some(fields),
        other => {
            malformed("shape", other);
            None
        }
    }
}

pub fn to_data(fields: Props) -> Data {
    Data::Object(fields)
}
