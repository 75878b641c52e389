//! Stored data and its canonical shapes
//!
//! Every kind parses its stored [`Data`] (current or legacy) into one
//! canonical shape right after deserialization and writes that shape back in
//! the current version. Malformed data parses to `None`, which every operation
//! treats as "use the kind's default".

use serde_json::{Map, Value};
use tracing::debug;

pub mod border;
pub mod checkbox;
pub mod color;
pub mod combobox;
pub mod image;
pub mod length;
pub mod link;
pub mod list;
pub mod number;
pub mod rich_text;
pub mod shadow;
pub mod shape;
pub mod slot;
pub mod style;
pub mod text;
pub mod typography;

pub use border::{Border, BorderRadii, BorderSides, BorderStyle};
pub use color::ColorData;
pub use combobox::ComboboxValue;
pub use image::ImageData;
pub use length::{BoxSides, Length, LengthUnit, SideValue};
pub use link::{ElementIdConfig, LinkAction, LinkData, ScrollBlock};
pub use list::{ListData, ListItem};
pub use rich_text::{RichElement, RichNode, RichTextData, TextLeaf};
pub use shadow::Shadow;
pub use slot::{SlotColumn, SlotColumns, SlotData};
pub use style::StyleData;
pub use typography::{TypographyData, TypographyStyle};

/// Opaque stored value. `null` means nothing is stored.
pub type Data = Value;

/// A component's prop map, also used for shape data.
pub type Props = Map<String, Data>;

/// Key under which versioned data records its schema revision.
pub const DATA_TYPE_KEY: &str = "@@pagecraft/type";

/// Schema tag of a versioned value, if any.
pub fn data_type(data: &Data) -> Option<&str> {
    data.get(DATA_TYPE_KEY).and_then(Data::as_str)
}

/// `{DATA_TYPE_KEY: tag, "value": value}`.
pub(crate) fn envelope(tag: &str, value: Data) -> Data {
    let mut map = Map::new();
    map.insert(DATA_TYPE_KEY.to_string(), Value::String(tag.to_string()));
    map.insert("value".to_string(), value);
    Value::Object(map)
}

/// The payload of an envelope tagged `tag`.
pub(crate) fn open_envelope<'a>(data: &'a Data, tag: &str) -> Option<&'a Data> {
    if data_type(data) == Some(tag) {
        data.get("value")
    } else {
        None
    }
}

pub(crate) fn malformed(kind: &str, data: &Data) {
    debug!(kind, %data, "malformed data, using default");
}
