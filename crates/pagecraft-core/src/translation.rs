//! Extraction and re-injection of translatable text
//!
//! Extraction produces a payload mirroring the structure of the data but
//! holding only human-readable strings. Injection edits translated strings
//! into a copy of the stored data and leaves everything else alone, legacy
//! layouts and unknown keys included, so
//! `merge_translated_data(d, x, get_translatable_data(d, x))` returns `x`.
//!
//! Slot children are separate elements. Their text is extracted and applied
//! per element by [`extract_document`] and [`apply_document_translations`].

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::data::{self, rich_text, Data, Props};
use crate::descriptor::{Descriptor, PropsSnapshot};
use crate::document::Document;
use crate::registry::ComponentRegistry;

/// Translation payload of a whole document: element key → prop → payload.
pub type DocumentTranslations = BTreeMap<String, BTreeMap<String, Data>>;

/// Where a value sits: the device options are evaluated for and the props of
/// the object that holds it.
#[derive(Debug, Clone, Copy)]
pub struct TranslationContext<'a> {
    pub device: &'a str,
    pub props: &'a Props,
}

impl<'a> TranslationContext<'a> {
    pub fn new(device: &'a str, props: &'a Props) -> Self {
        Self { device, props }
    }

    fn within<'b>(&self, props: &'b Props) -> TranslationContext<'b>
    where
        'a: 'b,
    {
        TranslationContext {
            device: self.device,
            props,
        }
    }
}

/// Human-readable text in `data`, or `None` when there is none or the control
/// is hidden.
pub fn get_translatable_data(
    descriptor: &Descriptor,
    data: &Data,
    ctx: &TranslationContext<'_>,
) -> Option<Data> {
    if data.is_null() || descriptor.hidden(&PropsSnapshot::new(ctx.props), ctx.device) {
        return None;
    }

    match descriptor {
        Descriptor::TextInput(_) | Descriptor::TextArea(_) => {
            data::text::parse(data).map(|_| data.clone())
        }
        Descriptor::RichTextV2(_) => {
            let texts: Map<String, Value> = rich_text::stored_text_leaves(data)?
                .into_iter()
                .map(|(path, text)| (path, Value::from(text)))
                .collect();
            non_empty(texts)
        }
        Descriptor::List(list) => {
            let parsed = data::list::parse(data)?;
            let mut payload = Map::new();
            for item in &parsed.items {
                let item_ctx = match item.value.as_object() {
                    Some(fields) => ctx.within(fields),
                    None => *ctx,
                };
                if let Some(text) = get_translatable_data(&list.item, &item.value, &item_ctx) {
                    payload.insert(item.id.clone(), text);
                }
            }
            non_empty(payload)
        }
        Descriptor::Shape(shape) => {
            let fields = data::shape::parse(data)?;
            let field_ctx = ctx.within(fields);
            let payload: Map<String, Value> = shape
                .fields
                .iter()
                .filter_map(|(name, field)| {
                    let value = fields.get(name)?;
                    get_translatable_data(field, value, &field_ctx).map(|t| (name.clone(), t))
                })
                .collect();
            non_empty(payload)
        }
        Descriptor::Checkbox(_)
        | Descriptor::Number(_)
        | Descriptor::Select(_)
        | Descriptor::IconRadioGroup(_)
        | Descriptor::Combobox(_)
        | Descriptor::Color(_)
        | Descriptor::ResponsiveColor(_)
        | Descriptor::Image(_)
        | Descriptor::Link(_)
        | Descriptor::Style(_)
        | Descriptor::StyleV2(_)
        | Descriptor::RichText(_)
        | Descriptor::Slot(_)
        | Descriptor::Width(_)
        | Descriptor::Margin(_)
        | Descriptor::Padding(_)
        | Descriptor::Border(_)
        | Descriptor::BorderRadius(_)
        | Descriptor::Shadows(_)
        | Descriptor::Typography(_)
        | Descriptor::ResponsiveLength(_)
        | Descriptor::ResponsiveSelect(_)
        | Descriptor::ElementId(_)
        | Descriptor::Unknown => None,
    }
}

fn non_empty(map: Map<String, Value>) -> Option<Data> {
    (!map.is_empty()).then_some(Value::Object(map))
}

/// Write translated text from `payload` into a copy of `data`.
///
/// Branches missing from the payload, and `null` translations, keep the
/// original text.
pub fn merge_translated_data(
    descriptor: &Descriptor,
    data: &Data,
    payload: Option<&Data>,
    ctx: &TranslationContext<'_>,
) -> Data {
    let payload = match payload {
        Some(payload) if !payload.is_null() && !data.is_null() => payload,
        _ => return data.clone(),
    };

    match descriptor {
        Descriptor::TextInput(_) | Descriptor::TextArea(_) => match payload {
            Value::String(_) => payload.clone(),
            _ => data.clone(),
        },
        Descriptor::RichTextV2(_) => {
            let Some(texts) = payload.as_object().filter(|_| !rich_text::is_legacy(data)) else {
                return data.clone();
            };
            let mut translated = data.clone();
            for (path, text) in texts {
                if let Some(text) = text.as_str() {
                    if !rich_text::set_stored_text(&mut translated, path, text) {
                        debug!(path = %path, "translation targets no text leaf");
                    }
                }
            }
            translated
        }
        Descriptor::List(list) => {
            let Some(entries) = data.as_array() else {
                data::malformed("list", data);
                return data.clone();
            };
            let merged = entries
                .iter()
                .enumerate()
                .map(|(index, entry)| {
                    let value = data::list::item_value(entry);
                    let item_ctx = match value.as_object() {
                        Some(fields) => ctx.within(fields),
                        None => *ctx,
                    };
                    let id = data::list::item_id(entry, index);
                    let translated =
                        merge_translated_data(&list.item, value, payload.get(id.as_str()), &item_ctx);
                    let mut entry = entry.clone();
                    *data::list::item_value_mut(&mut entry) = translated;
                    entry
                })
                .collect();
            Data::Array(merged)
        }
        Descriptor::Shape(shape) => {
            let Some(fields) = data::shape::parse(data) else {
                return data.clone();
            };
            let field_ctx = ctx.within(fields);
            let mut merged = fields.clone();
            for (name, field) in &shape.fields {
                if let Some(value) = fields.get(name) {
                    let translated =
                        merge_translated_data(field, value, payload.get(name.as_str()), &field_ctx);
                    merged.insert(name.clone(), translated);
                }
            }
            data::shape::to_data(merged)
        }
        Descriptor::Checkbox(_)
        | Descriptor::Number(_)
        | Descriptor::Select(_)
        | Descriptor::IconRadioGroup(_)
        | Descriptor::Combobox(_)
        | Descriptor::Color(_)
        | Descriptor::ResponsiveColor(_)
        | Descriptor::Image(_)
        | Descriptor::Link(_)
        | Descriptor::Style(_)
        | Descriptor::StyleV2(_)
        | Descriptor::RichText(_)
        | Descriptor::Slot(_)
        | Descriptor::Width(_)
        | Descriptor::Margin(_)
        | Descriptor::Padding(_)
        | Descriptor::Border(_)
        | Descriptor::BorderRadius(_)
        | Descriptor::Shadows(_)
        | Descriptor::Typography(_)
        | Descriptor::ResponsiveLength(_)
        | Descriptor::ResponsiveSelect(_)
        | Descriptor::ElementId(_)
        | Descriptor::Unknown => data.clone(),
    }
}

/// Translatable text of every element in the document.
pub fn extract_document(
    registry: &ComponentRegistry,
    document: &Document,
    device: &str,
) -> DocumentTranslations {
    let mut translations = DocumentTranslations::new();
    for (key, node) in &document.elements {
        let ctx = TranslationContext::new(device, &node.props);
        let props: BTreeMap<String, Data> = node
            .props
            .iter()
            .filter_map(|(name, value)| {
                let descriptor = registry.descriptor(&node.component_type, name)?;
                get_translatable_data(descriptor, value, &ctx).map(|t| (name.clone(), t))
            })
            .collect();
        if !props.is_empty() {
            translations.insert(key.clone(), props);
        }
    }
    translations
}

/// A copy of `document` with `translations` applied.
pub fn apply_document_translations(
    registry: &ComponentRegistry,
    document: &Document,
    translations: &DocumentTranslations,
    device: &str,
) -> Document {
    let mut translated = document.clone();
    for (key, props) in translations {
        let (Some(original), Some(node)) = (document.get(key), translated.elements.get_mut(key))
        else {
            debug!(element = %key, "translation for unknown element");
            continue;
        };
        let ctx = TranslationContext::new(device, &original.props);
        for (name, payload) in props {
            let (Some(descriptor), Some(value)) = (
                registry.descriptor(&original.component_type, name),
                original.props.get(name),
            ) else {
                continue;
            };
            let merged = merge_translated_data(descriptor, value, Some(payload), &ctx);
            node.props.insert(name.clone(), merged);
        }
    }
    translated
}
