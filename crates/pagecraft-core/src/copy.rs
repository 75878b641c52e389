//! Deep copy of prop data
//!
//! Copy clones a value structurally and replaces the identifiers it embeds
//! according to the [`IdRemap`] of the current operation. Containers are
//! edited in place: keys the copy does not understand, malformed entries and
//! the stored layout all come through as they were. Only the identifier
//! leaves change. The one exception is Slate rich text under the second
//! generation rich-text kind, which is upgraded to the current layout.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::data::{self, border, link, rich_text, Data, LinkAction, LinkData, Props};
use crate::descriptor::{Descriptor, ListDescriptor, ShapeDescriptor, StyleV2Descriptor};
use crate::ids::{IdNamespace, IdRemap};
use crate::tree::DocumentTree;

/// State shared by every nested copy within one operation.
pub struct CopyContext<'a> {
    pub ids: &'a mut IdRemap,
    /// Needed to duplicate slot children. Without it slot references are only
    /// rewritten to keys already remapped in this operation.
    pub tree: Option<&'a mut dyn DocumentTree>,
}

impl<'a> CopyContext<'a> {
    pub fn new(ids: &'a mut IdRemap, tree: &'a mut dyn DocumentTree) -> Self {
        Self {
            ids,
            tree: Some(tree),
        }
    }

    pub fn detached(ids: &'a mut IdRemap) -> Self {
        Self { ids, tree: None }
    }
}

/// Copy `data` stored for `descriptor`.
pub fn copy(descriptor: &Descriptor, data: &Data, ctx: &mut CopyContext<'_>) -> Data {
    if data.is_null() {
        return Data::Null;
    }

    match descriptor {
        Descriptor::Checkbox(_)
        | Descriptor::Number(_)
        | Descriptor::TextInput(_)
        | Descriptor::TextArea(_)
        | Descriptor::Select(_)
        | Descriptor::IconRadioGroup(_)
        | Descriptor::Combobox(_)
        | Descriptor::Width(_)
        | Descriptor::Margin(_)
        | Descriptor::Padding(_)
        | Descriptor::BorderRadius(_)
        | Descriptor::ResponsiveLength(_)
        | Descriptor::ResponsiveSelect(_) => data.clone(),
        Descriptor::Unknown => {
            debug!("copying data of unknown kind unchanged");
            data.clone()
        }
        Descriptor::Color(_) => {
            let mut copied = data.clone();
            remap_swatch(&mut copied, ctx.ids);
            copied
        }
        Descriptor::ResponsiveColor(_) => {
            let mut copied = data.clone();
            for_each_override_mut(&mut copied, |color| remap_swatch(color, ctx.ids));
            copied
        }
        Descriptor::Image(_) => match data::image::parse(data) {
            Some(data::ImageData::File { id }) => {
                let id = ctx.ids.remap(IdNamespace::File, &id);
                data::image::to_data(&data::ImageData::File { id })
            }
            Some(external) => data::image::to_data(&external),
            None => data.clone(),
        },
        Descriptor::Link(_) => match link::parse(data) {
            Some(parsed) => link::to_data(&copy_link(parsed, ctx.ids)),
            None => data.clone(),
        },
        Descriptor::List(list) => copy_list(list, data, ctx),
        Descriptor::Shape(shape) => copy_shape(shape, data, ctx),
        Descriptor::Style(_) => {
            let mut copied = data.clone();
            if let Some(borders) = copied.get_mut("border") {
                for_each_override_mut(borders, |line| {
                    if let Some(color) = line.get_mut("color") {
                        remap_swatch(color, ctx.ids);
                    }
                });
            }
            copied
        }
        Descriptor::StyleV2(style) => copy_style_v2(style, data, ctx),
        Descriptor::Border(_) => {
            let mut copied = data.clone();
            for_each_override_mut(&mut copied, |sides| {
                for key in border::SIDE_KEYS {
                    if let Some(color) = sides.get_mut(key).and_then(|line| line.get_mut("color")) {
                        remap_swatch(color, ctx.ids);
                    }
                }
            });
            copied
        }
        Descriptor::Shadows(_) => {
            let mut copied = data.clone();
            for_each_override_mut(&mut copied, |layers| {
                for layer in layers.as_array_mut().into_iter().flatten() {
                    if let Some(color) = layer.get_mut("payload").and_then(|p| p.get_mut("color")) {
                        remap_swatch(color, ctx.ids);
                    }
                }
            });
            copied
        }
        Descriptor::Typography(_) => {
            let mut copied = data.clone();
            if let Some(style) = copied.get_mut("style") {
                for_each_override_mut(style, |value| {
                    if let Some(color) = value.get_mut("color") {
                        remap_swatch(color, ctx.ids);
                    }
                });
            }
            copied
        }
        Descriptor::RichText(_) => copy_rich_text_links(data, ctx.ids),
        Descriptor::RichTextV2(_) if rich_text::is_legacy(data) => match rich_text::parse(data) {
            Some(mut doc) => {
                let ids = &mut *ctx.ids;
                doc.for_each_element_mut(|element| copy_link_attribute(&mut element.attributes, ids));
                rich_text::to_data(&doc)
            }
            None => data.clone(),
        },
        Descriptor::RichTextV2(_) => copy_rich_text_links(data, ctx.ids),
        Descriptor::Slot(_) => copy_slot(data, ctx),
        Descriptor::ElementId(_) => match data::text::parse_element_id(data) {
            Some(id) => Data::from(ctx.ids.remap(IdNamespace::ElementHtmlId, id)),
            None => data.clone(),
        },
    }
}

/// Rewrite the `swatchId` of a stored color. Anything else is left alone.
fn remap_swatch(color: &mut Data, ids: &mut IdRemap) {
    if let Some(Value::String(swatch_id)) = color.get_mut("swatchId") {
        *swatch_id = ids.remap(IdNamespace::Swatch, swatch_id);
    }
}

/// Visit the `value` of every stored `{deviceId, value}` override.
fn for_each_override_mut(data: &mut Data, mut visit: impl FnMut(&mut Data)) {
    for entry in data.as_array_mut().into_iter().flatten() {
        if let Some(value) = entry.get_mut("value") {
            visit(value);
        }
    }
}

fn copy_link_attribute(attributes: &mut Map<String, Value>, ids: &mut IdRemap) {
    let Some(parsed) = attributes.get(rich_text::LINK_ATTRIBUTE).and_then(link::parse) else {
        return;
    };
    let copied = link::to_data(&copy_link(parsed, ids));
    attributes.insert(rich_text::LINK_ATTRIBUTE.to_string(), copied);
}

/// Links inside rich text, with the document kept in its stored layout.
fn copy_rich_text_links(data: &Data, ids: &mut IdRemap) -> Data {
    let mut copied = data.clone();
    rich_text::for_each_stored_element_mut(&mut copied, |attributes| {
        copy_link_attribute(attributes, ids)
    });
    copied
}

/// Page links are remapped. Scroll targets only follow elements that were
/// duplicated by the same operation.
fn copy_link(link: LinkData, ids: &mut IdRemap) -> LinkData {
    match link {
        LinkData::Action(LinkAction::OpenPage {
            page_id: Some(page_id),
            open_in_new_tab,
        }) => LinkData::Action(LinkAction::OpenPage {
            page_id: Some(ids.remap(IdNamespace::Page, &page_id)),
            open_in_new_tab,
        }),
        LinkData::Action(LinkAction::ScrollToElement {
            element_id_config: Some(mut target),
            block,
        }) => {
            if let Some(key) = ids.lookup(IdNamespace::ElementKey, &target.element_key) {
                target.element_key = key.to_string();
            }
            LinkData::Action(LinkAction::ScrollToElement {
                element_id_config: Some(target),
                block,
            })
        }
        other => other,
    }
}

fn copy_list(list: &ListDescriptor, data: &Data, ctx: &mut CopyContext<'_>) -> Data {
    let Some(entries) = data.as_array() else {
        data::malformed("list", data);
        return data.clone();
    };
    let copied = entries
        .iter()
        .map(|entry| {
            let value = copy(&list.item, data::list::item_value(entry), ctx);
            let mut entry = entry.clone();
            *data::list::item_value_mut(&mut entry) = value;
            entry
        })
        .collect();
    Data::Array(copied)
}

fn copy_style_v2(style: &StyleV2Descriptor, data: &Data, ctx: &mut CopyContext<'_>) -> Data {
    let mut copied = data.clone();
    for_each_override_mut(&mut copied, |value| *value = copy(&style.config, value, ctx));
    copied
}

fn copy_shape(shape: &ShapeDescriptor, data: &Data, ctx: &mut CopyContext<'_>) -> Data {
    let Some(fields) = data::shape::parse(data) else {
        return data.clone();
    };
    let copied: Props = fields
        .iter()
        .map(|(name, value)| {
            let value = match shape.fields.get(name) {
                Some(field) => copy(field, value, ctx),
                None => value.clone(),
            };
            (name.clone(), value)
        })
        .collect();
    data::shape::to_data(copied)
}

fn copy_slot(data: &Data, ctx: &mut CopyContext<'_>) -> Data {
    let Some(mut slot) = data::slot::parse(data) else {
        return data.clone();
    };

    let mut elements = Vec::with_capacity(slot.elements.len());
    for key in &slot.elements {
        match ctx.tree.as_deref_mut() {
            Some(tree) => match tree.clone_subtree(key, ctx.ids) {
                Some(new_key) => elements.push(new_key),
                None => warn!(element = %key, "slot refers to a missing element, dropping it"),
            },
            None => elements.push(
                ctx.ids
                    .lookup(IdNamespace::ElementKey, key)
                    .unwrap_or(key.as_str())
                    .to_string(),
            ),
        }
    }
    slot.elements = elements;
    data::slot::to_data(&slot)
}
