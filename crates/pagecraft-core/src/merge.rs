//! Merging a base value with an incoming one
//!
//! Incoming data wins for every kind except slots, whose children are merged
//! by key so that base-only children survive.

use std::collections::HashSet;

use tracing::warn;

use crate::data::{self, Data};
use crate::descriptor::Descriptor;
use crate::tree::DocumentTree;

pub struct MergeContext<'a> {
    /// Needed to merge slot children node by node. Without it slot keys are
    /// merged but the elements they refer to are left alone.
    pub tree: Option<&'a mut dyn DocumentTree>,
}

impl<'a> MergeContext<'a> {
    pub fn new(tree: &'a mut dyn DocumentTree) -> Self {
        Self { tree: Some(tree) }
    }

    pub fn detached() -> Self {
        Self { tree: None }
    }
}

/// Merge `incoming` into `base`. Absent incoming data keeps `base`.
pub fn merge(
    descriptor: &Descriptor,
    base: &Data,
    incoming: Option<&Data>,
    ctx: &mut MergeContext<'_>,
) -> Data {
    let Some(incoming) = incoming else {
        return base.clone();
    };

    match descriptor {
        Descriptor::Slot(_) => merge_slot(base, incoming, ctx),
        Descriptor::Checkbox(_)
        | Descriptor::Number(_)
        | Descriptor::TextInput(_)
        | Descriptor::TextArea(_)
        | Descriptor::Select(_)
        | Descriptor::IconRadioGroup(_)
        | Descriptor::Combobox(_)
        | Descriptor::Color(_)
        | Descriptor::ResponsiveColor(_)
        | Descriptor::Image(_)
        | Descriptor::Link(_)
        | Descriptor::List(_)
        | Descriptor::Shape(_)
        | Descriptor::Style(_)
        | Descriptor::StyleV2(_)
        | Descriptor::RichText(_)
        | Descriptor::RichTextV2(_)
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
        | Descriptor::Unknown => incoming.clone(),
    }
}

fn merge_slot(base: &Data, incoming: &Data, ctx: &mut MergeContext<'_>) -> Data {
    let Some(incoming_slot) = data::slot::parse(incoming) else {
        return incoming.clone();
    };
    let base_slot = data::slot::parse(base).unwrap_or_default();

    let keys = merge_order(&base_slot.elements, &incoming_slot.elements);
    let mut elements = Vec::with_capacity(keys.len());
    for key in keys {
        match ctx.tree.as_deref_mut() {
            Some(tree) => match tree.merge_subtrees(&key, &key) {
                Some(merged) => elements.push(merged),
                None => warn!(element = %key, "slot child missing from both documents, dropping it"),
            },
            None => elements.push(key),
        }
    }

    let columns = if incoming_slot.columns.is_empty() {
        base_slot.columns
    } else {
        incoming_slot.columns
    };
    data::slot::to_data(&data::SlotData { elements, columns })
}

/// Incoming order, with each base-only key placed right after the nearest
/// earlier base key that is already placed (or first when there is none).
fn merge_order(base: &[String], incoming: &[String]) -> Vec<String> {
    let mut order: Vec<String> = Vec::with_capacity(base.len() + incoming.len());
    let mut placed = HashSet::new();
    for key in incoming {
        if placed.insert(key.clone()) {
            order.push(key.clone());
        }
    }

    for (index, key) in base.iter().enumerate() {
        if placed.contains(key) {
            continue;
        }
        let position = base[..index]
            .iter()
            .rev()
            .find_map(|prev| order.iter().position(|k| k == prev))
            .map_or(0, |p| p + 1);
        order.insert(position, key.clone());
        placed.insert(key.clone());
    }
    order
}
