//! In-memory page documents
//!
//! A document is a flat map of element key to element node plus the key of
//! the root. Parents refer to children through slot data, so the tree shape
//! is only known together with the component registry.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::data::{self, Data, Props};
use crate::descriptor::Descriptor;
use crate::registry::ComponentRegistry;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("invalid document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("root element {0} is not in the document")]
    MissingRoot(String),

    #[error("element {0} is not in the document")]
    MissingElement(String),

    #[error("element key {0} is used more than once")]
    DuplicateElement(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(default)]
    pub props: Props,
}

impl ElementNode {
    pub fn new(component_type: impl Into<String>) -> Self {
        Self {
            component_type: component_type.into(),
            props: Props::new(),
        }
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: Data) -> Self {
        self.props.insert(name.into(), value);
        self
    }
}

/// A set of elements reachable from `root`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subtree {
    pub root: String,
    pub elements: BTreeMap<String, ElementNode>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(default)]
    pub elements: BTreeMap<String, ElementNode>,
}

impl Document {
    /// Parse a document, hoisting elements that older documents stored inline
    /// in slot data.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let mut document: Document = serde_json::from_str(json)?;
        document.hoist_inline_elements()?;
        if let Some(root) = &document.root {
            if !document.elements.contains_key(root) {
                return Err(DocumentError::MissingRoot(root.clone()));
            }
        }
        Ok(document)
    }

    pub fn get(&self, key: &str) -> Option<&ElementNode> {
        self.elements.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, node: ElementNode) {
        self.elements.insert(key.into(), node);
    }

    fn hoist_inline_elements(&mut self) -> Result<(), DocumentError> {
        let mut pending: Vec<String> = self.elements.keys().cloned().collect();
        while let Some(key) = pending.pop() {
            let mut hoisted = Vec::new();
            if let Some(node) = self.elements.get_mut(&key) {
                for value in node.props.values_mut() {
                    hoisted.extend(data::slot::hoist_inline_elements(value));
                }
            }
            for (child_key, element) in hoisted {
                if self.elements.contains_key(&child_key) {
                    return Err(DocumentError::DuplicateElement(child_key));
                }
                let node: ElementNode = serde_json::from_value(Data::Object(element))?;
                debug!(element = %child_key, parent = %key, "hoisted inline element");
                self.elements.insert(child_key.clone(), node);
                pending.push(child_key);
            }
        }
        Ok(())
    }

    /// Keys of the elements `key` refers to through its props, in prop order.
    pub fn children(&self, registry: &ComponentRegistry, key: &str) -> Vec<String> {
        let Some(node) = self.elements.get(key) else {
            return Vec::new();
        };
        node.props
            .iter()
            .flat_map(|(name, value)| {
                registry
                    .descriptor(&node.component_type, name)
                    .map(|descriptor| referenced_elements(descriptor, value))
                    .unwrap_or_default()
            })
            .collect()
    }

    /// The element at `key` and everything below it. Missing children are
    /// skipped; a cycle is cut at the first repeated key.
    pub fn subtree(&self, registry: &ComponentRegistry, key: &str) -> Option<Subtree> {
        self.elements.get(key)?;

        let mut subtree = Subtree {
            root: key.to_string(),
            elements: BTreeMap::new(),
        };
        let mut visited = BTreeSet::new();
        let mut stack = vec![key.to_string()];
        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            let Some(node) = self.elements.get(&current) else {
                warn!(element = %current, "referenced element is missing");
                continue;
            };
            stack.extend(self.children(registry, &current));
            subtree.elements.insert(current, node.clone());
        }
        Some(subtree)
    }
}

/// Element keys referenced by `data`, found through slots nested anywhere in
/// lists and shapes.
pub fn referenced_elements(descriptor: &Descriptor, data: &Data) -> Vec<String> {
    match descriptor {
        Descriptor::Slot(_) => data::slot::parse(data)
            .map(|slot| slot.elements)
            .unwrap_or_default(),
        Descriptor::List(list) => data::list::parse(data)
            .map(|parsed| {
                parsed
                    .items
                    .iter()
                    .flat_map(|item| referenced_elements(&list.item, &item.value))
                    .collect()
            })
            .unwrap_or_default(),
        Descriptor::Shape(shape) => data::shape::parse(data)
            .map(|fields| {
                shape
                    .fields
                    .iter()
                    .filter_map(|(name, field)| fields.get(name).map(|value| (field, value)))
                    .flat_map(|(field, value)| referenced_elements(field, value))
                    .collect()
            })
            .unwrap_or_default(),
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
        | Descriptor::Unknown => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Options;
    use crate::registry::ComponentMeta;
    use serde_json::json;

    fn registry() -> ComponentRegistry {
        let mut registry = ComponentRegistry::new();
        registry
            .register(
                ComponentMeta::new("Box", "Box")
                    .with_prop("children", Descriptor::Slot(Options::default())),
            )
            .unwrap();
        registry
            .register(
                ComponentMeta::new("Text", "Text")
                    .with_prop("text", Descriptor::TextInput(Options::default())),
            )
            .unwrap();
        registry
    }

    #[test]
    fn hoists_nested_inline_elements() {
        let document = Document::from_json(
            &json!({
                "root": "page",
                "elements": {
                    "page": {"type": "Box", "props": {"children": {"elements": [
                        {"key": "inner", "type": "Box", "props": {"children": {"elements": [
                            {"key": "leaf", "type": "Text", "props": {"text": "hi"}}
                        ]}}}
                    ]}}}
                }
            })
            .to_string(),
        )
        .unwrap();

        assert_eq!(document.elements.len(), 3);
        assert_eq!(
            document.get("page").unwrap().props["children"]["elements"],
            json!(["inner"])
        );
        assert_eq!(document.get("leaf").unwrap().props["text"], "hi");
    }

    #[test]
    fn missing_root_is_an_error() {
        let err = Document::from_json(r#"{"root": "nope", "elements": {}}"#).unwrap_err();
        assert!(matches!(err, DocumentError::MissingRoot(key) if key == "nope"));
    }

    #[test]
    fn subtree_survives_cycles_and_dangling_keys() {
        let mut document = Document::default();
        document.insert(
            "a",
            ElementNode::new("Box").with_prop("children", json!({"elements": ["b", "ghost"]})),
        );
        document.insert(
            "b",
            ElementNode::new("Box").with_prop("children", json!({"elements": ["a"]})),
        );

        let subtree = document.subtree(&registry(), "a").unwrap();
        assert_eq!(subtree.elements.len(), 2);
        assert!(document.subtree(&registry(), "ghost").is_none());
    }

    #[test]
    fn finds_slots_inside_lists() {
        let descriptor = Descriptor::list(Descriptor::shape([(
            "body",
            Descriptor::Slot(Options::default()),
        )]));
        let data = json!([
            {"id": "1", "value": {"body": {"elements": ["x"]}}},
            {"id": "2", "value": {"body": {"elements": ["y", "z"]}}},
        ]);
        assert_eq!(referenced_elements(&descriptor, &data), ["x", "y", "z"]);
    }
}
