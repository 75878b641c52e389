//! Rich-text documents
//!
//! The canonical document is a list of descendant nodes: elements with a
//! `type`, attributes and children, and text leaves carrying their marks.
//! Nodes are addressed by dotted index paths (`"0.1.0"`), which is also how
//! translatable text is keyed.
//!
//! Documents written by the first editor generation used a Slate-style layout
//! (`document.nodes`, `object`, text `leaves` with `marks`). [`parse`] converts
//! those to the current layout. The `stored_*` helpers work on the stored JSON
//! directly and leave keys they do not touch as they are.

use serde_json::{Map, Value};

use super::{data_type, malformed, Data, DATA_TYPE_KEY};

pub const RICH_TEXT_V2: &str = "rich-text::v2";

/// Element attribute that holds link data on inline link elements.
pub const LINK_ATTRIBUTE: &str = "link";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextLeaf {
    pub text: String,
    pub marks: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RichElement {
    pub kind: String,
    pub attributes: Map<String, Value>,
    pub children: Vec<RichNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RichNode {
    Text(TextLeaf),
    Element(RichElement),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RichTextData {
    pub descendants: Vec<RichNode>,
}

impl RichTextData {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            descendants: vec![RichNode::Element(RichElement {
                kind: "paragraph".to_string(),
                attributes: Map::new(),
                children: vec![RichNode::Text(TextLeaf {
                    text: text.into(),
                    marks: Map::new(),
                })],
            })],
        }
    }

    /// Visit every element, depth first.
    pub fn for_each_element_mut(&mut self, mut visit: impl FnMut(&mut RichElement)) {
        walk_elements_mut(&mut self.descendants, &mut visit);
    }
}

fn walk_elements_mut(nodes: &mut [RichNode], visit: &mut impl FnMut(&mut RichElement)) {
    for node in nodes {
        if let RichNode::Element(element) = node {
            visit(element);
            walk_elements_mut(&mut element.children, visit);
        }
    }
}

/// Whether `data` is stored in the Slate layout.
pub fn is_legacy(data: &Data) -> bool {
    data_type(data) != Some(RICH_TEXT_V2) && data.get("document").is_some()
}

fn stored_descendants(data: &Data) -> Option<&Vec<Value>> {
    if data_type(data) == Some(RICH_TEXT_V2) {
        data.get("descendants")?.as_array()
    } else {
        data.as_array()
    }
}

fn stored_descendants_mut(data: &mut Data) -> Option<&mut Vec<Value>> {
    if data_type(data) == Some(RICH_TEXT_V2) {
        data.get_mut("descendants")?.as_array_mut()
    } else {
        data.as_array_mut()
    }
}

fn stored_children(node: &Value) -> Option<&Vec<Value>> {
    node.get("children").and_then(Value::as_array)
}

/// Every non-blank text leaf of a current-layout document with its index
/// path, in document order. `None` for Slate documents and malformed data.
pub fn stored_text_leaves(data: &Data) -> Option<Vec<(String, &str)>> {
    let nodes = stored_descendants(data)?;
    let mut leaves = Vec::new();
    collect_stored_leaves(nodes, "", &mut leaves);
    Some(leaves)
}

fn collect_stored_leaves<'a>(nodes: &'a [Value], prefix: &str, out: &mut Vec<(String, &'a str)>) {
    for (index, node) in nodes.iter().enumerate() {
        let path = if prefix.is_empty() {
            index.to_string()
        } else {
            format!("{prefix}.{index}")
        };
        if let Some(children) = stored_children(node) {
            collect_stored_leaves(children, &path, out);
        } else if let Some(text) = node.get("text").and_then(Value::as_str) {
            if !text.trim().is_empty() {
                out.push((path, text));
            }
        }
    }
}

/// Replace the text of the stored leaf at `path`. Returns `false` when the
/// path does not address a text leaf.
pub fn set_stored_text(data: &mut Data, path: &str, text: &str) -> bool {
    let indices: Option<Vec<usize>> = path.split('.').map(|part| part.parse().ok()).collect();
    let Some(indices) = indices else {
        return false;
    };
    let Some((&last, parents)) = indices.split_last() else {
        return false;
    };
    let Some(mut nodes) = stored_descendants_mut(data) else {
        return false;
    };
    for &index in parents {
        match nodes
            .get_mut(index)
            .and_then(|node| node.get_mut("children"))
            .and_then(Value::as_array_mut)
        {
            Some(children) => nodes = children,
            None => return false,
        }
    }
    match nodes.get_mut(last) {
        Some(node) if stored_children(node).is_none() => match node.get_mut("text") {
            Some(leaf @ Value::String(_)) => {
                *leaf = Value::from(text);
                true
            }
            _ => false,
        },
        _ => false,
    }
}

/// Visit the attributes of every stored element, depth first, in whichever
/// layout the document is stored. Slate elements keep theirs under `data`.
pub fn for_each_stored_element_mut(data: &mut Data, mut visit: impl FnMut(&mut Map<String, Value>)) {
    if is_legacy(data) {
        if let Some(nodes) = data
            .get_mut("document")
            .and_then(|document| document.get_mut("nodes"))
            .and_then(Value::as_array_mut)
        {
            walk_legacy_mut(nodes, &mut visit);
        }
    } else if let Some(nodes) = stored_descendants_mut(data) {
        walk_stored_mut(nodes, &mut visit);
    }
}

fn walk_stored_mut(nodes: &mut [Value], visit: &mut impl FnMut(&mut Map<String, Value>)) {
    for node in nodes {
        let Some(map) = node.as_object_mut() else {
            continue;
        };
        if !map.get("children").is_some_and(Value::is_array) {
            continue;
        }
        visit(map);
        if let Some(children) = map.get_mut("children").and_then(Value::as_array_mut) {
            walk_stored_mut(children, visit);
        }
    }
}

fn walk_legacy_mut(nodes: &mut [Value], visit: &mut impl FnMut(&mut Map<String, Value>)) {
    for node in nodes {
        if !matches!(
            node.get("object").and_then(Value::as_str),
            Some("block") | Some("inline")
        ) {
            continue;
        }
        if let Some(attributes) = node.get_mut("data").and_then(Value::as_object_mut) {
            visit(attributes);
        }
        if let Some(children) = node.get_mut("nodes").and_then(Value::as_array_mut) {
            walk_legacy_mut(children, visit);
        }
    }
}

pub fn parse(data: &Data) -> Option<RichTextData> {
    if data.is_null() {
        return None;
    }
    if data_type(data) == Some(RICH_TEXT_V2) {
        if let Some(nodes) = data.get("descendants").and_then(Value::as_array) {
            return Some(RichTextData {
                descendants: nodes.iter().filter_map(parse_node).collect(),
            });
        }
    } else if let Some(nodes) = data
        .get("document")
        .and_then(|document| document.get("nodes"))
        .and_then(Value::as_array)
    {
        return Some(RichTextData {
            descendants: nodes.iter().flat_map(parse_legacy_node).collect(),
        });
    } else if let Some(nodes) = data.as_array() {
        return Some(RichTextData {
            descendants: nodes.iter().filter_map(parse_node).collect(),
        });
    }

    malformed("rich-text", data);
    None
}

fn parse_node(node: &Value) -> Option<RichNode> {
    let map = node.as_object()?;
    if let Some(children) = map.get("children").and_then(Value::as_array) {
        let kind = map
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("paragraph")
            .to_string();
        let attributes = map
            .iter()
            .filter(|(key, _)| key.as_str() != "type" && key.as_str() != "children")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        return Some(RichNode::Element(RichElement {
            kind,
            attributes,
            children: children.iter().filter_map(parse_node).collect(),
        }));
    }

    let text = map.get("text").and_then(Value::as_str)?;
    let marks = map
        .iter()
        .filter(|(key, _)| key.as_str() != "text")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Some(RichNode::Text(TextLeaf {
        text: text.to_string(),
        marks,
    }))
}

fn legacy_marks(marks: Option<&Value>) -> Map<String, Value> {
    marks
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|mark| mark.get("type").and_then(Value::as_str))
        .map(|mark| (mark.to_string(), Value::Bool(true)))
        .collect()
}

/// One legacy node can expand to several leaves.
fn parse_legacy_node(node: &Value) -> Vec<RichNode> {
    match node.get("object").and_then(Value::as_str) {
        Some("text") => {
            if let Some(leaves) = node.get("leaves").and_then(Value::as_array) {
                leaves
                    .iter()
                    .map(|leaf| {
                        RichNode::Text(TextLeaf {
                            text: leaf
                                .get("text")
                                .and_then(Value::as_str)
                                .unwrap_or_default()
                                .to_string(),
                            marks: legacy_marks(leaf.get("marks")),
                        })
                    })
                    .collect()
            } else {
                vec![RichNode::Text(TextLeaf {
                    text: node
                        .get("text")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    marks: legacy_marks(node.get("marks")),
                })]
            }
        }
        Some("block") | Some("inline") => {
            let children = node
                .get("nodes")
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
                .flat_map(parse_legacy_node)
                .collect();
            vec![RichNode::Element(RichElement {
                kind: node
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or("paragraph")
                    .to_string(),
                attributes: node
                    .get("data")
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default(),
                children,
            })]
        }
        _ => Vec::new(),
    }
}

fn node_to_data(node: &RichNode) -> Value {
    match node {
        RichNode::Text(leaf) => {
            let mut map = leaf.marks.clone();
            map.insert("text".to_string(), Value::from(leaf.text.as_str()));
            Value::Object(map)
        }
        RichNode::Element(element) => {
            let mut map = element.attributes.clone();
            map.insert("type".to_string(), Value::from(element.kind.as_str()));
            map.insert(
                "children".to_string(),
                Value::Array(element.children.iter().map(node_to_data).collect()),
            );
            Value::Object(map)
        }
    }
}

pub fn to_data(rich_text: &RichTextData) -> Data {
    let mut map = Map::new();
    map.insert(DATA_TYPE_KEY.to_string(), Value::from(RICH_TEXT_V2));
    map.insert(
        "descendants".to_string(),
        Value::Array(rich_text.descendants.iter().map(node_to_data).collect()),
    );
    Value::Object(map)
}
