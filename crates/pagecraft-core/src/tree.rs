//! Element-tree collaborators for slot copy and merge

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::copy::{copy, CopyContext};
use crate::data::Data;
use crate::descriptor::Descriptor;
use crate::document::{referenced_elements, Document, DocumentError, ElementNode, Subtree};
use crate::ids::{IdNamespace, IdRemap};
use crate::merge::{merge, MergeContext};
use crate::registry::ComponentRegistry;

/// Access to the element tree that slot data refers into.
pub trait DocumentTree {
    fn get_subtree(&self, key: &str) -> Option<Subtree>;

    /// Duplicate the subtree at `key` and return the key of the copy.
    fn clone_subtree(&mut self, key: &str, ids: &mut IdRemap) -> Option<String>;

    /// Merge the incoming subtree at `incoming_key` over the base subtree at
    /// `base_key` and return the key of the result.
    fn merge_subtrees(&mut self, base_key: &str, incoming_key: &str) -> Option<String>;
}

/// Copies subtrees within one document.
pub struct TreeStore<'a> {
    registry: &'a ComponentRegistry,
    document: &'a mut Document,
}

impl<'a> TreeStore<'a> {
    pub fn new(registry: &'a ComponentRegistry, document: &'a mut Document) -> Self {
        Self { registry, document }
    }

    /// Key of the copy of `old`, never colliding with an existing element.
    fn mint_key(&self, old: &str, ids: &mut IdRemap) -> String {
        let key = ids.remap(IdNamespace::ElementKey, old);
        if key == old || self.document.elements.contains_key(&key) {
            return ids.regenerate(IdNamespace::ElementKey, old);
        }
        key
    }
}

impl DocumentTree for TreeStore<'_> {
    fn get_subtree(&self, key: &str) -> Option<Subtree> {
        self.document.subtree(self.registry, key)
    }

    fn clone_subtree(&mut self, key: &str, ids: &mut IdRemap) -> Option<String> {
        let subtree = self.get_subtree(key)?;

        // Every key is minted before any props are copied so references
        // between nodes of the subtree land on the copies.
        for old in subtree.elements.keys() {
            self.mint_key(old, ids);
        }

        let unknown = Descriptor::Unknown;
        for (old, node) in &subtree.elements {
            let mut ctx = CopyContext::detached(ids);
            let props = node
                .props
                .iter()
                .map(|(name, value)| {
                    let descriptor = self
                        .registry
                        .descriptor(&node.component_type, name)
                        .unwrap_or(&unknown);
                    (name.clone(), copy(descriptor, value, &mut ctx))
                })
                .collect();
            let new_key = ctx
                .ids
                .lookup(IdNamespace::ElementKey, old)
                .unwrap_or(old.as_str())
                .to_string();
            self.document.insert(
                new_key,
                ElementNode {
                    component_type: node.component_type.clone(),
                    props,
                },
            );
        }

        let root = ids.lookup(IdNamespace::ElementKey, &subtree.root)?.to_string();
        debug!(from = %subtree.root, to = %root, nodes = subtree.elements.len(), "duplicated subtree");
        Some(root)
    }

    fn merge_subtrees(&mut self, base_key: &str, incoming_key: &str) -> Option<String> {
        if base_key != incoming_key {
            warn!(base_key, incoming_key, "cannot merge distinct elements within one document");
        }
        self.document
            .elements
            .contains_key(incoming_key)
            .then(|| incoming_key.to_string())
    }
}

/// Merges two documents into a new one, node by node.
pub struct TreeMerge<'a> {
    registry: &'a ComponentRegistry,
    base: &'a Document,
    incoming: &'a Document,
    output: Document,
    in_progress: HashSet<String>,
}

impl<'a> TreeMerge<'a> {
    pub fn new(registry: &'a ComponentRegistry, base: &'a Document, incoming: &'a Document) -> Self {
        Self {
            registry,
            base,
            incoming,
            output: Document {
                root: incoming.root.clone().or_else(|| base.root.clone()),
                elements: Default::default(),
            },
            in_progress: HashSet::new(),
        }
    }

    pub fn into_document(self) -> Document {
        self.output
    }

    /// Copy a one-sided subtree into the output as is.
    fn adopt(&mut self, source: &Document, key: &str) -> Option<String> {
        let subtree = source.subtree(self.registry, key)?;
        for (k, node) in subtree.elements {
            self.output.elements.entry(k).or_insert(node);
        }
        Some(key.to_string())
    }

    fn merge_nodes(&mut self, key: &str, base: &ElementNode, incoming: &ElementNode) {
        let registry = self.registry;
        let unknown = Descriptor::Unknown;
        let null = Data::Null;
        let mut props = base.props.clone();
        let mut children = Vec::new();

        let names: Vec<&String> = base
            .props
            .keys()
            .chain(incoming.props.keys().filter(|k| !base.props.contains_key(*k)))
            .collect();
        for name in names {
            let descriptor = registry
                .descriptor(&incoming.component_type, name)
                .unwrap_or(&unknown);
            let base_value = base.props.get(name).unwrap_or(&null);
            let merged = merge(
                descriptor,
                base_value,
                incoming.props.get(name),
                &mut MergeContext::new(self),
            );
            children.extend(referenced_elements(descriptor, &merged));
            props.insert(name.clone(), merged);
        }

        self.output.insert(
            key,
            ElementNode {
                component_type: incoming.component_type.clone(),
                props,
            },
        );

        // Children referenced through non-slot kinds (or slots nested in
        // lists) are not merged by `merge`; bring them over here.
        for child in children {
            if !self.output.elements.contains_key(&child) {
                self.merge_subtrees(&child, &child);
            }
        }
    }
}

impl DocumentTree for TreeMerge<'_> {
    fn get_subtree(&self, key: &str) -> Option<Subtree> {
        self.incoming
            .subtree(self.registry, key)
            .or_else(|| self.base.subtree(self.registry, key))
    }

    fn clone_subtree(&mut self, key: &str, _ids: &mut IdRemap) -> Option<String> {
        warn!(element = %key, "subtrees cannot be duplicated while merging");
        None
    }

    fn merge_subtrees(&mut self, base_key: &str, incoming_key: &str) -> Option<String> {
        if self.output.elements.contains_key(incoming_key) || self.in_progress.contains(incoming_key) {
            return Some(incoming_key.to_string());
        }

        let (base_doc, incoming_doc) = (self.base, self.incoming);
        match (base_doc.get(base_key), incoming_doc.get(incoming_key)) {
            (None, None) => None,
            (Some(_), None) => self.adopt(base_doc, base_key),
            (None, Some(_)) => self.adopt(incoming_doc, incoming_key),
            (Some(base), Some(incoming)) if base.component_type != incoming.component_type => {
                debug!(element = %incoming_key, "component type changed, taking incoming subtree");
                self.adopt(incoming_doc, incoming_key)
            }
            (Some(base), Some(incoming)) => {
                self.in_progress.insert(incoming_key.to_string());
                self.merge_nodes(incoming_key, base, incoming);
                self.in_progress.remove(incoming_key);
                Some(incoming_key.to_string())
            }
        }
    }
}

/// Duplicate the element at `key` with its subtree inside `document`.
pub fn duplicate_element(
    registry: &ComponentRegistry,
    document: &mut Document,
    key: &str,
    ids: &mut IdRemap,
) -> Result<String, DocumentError> {
    let mut store = TreeStore::new(registry, document);
    store
        .clone_subtree(key, ids)
        .ok_or_else(|| DocumentError::MissingElement(key.to_string()))
}

/// Merge `incoming` over `base`. Elements reachable from neither root are
/// carried over as well.
pub fn merge_documents(
    registry: &ComponentRegistry,
    base: &Document,
    incoming: &Document,
) -> Document {
    let mut tree = TreeMerge::new(registry, base, incoming);
    if let Some(root) = tree.output.root.clone() {
        tree.merge_subtrees(&root, &root);
    }
    for key in incoming.elements.keys().chain(base.elements.keys()) {
        tree.merge_subtrees(key, key);
    }
    tree.into_document()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Options;
    use crate::ids::SequentialIds;
    use crate::registry::ComponentMeta;
    use pagecraft_config::IdPolicies;
    use serde_json::json;

    fn registry() -> ComponentRegistry {
        let mut registry = ComponentRegistry::new();
        registry
            .register(
                ComponentMeta::new("Box", "Box")
                    .with_prop("children", Descriptor::Slot(Options::default()))
                    .with_prop("anchor", Descriptor::ElementId(Options::default())),
            )
            .unwrap();
        registry
            .register(
                ComponentMeta::new("Button", "Button")
                    .with_prop("label", Descriptor::TextInput(Options::default()))
                    .with_prop("link", Descriptor::Link(Options::default())),
            )
            .unwrap();
        registry
    }

    fn page() -> Document {
        let mut document = Document {
            root: Some("root".into()),
            ..Document::default()
        };
        document.insert(
            "root",
            ElementNode::new("Box").with_prop("children", json!({"elements": ["section"]})),
        );
        document.insert(
            "section",
            ElementNode::new("Box")
                .with_prop("children", json!({"elements": ["target", "button"]}))
                .with_prop("anchor", json!("top")),
        );
        document.insert("target", ElementNode::new("Box"));
        document.insert(
            "button",
            ElementNode::new("Button")
                .with_prop("label", json!("Go"))
                .with_prop(
                    "link",
                    json!({"type": "SCROLL_TO_ELEMENT", "payload": {
                        "elementIdConfig": {"elementKey": "target", "propName": "anchor"}
                    }}),
                ),
        );
        document
    }

    #[test]
    fn duplicate_rewires_internal_links() {
        let registry = registry();
        let mut document = page();
        let mut ids = IdRemap::with_generator(IdPolicies::default(), SequentialIds::new());

        let copy_key = duplicate_element(&registry, &mut document, "section", &mut ids).unwrap();
        assert_eq!(document.elements.len(), 7);

        let copied = document.get(&copy_key).unwrap();
        let children = copied.props["children"]["elements"].as_array().unwrap();
        assert_eq!(children.len(), 2);
        assert_ne!(children[0], "target");
        assert_ne!(copied.props["anchor"], "top");

        let new_target = children[0].as_str().unwrap();
        let new_button = document.get(children[1].as_str().unwrap()).unwrap();
        assert_eq!(
            new_button.props["link"]["value"]["payload"]["elementIdConfig"]["elementKey"],
            new_target
        );
        assert_eq!(
            document.get("button").unwrap().props["link"]["payload"]["elementIdConfig"]
                ["elementKey"],
            "target"
        );
    }

    #[test]
    fn duplicating_a_missing_element_fails() {
        let registry = registry();
        let mut document = page();
        let mut ids = IdRemap::default();
        assert!(matches!(
            duplicate_element(&registry, &mut document, "nope", &mut ids),
            Err(DocumentError::MissingElement(_))
        ));
    }

    #[test]
    fn merge_keeps_base_only_children_and_props() {
        let registry = registry();
        let base = page();

        let mut incoming = Document {
            root: Some("root".into()),
            ..Document::default()
        };
        incoming.insert(
            "root",
            ElementNode::new("Box").with_prop("children", json!({"elements": ["section"]})),
        );
        incoming.insert(
            "section",
            ElementNode::new("Box").with_prop("children", json!({"elements": ["button", "new"]})),
        );
        incoming.insert(
            "button",
            ElementNode::new("Button").with_prop("label", json!("Go now")),
        );
        incoming.insert("new", ElementNode::new("Box"));

        let merged = merge_documents(&registry, &base, &incoming);

        let section = merged.get("section").unwrap();
        assert_eq!(
            section.props["children"]["elements"],
            json!(["target", "button", "new"])
        );
        assert_eq!(section.props["anchor"], "top");

        let button = merged.get("button").unwrap();
        assert_eq!(button.props["label"], "Go now");
        assert!(button.props.contains_key("link"));
        assert!(merged.get("new").is_some());
        assert!(merged.get("target").is_some());
    }
}
