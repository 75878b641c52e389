//! Site resources that link and image data point at

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data;
use crate::descriptor::Descriptor;
use crate::document::Document;
use crate::registry::ComponentRegistry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAsset {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// Lookups for pages, uploaded files and element html ids. `None` means the
/// target no longer exists.
pub trait SiteResources {
    /// Path of a page, e.g. `/about`.
    fn resolve_page(&self, page_id: &str) -> Option<String>;

    fn resolve_file(&self, file_id: &str) -> Option<FileAsset>;

    /// Html id stored in the `prop_name` element-id prop of an element.
    fn resolve_element_id(&self, element_key: &str, prop_name: &str) -> Option<String>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceIndex {
    pub pages: BTreeMap<String, String>,
    pub files: BTreeMap<String, FileAsset>,
    /// element key → prop name → html id
    pub element_ids: BTreeMap<String, BTreeMap<String, String>>,
}

impl ResourceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page_id: impl Into<String>, path: impl Into<String>) -> Self {
        self.pages.insert(page_id.into(), path.into());
        self
    }

    pub fn with_file(mut self, file_id: impl Into<String>, asset: FileAsset) -> Self {
        self.files.insert(file_id.into(), asset);
        self
    }

    /// Record the element ids stored in `document`, keeping entries that are
    /// already present.
    pub fn index_element_ids(&mut self, registry: &ComponentRegistry, document: &Document) {
        for (key, node) in &document.elements {
            for (name, value) in &node.props {
                if !matches!(
                    registry.descriptor(&node.component_type, name),
                    Some(Descriptor::ElementId(_))
                ) {
                    continue;
                }
                if let Some(id) = data::text::parse_element_id(value) {
                    self.element_ids
                        .entry(key.clone())
                        .or_default()
                        .entry(name.clone())
                        .or_insert_with(|| id.to_string());
                }
            }
        }
    }
}

impl SiteResources for ResourceIndex {
    fn resolve_page(&self, page_id: &str) -> Option<String> {
        self.pages.get(page_id).cloned()
    }

    fn resolve_file(&self, file_id: &str) -> Option<FileAsset> {
        self.files.get(file_id).cloned()
    }

    fn resolve_element_id(&self, element_key: &str, prop_name: &str) -> Option<String> {
        self.element_ids
            .get(element_key)
            .and_then(|props| props.get(prop_name))
            .cloned()
    }
}
