//! Identifier policies for copy operations

use serde::{Deserialize, Serialize};

/// What a copy operation does with an identifier that has no explicit
/// replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdPolicy {
    /// Mint a fresh identifier, reused for every later reference to the same
    /// original within one operation.
    Regenerate,
    /// Keep the original identifier unless a replacement was seeded.
    Preserve,
}

/// Policy per identifier namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdPolicies {
    /// Uploaded file ids referenced by image data.
    pub file: IdPolicy,
    /// Page ids referenced by links.
    pub page: IdPolicy,
    /// Element keys in the document tree.
    pub element_key: IdPolicy,
    /// User-facing html ids stored by element-id controls.
    pub element_html_id: IdPolicy,
    /// Theme swatch ids referenced by colors.
    pub swatch: IdPolicy,
}

impl Default for IdPolicies {
    fn default() -> Self {
        Self {
            file: IdPolicy::Regenerate,
            page: IdPolicy::Regenerate,
            element_key: IdPolicy::Regenerate,
            element_html_id: IdPolicy::Regenerate,
            swatch: IdPolicy::Preserve,
        }
    }
}

/// Copy operation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyConfig {
    /// Identifier policies.
    pub ids: IdPolicies,
}
