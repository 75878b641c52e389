//! Identifier remapping for copy operations
//!
//! One [`IdRemap`] lives for exactly one logical copy. Every reference to the
//! same original identifier within that copy resolves to the same replacement.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use pagecraft_config::{IdPolicies, IdPolicy};
use uuid::Uuid;

/// Kinds of identifiers that can appear inside data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdNamespace {
    File,
    Page,
    ElementKey,
    ElementHtmlId,
    Swatch,
}

impl fmt::Display for IdNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdNamespace::File => write!(f, "file"),
            IdNamespace::Page => write!(f, "page"),
            IdNamespace::ElementKey => write!(f, "element"),
            IdNamespace::ElementHtmlId => write!(f, "html-id"),
            IdNamespace::Swatch => write!(f, "swatch"),
        }
    }
}

impl FromStr for IdNamespace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(IdNamespace::File),
            "page" => Ok(IdNamespace::Page),
            "element" => Ok(IdNamespace::ElementKey),
            "html-id" => Ok(IdNamespace::ElementHtmlId),
            "swatch" => Ok(IdNamespace::Swatch),
            other => Err(format!("unknown identifier namespace: {other}")),
        }
    }
}

/// Source of fresh identifiers.
pub trait IdGenerator {
    fn generate(&mut self, namespace: IdNamespace) -> String;
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&mut self, _namespace: IdNamespace) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `"{namespace}-{n}"` identifiers, for tests and reproducible
/// tooling output.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&mut self, namespace: IdNamespace) -> String {
        self.next += 1;
        format!("{namespace}-{}", self.next)
    }
}

/// Old → new identifier tables for one copy operation.
pub struct IdRemap {
    policies: IdPolicies,
    generator: Box<dyn IdGenerator>,
    tables: HashMap<IdNamespace, HashMap<String, String>>,
}

impl fmt::Debug for IdRemap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdRemap")
            .field("policies", &self.policies)
            .field("tables", &self.tables)
            .finish_non_exhaustive()
    }
}

impl Default for IdRemap {
    fn default() -> Self {
        Self::new(IdPolicies::default())
    }
}

impl IdRemap {
    pub fn new(policies: IdPolicies) -> Self {
        Self::with_generator(policies, UuidGenerator)
    }

    pub fn with_generator(policies: IdPolicies, generator: impl IdGenerator + 'static) -> Self {
        Self {
            policies,
            generator: Box::new(generator),
            tables: HashMap::new(),
        }
    }

    pub fn policy(&self, namespace: IdNamespace) -> IdPolicy {
        match namespace {
            IdNamespace::File => self.policies.file,
            IdNamespace::Page => self.policies.page,
            IdNamespace::ElementKey => self.policies.element_key,
            IdNamespace::ElementHtmlId => self.policies.element_html_id,
            IdNamespace::Swatch => self.policies.swatch,
        }
    }

    /// Register an explicit replacement, e.g. a file id the host already
    /// duplicated in another site.
    pub fn seed(&mut self, namespace: IdNamespace, old: impl Into<String>, new: impl Into<String>) {
        self.tables
            .entry(namespace)
            .or_default()
            .insert(old.into(), new.into());
    }

    /// Replacement recorded so far, without minting one.
    pub fn lookup(&self, namespace: IdNamespace, old: &str) -> Option<&str> {
        self.tables
            .get(&namespace)
            .and_then(|table| table.get(old))
            .map(String::as_str)
    }

    /// Replacement for `old`, minting one when the namespace regenerates.
    pub fn remap(&mut self, namespace: IdNamespace, old: &str) -> String {
        if let Some(existing) = self.lookup(namespace, old) {
            return existing.to_string();
        }

        match self.policy(namespace) {
            IdPolicy::Preserve => old.to_string(),
            IdPolicy::Regenerate => {
                let fresh = self.generator.generate(namespace);
                self.seed(namespace, old, fresh.clone());
                fresh
            }
        }
    }

    /// Mint a fresh replacement for `old` whatever the namespace policy,
    /// replacing any earlier mapping.
    pub fn regenerate(&mut self, namespace: IdNamespace, old: &str) -> String {
        let fresh = self.generator.generate(namespace);
        self.seed(namespace, old, fresh.clone());
        fresh
    }

    /// Number of replacements recorded in a namespace.
    pub fn len(&self, namespace: IdNamespace) -> usize {
        self.tables.get(&namespace).map_or(0, HashMap::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remap() -> IdRemap {
        IdRemap::with_generator(IdPolicies::default(), SequentialIds::new())
    }

    #[test]
    fn same_original_maps_to_same_replacement() {
        let mut ids = remap();
        let first = ids.remap(IdNamespace::File, "a");
        let second = ids.remap(IdNamespace::File, "a");
        assert_eq!(first, second);
        assert_ne!(first, "a");
    }

    #[test]
    fn namespaces_are_independent() {
        let mut ids = remap();
        let file = ids.remap(IdNamespace::File, "a");
        let page = ids.remap(IdNamespace::Page, "a");
        assert_ne!(file, page);
        assert_eq!(ids.len(IdNamespace::File), 1);
    }

    #[test]
    fn preserve_policy_keeps_unseeded_ids() {
        let mut ids = remap();
        assert_eq!(ids.remap(IdNamespace::Swatch, "s1"), "s1");
        assert_eq!(ids.lookup(IdNamespace::Swatch, "s1"), None);

        ids.seed(IdNamespace::Swatch, "s1", "s2");
        assert_eq!(ids.remap(IdNamespace::Swatch, "s1"), "s2");
    }

    #[test]
    fn seeded_replacement_wins_over_generation() {
        let mut ids = remap();
        ids.seed(IdNamespace::File, "a", "host-copy");
        assert_eq!(ids.remap(IdNamespace::File, "a"), "host-copy");
    }

    #[test]
    fn namespace_names_parse_back() {
        for namespace in [
            IdNamespace::File,
            IdNamespace::Page,
            IdNamespace::ElementKey,
            IdNamespace::ElementHtmlId,
            IdNamespace::Swatch,
        ] {
            assert_eq!(namespace.to_string().parse::<IdNamespace>(), Ok(namespace));
        }
        assert!("node".parse::<IdNamespace>().is_err());
    }

    #[test]
    fn uuid_generator_produces_distinct_ids() {
        let mut ids = IdRemap::default();
        assert_ne!(
            ids.remap(IdNamespace::File, "a"),
            ids.remap(IdNamespace::File, "b")
        );
    }
}
