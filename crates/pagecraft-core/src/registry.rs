//! Registered components and their prop descriptors

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::data::Props;
use crate::descriptor::{Descriptor, PropsSnapshot};

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("component type already registered: {0}")]
    DuplicateComponent(String),

    #[error("invalid component manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("component {component} cannot be exported: {message}")]
    Export { component: String, message: String },
}

/// A component type and the descriptors of its props.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentMeta {
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub props: BTreeMap<String, Descriptor>,
}

impl ComponentMeta {
    pub fn new(component_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            component_type: component_type.into(),
            label: label.into(),
            icon: None,
            props: BTreeMap::new(),
        }
    }

    pub fn with_prop(mut self, name: impl Into<String>, descriptor: Descriptor) -> Self {
        self.props.insert(name.into(), descriptor);
        self
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct Manifest {
    components: Vec<ComponentMeta>,
}

#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    components: BTreeMap<String, ComponentMeta>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, component: ComponentMeta) -> Result<(), RegistryError> {
        if self.components.contains_key(&component.component_type) {
            return Err(RegistryError::DuplicateComponent(component.component_type));
        }
        debug!(
            component = %component.component_type,
            props = component.props.len(),
            "registered component"
        );
        self.components
            .insert(component.component_type.clone(), component);
        Ok(())
    }

    /// Load `{"components": [...]}`. Manifests only carry static options.
    pub fn from_manifest(json: &str) -> Result<Self, RegistryError> {
        let manifest: Manifest = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for component in manifest.components {
            registry.register(component)?;
        }
        Ok(registry)
    }

    /// Serialize the registry as a manifest. Fails when any component uses
    /// dynamic options.
    pub fn to_manifest(&self) -> Result<String, RegistryError> {
        for component in self.components.values() {
            if component.props.values().any(Descriptor::is_dynamic) {
                return Err(RegistryError::Export {
                    component: component.component_type.clone(),
                    message: "dynamic options cannot be serialized".to_string(),
                });
            }
        }
        let manifest = Manifest {
            components: self.components.values().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&manifest)?)
    }

    pub fn get(&self, component_type: &str) -> Option<&ComponentMeta> {
        self.components.get(component_type)
    }

    pub fn components(&self) -> impl Iterator<Item = &ComponentMeta> {
        self.components.values()
    }

    /// Declared descriptor, options unevaluated.
    pub fn descriptor(&self, component_type: &str, prop_name: &str) -> Option<&Descriptor> {
        self.components
            .get(component_type)
            .and_then(|c| c.props.get(prop_name))
    }

    /// Descriptor for one prop with its options evaluated against the raw
    /// props of the element. Unregistered components and props resolve to
    /// [`Descriptor::Unknown`] so their data passes through.
    pub fn resolve_descriptor(
        &self,
        component_type: &str,
        prop_name: &str,
        props: &Props,
        device: &str,
    ) -> Descriptor {
        match self.descriptor(component_type, prop_name) {
            Some(descriptor) => descriptor.evaluate(&PropsSnapshot::new(props), device),
            None => {
                debug!(component_type, prop_name, "no descriptor registered");
                Descriptor::Unknown
            }
        }
    }
}
