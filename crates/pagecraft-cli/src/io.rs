//! Reading inputs and writing results

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use pagecraft_core::{ComponentRegistry, Document};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

pub fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = read_to_string(path)?;
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}

pub fn load_manifest(path: &Path) -> Result<ComponentRegistry> {
    let registry = ComponentRegistry::from_manifest(&read_to_string(path)?)
        .with_context(|| format!("invalid component manifest {}", path.display()))?;
    debug!(path = %path.display(), components = registry.components().count(), "loaded manifest");
    Ok(registry)
}

pub fn load_document(path: &Path) -> Result<Document> {
    let document = Document::from_json(&read_to_string(path)?)
        .with_context(|| format!("invalid document {}", path.display()))?;
    debug!(path = %path.display(), elements = document.elements.len(), "loaded document");
    Ok(document)
}

/// Pretty JSON on stdout, newline terminated.
pub fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value).context("failed to write output")?;
    writeln!(out).context("failed to write output")?;
    Ok(())
}
