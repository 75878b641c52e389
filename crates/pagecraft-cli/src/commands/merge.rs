use std::path::Path;

use anyhow::Result;
use pagecraft_core::merge_documents;
use tracing::info;

use crate::io;

pub fn execute(manifest: &Path, base: &Path, incoming: &Path) -> Result<()> {
    let registry = io::load_manifest(manifest)?;
    let base = io::load_document(base)?;
    let incoming = io::load_document(incoming)?;

    let merged = merge_documents(&registry, &base, &incoming);
    info!(elements = merged.elements.len(), "merged documents");
    io::write_json(&merged)
}
