use std::path::Path;

use anyhow::Result;

use crate::io;

/// Load (hoisting legacy inline elements) and print the document.
pub fn execute(document: &Path) -> Result<()> {
    let document = io::load_document(document)?;
    io::write_json(&document)
}
