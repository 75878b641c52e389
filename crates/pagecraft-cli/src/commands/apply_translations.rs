use std::path::Path;

use anyhow::Result;
use pagecraft_config::PagecraftConfig;
use pagecraft_core::{apply_document_translations, DocumentTranslations};

use crate::cli::DocumentArgs;
use crate::commands::device_or_base;
use crate::io;

pub fn execute(
    config: &PagecraftConfig,
    input: &DocumentArgs,
    translations: &Path,
    device: Option<String>,
) -> Result<()> {
    let registry = io::load_manifest(&input.manifest)?;
    let document = io::load_document(&input.document)?;
    let translations: DocumentTranslations = io::read_json(translations)?;
    let device = device_or_base(config, device);

    let translated = apply_document_translations(&registry, &document, &translations, &device);
    io::write_json(&translated)
}
