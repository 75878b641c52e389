use anyhow::Result;
use pagecraft_config::PagecraftConfig;
use pagecraft_core::extract_document;
use tracing::info;

use crate::cli::DocumentArgs;
use crate::commands::device_or_base;
use crate::io;

pub fn execute(config: &PagecraftConfig, input: &DocumentArgs, device: Option<String>) -> Result<()> {
    let registry = io::load_manifest(&input.manifest)?;
    let document = io::load_document(&input.document)?;
    let device = device_or_base(config, device);

    let translations = extract_document(&registry, &document, &device);
    info!(elements = translations.len(), %device, "extracted translatable text");
    io::write_json(&translations)
}
