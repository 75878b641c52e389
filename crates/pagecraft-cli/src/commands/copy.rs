use anyhow::{anyhow, Result};
use pagecraft_config::PagecraftConfig;
use pagecraft_core::{duplicate_element, Document, IdNamespace, IdRemap};
use serde::Serialize;
use tracing::info;

use crate::cli::DocumentArgs;
use crate::io;

#[derive(Serialize)]
struct CopyOutput {
    /// Key of the new element.
    element: String,
    document: Document,
}

/// Parse `namespace:old=new`.
pub fn parse_seed(seed: &str) -> Result<(IdNamespace, String, String)> {
    let (namespace, mapping) = seed
        .split_once(':')
        .ok_or_else(|| anyhow!("seed `{seed}` is not of the form namespace:old=new"))?;
    let (old, new) = mapping
        .split_once('=')
        .ok_or_else(|| anyhow!("seed `{seed}` is not of the form namespace:old=new"))?;
    if old.is_empty() || new.is_empty() {
        return Err(anyhow!("seed `{seed}` has an empty identifier"));
    }
    let namespace = namespace.parse::<IdNamespace>().map_err(|e| anyhow!(e))?;
    Ok((namespace, old.to_string(), new.to_string()))
}

pub fn execute(
    config: &PagecraftConfig,
    input: &DocumentArgs,
    element: &str,
    seeds: &[String],
) -> Result<()> {
    let registry = io::load_manifest(&input.manifest)?;
    let mut document = io::load_document(&input.document)?;

    let mut ids = IdRemap::new(config.copy.ids.clone());
    for seed in seeds {
        let (namespace, old, new) = parse_seed(seed)?;
        ids.seed(namespace, old, new);
    }

    let key = duplicate_element(&registry, &mut document, element, &mut ids)?;
    info!(from = %element, to = %key, "duplicated element");
    io::write_json(&CopyOutput {
        element: key,
        document,
    })
}
