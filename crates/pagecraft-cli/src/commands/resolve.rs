use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use pagecraft_config::PagecraftConfig;
use pagecraft_core::{
    resolve_element_props, Breakpoints, Palette, Props, ResolveContext, ResolvedValue,
    ResourceIndex,
};
use serde::Serialize;

use crate::cli::DocumentArgs;
use crate::commands::device_or_base;
use crate::io;

#[derive(Serialize)]
struct ResolveOutput {
    element: String,
    #[serde(rename = "type")]
    component_type: String,
    device: String,
    props: BTreeMap<String, ResolvedValue>,
}

pub struct ResolveArgs {
    pub element: Option<String>,
    pub device: Option<String>,
    pub theme: Option<PathBuf>,
    pub resources: Option<PathBuf>,
}

pub fn execute(config: &PagecraftConfig, input: &DocumentArgs, args: ResolveArgs) -> Result<()> {
    let registry = io::load_manifest(&input.manifest)?;
    let document = io::load_document(&input.document)?;

    let key = args
        .element
        .or_else(|| document.root.clone())
        .ok_or_else(|| anyhow!("document has no root; pass --element"))?;
    let node = document
        .get(&key)
        .ok_or_else(|| anyhow!("element {key} is not in the document"))?;

    let palette: Palette = match &args.theme {
        Some(path) => io::read_json(path)?,
        None => Palette::default(),
    };
    let mut resources: ResourceIndex = match &args.resources {
        Some(path) => io::read_json(path)?,
        None => ResourceIndex::default(),
    };
    resources.index_element_ids(&registry, &document);

    let breakpoints = Breakpoints::from_config(config);
    let device = device_or_base(config, args.device);
    let props = Props::new();
    let ctx = ResolveContext {
        device: &device,
        breakpoints: &breakpoints,
        theme: &palette,
        resources: &resources,
        props: &props,
        class_prefix: &config.resolve.class_name_prefix,
    };

    let resolved = resolve_element_props(&registry, node, &ctx);
    io::write_json(&ResolveOutput {
        element: key.clone(),
        component_type: node.component_type.clone(),
        device,
        props: resolved,
    })
}
