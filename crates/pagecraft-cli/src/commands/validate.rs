use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{bail, Result};
use serde::Serialize;
use tracing::warn;

use crate::io;

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    components: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    elements: Option<usize>,
    problems: Vec<String>,
}

pub fn execute(manifest: &Path, document: Option<&Path>) -> Result<()> {
    let registry = io::load_manifest(manifest)?;
    let mut report = Report {
        components: registry.components().count(),
        ..Report::default()
    };

    if let Some(path) = document {
        let document = io::load_document(path)?;
        report.elements = Some(document.elements.len());

        let mut referenced = BTreeSet::new();
        for (key, node) in &document.elements {
            let Some(component) = registry.get(&node.component_type) else {
                report.problems.push(format!(
                    "element {key} uses unregistered component {}",
                    node.component_type
                ));
                continue;
            };
            for name in node.props.keys() {
                if !component.props.contains_key(name) {
                    report
                        .problems
                        .push(format!("element {key} has undeclared prop {name}"));
                }
            }
            for child in document.children(&registry, key) {
                if document.get(&child).is_none() {
                    report
                        .problems
                        .push(format!("element {key} refers to missing element {child}"));
                }
                referenced.insert(child);
            }
        }

        for key in document.elements.keys() {
            if Some(key) != document.root.as_ref() && !referenced.contains(key) {
                warn!(element = %key, "element is not reachable from any slot");
            }
        }
    }

    io::write_json(&report)?;
    if !report.problems.is_empty() {
        bail!("{} problem(s) found", report.problems.len());
    }
    Ok(())
}
