//! Integration tests for the pagecraft binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const MANIFEST: &str = r##"{
    "components": [
        {
            "type": "Box",
            "label": "Box",
            "props": {
                "children": {"type": "slot"},
                "anchor": {"type": "element-id"},
                "background": {"type": "image", "format": "with-dimensions"}
            }
        },
        {
            "type": "Button",
            "label": "Button",
            "props": {
                "label": {"type": "text-input"},
                "link": {"type": "link"},
                "color": {"type": "color", "placeholder": "#000000"}
            }
        }
    ]
}"##;

const DOCUMENT: &str = r#"{
    "root": "root",
    "elements": {
        "root": {
            "type": "Box",
            "props": {
                "children": {"elements": ["hero", "cta"]},
                "anchor": "top",
                "background": "bg-file"
            }
        },
        "hero": {"type": "Box", "props": {"anchor": "hero"}},
        "cta": {
            "type": "Button",
            "props": {
                "label": "Read more",
                "link": {"type": "OPEN_PAGE", "payload": {"pageId": "gone"}},
                "color": {"swatchId": "brand"}
            }
        }
    }
}"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("manifest.json"), MANIFEST).unwrap();
        fs::write(dir.path().join("page.json"), DOCUMENT).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).unwrap();
        path
    }
}

fn pagecraft() -> Command {
    Command::cargo_bin("pagecraft").unwrap()
}

fn stdout_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).unwrap()
}

fn document_args(cmd: &mut Command, fixture: &Fixture) {
    cmd.arg("--manifest")
        .arg(fixture.path("manifest.json"))
        .arg("--document")
        .arg(fixture.path("page.json"));
}

#[test]
fn test_cli_help() {
    pagecraft()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_validate_reports_components_and_elements() {
    let fixture = Fixture::new();
    let output = pagecraft()
        .arg("validate")
        .arg("--manifest")
        .arg(fixture.path("manifest.json"))
        .arg("--document")
        .arg(fixture.path("page.json"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report = stdout_json(&output);
    assert_eq!(report["components"], 2);
    assert_eq!(report["elements"], 3);
    assert_eq!(report["problems"], serde_json::json!([]));
}

#[test]
fn test_validate_fails_on_unregistered_component() {
    let fixture = Fixture::new();
    let document = fixture.write(
        "broken.json",
        r#"{"elements": {"x": {"type": "Carousel", "props": {}}}}"#,
    );
    pagecraft()
        .arg("validate")
        .arg("--manifest")
        .arg(fixture.path("manifest.json"))
        .arg("--document")
        .arg(&document)
        .assert()
        .failure()
        .stdout(predicate::str::contains("unregistered component Carousel"));
}

#[test]
fn test_copy_duplicates_subtree_with_seeded_file() {
    let fixture = Fixture::new();
    let mut cmd = pagecraft();
    cmd.arg("copy");
    document_args(&mut cmd, &fixture);
    let output = cmd
        .arg("--element")
        .arg("root")
        .arg("--seed")
        .arg("file:bg-file=bg-copy")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let result = stdout_json(&output);
    let key = result["element"].as_str().unwrap();
    assert_ne!(key, "root");
    let copied = &result["document"]["elements"][key];
    assert_eq!(copied["props"]["background"]["id"], "bg-copy");
    assert_ne!(copied["props"]["anchor"], "top");
    assert_eq!(result["document"]["elements"].as_object().unwrap().len(), 6);
}

#[test]
fn test_copy_rejects_bad_seed() {
    let fixture = Fixture::new();
    let mut cmd = pagecraft();
    cmd.arg("copy");
    document_args(&mut cmd, &fixture);
    cmd.arg("--element")
        .arg("root")
        .arg("--seed")
        .arg("bg-file")
        .assert()
        .failure()
        .stderr(predicate::str::contains("namespace:old=new"));
}

#[test]
fn test_extract_then_apply_translations() {
    let fixture = Fixture::new();
    let mut cmd = pagecraft();
    cmd.arg("extract");
    document_args(&mut cmd, &fixture);
    let output = cmd.assert().success().get_output().stdout.clone();
    let extracted = stdout_json(&output);
    assert_eq!(extracted, serde_json::json!({"cta": {"label": "Read more"}}));

    let translations = fixture.write(
        "de.json",
        r#"{"cta": {"label": "Weiterlesen"}}"#,
    );
    let mut cmd = pagecraft();
    cmd.arg("apply-translations");
    document_args(&mut cmd, &fixture);
    let output = cmd
        .arg("--translations")
        .arg(&translations)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let translated = stdout_json(&output);
    assert_eq!(translated["elements"]["cta"]["props"]["label"], "Weiterlesen");
}

#[test]
fn test_resolve_uses_theme_and_resources() {
    let fixture = Fixture::new();
    let theme = fixture.write("theme.json", r##"{"swatches": {"brand": "#ff0000"}}"##);
    let resources = fixture.write(
        "resources.json",
        r#"{"files": {"bg-file": {"url": "https://cdn.test/bg.png", "width": 800}}}"#,
    );

    let mut cmd = pagecraft();
    cmd.arg("resolve");
    document_args(&mut cmd, &fixture);
    let output = cmd
        .arg("--element")
        .arg("cta")
        .arg("--device")
        .arg("mobile")
        .arg("--theme")
        .arg(&theme)
        .arg("--resources")
        .arg(&resources)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let resolved = stdout_json(&output);
    assert_eq!(resolved["device"], "mobile");
    assert_eq!(
        resolved["props"]["color"],
        serde_json::json!({"kind": "color", "value": "rgba(255, 0, 0, 1)"})
    );
    assert_eq!(resolved["props"]["link"]["value"]["action"], "no-op");

    let mut cmd = pagecraft();
    cmd.arg("resolve");
    document_args(&mut cmd, &fixture);
    let output = cmd
        .arg("--resources")
        .arg(&resources)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let root = stdout_json(&output);
    assert_eq!(root["element"], "root");
    assert_eq!(root["props"]["background"]["value"]["width"], 800.0);
}

#[test]
fn test_missing_file_is_reported() {
    let missing = Path::new("/nonexistent/pagecraft/page.json");
    pagecraft()
        .arg("normalize")
        .arg(missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_merge_prints_merged_document() {
    let fixture = Fixture::new();
    let incoming = fixture.write(
        "incoming.json",
        r#"{
            "root": "root",
            "elements": {
                "root": {"type": "Box", "props": {"children": {"elements": ["cta", "footer"]}}},
                "cta": {"type": "Button", "props": {"label": "Buy"}},
                "footer": {"type": "Box", "props": {}}
            }
        }"#,
    );
    let output = pagecraft()
        .arg("merge")
        .arg("--manifest")
        .arg(fixture.path("manifest.json"))
        .arg("--base")
        .arg(fixture.path("page.json"))
        .arg("--incoming")
        .arg(&incoming)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let merged = stdout_json(&output);
    assert_eq!(
        merged["elements"]["root"]["props"]["children"]["elements"],
        serde_json::json!(["hero", "cta", "footer"])
    );
    assert_eq!(merged["elements"]["cta"]["props"]["label"], "Buy");
    assert_eq!(merged["elements"]["root"]["props"]["anchor"], "top");
}
