//! End-to-end reconciliation scenarios against temporary project trees.

use std::fs;
use std::path::Path;

use tempfile::tempdir;
use webext_dist::{
  EntryDocumentOutcome, ExtensionProjectLayout, ExtensionReconciler, ManifestOutcome, Severity,
  Step, StylesheetOutcome,
};

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <title>Popup</title>
  </head>
  <body>
    <div id="popup-root"></div>
    <script type="module" src="/popup.tsx"></script>
  </body>
</html>
"#;

const MANIFEST: &str = r#"{
  "manifest_version": 3,
  "name": "Profile",
  "action": { "default_popup": "popup.html" },
  "content_scripts": [{ "matches": ["<all_urls>"], "js": ["assets/content.js"], "css": ["assets/content.css"] }]
}
"#;

fn write(path: &Path, contents: &str) {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).unwrap();
  }
  fs::write(path, contents).unwrap();
}

fn snapshot(root: &Path) -> Vec<(String, Vec<u8>)> {
  let mut files = Vec::new();
  let mut stack = vec![root.to_path_buf()];
  while let Some(dir) = stack.pop() {
    for entry in fs::read_dir(&dir).unwrap() {
      let path = entry.unwrap().path();
      if path.is_dir() {
        stack.push(path);
      } else {
        let relative = path.strip_prefix(root).unwrap().to_string_lossy().into_owned();
        files.push((relative, fs::read(&path).unwrap()));
      }
    }
  }
  files.sort();
  files
}

#[test]
fn empty_project_completes_with_warnings_only() {
  let dir = tempdir().unwrap();
  let layout = ExtensionProjectLayout::with_root(dir.path());

  let report = ExtensionReconciler::new(layout.clone()).run();

  assert_eq!(report.stylesheet, StylesheetOutcome::Missing);
  assert_eq!(report.entry_document, EntryDocumentOutcome::TemplateMissing);
  assert_eq!(report.manifest, ManifestOutcome::NoSource);
  assert_eq!(report.missing_entries, vec!["content".to_string(), "popup".to_string()]);
  assert!(
    report
      .diagnostics
      .iter()
      .all(|line| line.severity != Severity::Success)
  );
  assert!(!layout.output_root().exists());
}

#[test]
fn index_stylesheet_is_copied_and_kept() {
  let dir = tempdir().unwrap();
  let layout = ExtensionProjectLayout::with_root(dir.path());
  let index = layout.assets_root().join("index.css");
  write(&index, ".card{color:#111}");

  let report = ExtensionReconciler::new(layout.clone()).run();

  assert_eq!(report.stylesheet, StylesheetOutcome::Copied { source: index.clone() });
  assert_eq!(
    fs::read(layout.stylesheet_target_path()).unwrap(),
    fs::read(&index).unwrap()
  );
  assert!(index.exists());
  assert!(
    report
      .diagnostics
      .for_step(Step::Stylesheet)
      .all(|line| line.severity == Severity::Success)
  );
}

#[test]
fn entry_document_rewrite_is_exact() {
  let dir = tempdir().unwrap();
  let layout = ExtensionProjectLayout::with_root(dir.path());
  write(&layout.entry_template_path(), TEMPLATE);

  ExtensionReconciler::new(layout.clone()).run();

  let written = fs::read_to_string(layout.entry_document_path()).unwrap();
  assert!(written.contains(r#"src="assets/popup.js""#));
  assert!(!written.contains(r#"src="/popup.tsx""#));
  assert_eq!(
    written,
    TEMPLATE.replace(r#"src="/popup.tsx""#, r#"src="assets/popup.js""#)
  );
  assert_eq!(fs::read_to_string(layout.entry_template_path()).unwrap(), TEMPLATE);
}

#[test]
fn root_manifest_wins_over_public() {
  let dir = tempdir().unwrap();
  let layout = ExtensionProjectLayout::with_root(dir.path());
  write(&dir.path().join("manifest.json"), MANIFEST);
  write(&dir.path().join("public/manifest.json"), r#"{"name":"stale"}"#);

  ExtensionReconciler::new(layout.clone()).run();

  assert_eq!(fs::read_to_string(layout.manifest_output_path()).unwrap(), MANIFEST);
}

#[test]
fn shared_chunks_do_not_change_manifest_payload() {
  let dir = tempdir().unwrap();
  let layout = ExtensionProjectLayout::with_root(dir.path());
  write(&layout.assets_root().join("shared-ab12.js"), "export const x = 1;");
  write(&dir.path().join("public/manifest.json"), MANIFEST);

  let report = ExtensionReconciler::new(layout.clone()).run();

  match report.manifest {
    ManifestOutcome::Written { shared_chunks, .. } => {
      assert_eq!(shared_chunks, vec!["assets/shared-ab12.js".to_string()]);
    }
    other => panic!("manifest not written: {other:?}"),
  }
  assert_eq!(fs::read(layout.manifest_output_path()).unwrap(), MANIFEST.as_bytes());
}

#[test]
fn second_run_leaves_output_identical() {
  let dir = tempdir().unwrap();
  let layout = ExtensionProjectLayout::with_root(dir.path());
  write(&layout.assets_root().join("shared.css"), "body{margin:0}");
  write(&layout.entry_bundle_path("content"), "console.log('content');");
  write(&layout.entry_bundle_path("popup"), "console.log('popup');");
  write(&layout.entry_template_path(), TEMPLATE);
  write(&dir.path().join("manifest.json"), MANIFEST);

  let reconciler = ExtensionReconciler::new(layout.clone());
  let first = reconciler.run();
  let after_first = snapshot(&layout.output_root());
  let second = reconciler.run();
  let after_second = snapshot(&layout.output_root());

  assert!(first.is_clean());
  assert!(second.is_clean());
  assert_eq!(second.stylesheet, StylesheetOutcome::AlreadyPresent);
  assert_eq!(after_first, after_second);
}

#[test]
fn configured_layout_targets_other_paths() {
  let dir = tempdir().unwrap();
  let mut layout = ExtensionProjectLayout::with_root(dir.path());
  layout.output_dir = "build".into();
  layout.manifest_candidates = vec!["extension/manifest.json".into()];
  write(&dir.path().join("extension/manifest.json"), MANIFEST);
  write(&dir.path().join("manifest.json"), r#"{"ignored":true}"#);

  ExtensionReconciler::new(layout).run();

  assert_eq!(
    fs::read_to_string(dir.path().join("build/manifest.json")).unwrap(),
    MANIFEST
  );
  assert!(!dir.path().join("dist").exists());
}
