//! Project configuration loader describing the extension output layout.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::project::ExtensionProjectLayout;

/// File looked up in the project root by [`ProjectConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "webext.config.json";

/// Discoverable project configuration describing filesystem layout and output paths.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
  /// Bundler output directory relative to the project root.
  pub output_dir: String,
  /// Asset directory inside the output directory.
  pub assets_dir: String,
  /// Stylesheet name the extension host loads.
  pub stylesheet_target: String,
  /// Ordered stylesheet fallbacks copied onto the target when it is missing.
  pub stylesheet_candidates: Vec<String>,
  /// Entry document template relative to the project root.
  pub entry_template: String,
  /// Entry document name inside the output directory.
  pub entry_document: String,
  /// Script reference rewritten in the entry document.
  pub script_reference: String,
  /// Replacement pointing at the built script asset.
  pub script_replacement: String,
  /// Ordered manifest source locations relative to the project root.
  pub manifest_candidates: Vec<String>,
  /// Manifest name inside the output directory.
  pub manifest_file: String,
  /// Prefix identifying shared chunks.
  pub shared_chunk_prefix: String,
  /// Suffix identifying shared chunks.
  pub shared_chunk_suffix: String,
  /// Entry bundles the bundler is expected to emit.
  pub expected_entries: Vec<String>,
}

impl Default for ProjectConfig {
  fn default() -> Self {
    Self {
      output_dir: "dist".into(),
      assets_dir: "assets".into(),
      stylesheet_target: "content.css".into(),
      stylesheet_candidates: vec!["index.css".into(), "shared.css".into()],
      entry_template: "popup.html".into(),
      entry_document: "popup.html".into(),
      script_reference: r#"src="/popup.tsx""#.into(),
      script_replacement: r#"src="assets/popup.js""#.into(),
      manifest_candidates: vec!["manifest.json".into(), "public/manifest.json".into()],
      manifest_file: "manifest.json".into(),
      shared_chunk_prefix: "shared-".into(),
      shared_chunk_suffix: ".js".into(),
      expected_entries: vec!["content".into(), "popup".into()],
    }
  }
}

impl ProjectConfig {
  /// Attempt to load configuration from the provided project root.
  ///
  /// A missing or malformed configuration file falls back to the defaults so the
  /// post-build step keeps running with the conventional layout.
  pub fn discover(root: &Path) -> Self {
    let candidate = root.join(DEFAULT_CONFIG_FILE);
    if !candidate.is_file() {
      return Self::default();
    }
    match Self::from_path(&candidate) {
      Ok(config) => config,
      Err(err) => {
        tracing::warn!("ignoring {}: {err:#}", candidate.display());
        Self::default()
      }
    }
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path)
      .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
      .with_context(|| format!("failed to parse {}", path.display()))
  }

  /// Convert the configuration into an owned layout rooted at `root`.
  pub fn into_layout(self, root: impl Into<PathBuf>) -> ExtensionProjectLayout {
    ExtensionProjectLayout {
      root: root.into(),
      output_dir: self.output_dir,
      assets_dir: self.assets_dir,
      stylesheet_target: self.stylesheet_target,
      stylesheet_candidates: self.stylesheet_candidates,
      entry_template: self.entry_template,
      entry_document: self.entry_document,
      script_reference: self.script_reference,
      script_replacement: self.script_replacement,
      manifest_candidates: self.manifest_candidates,
      manifest_file: self.manifest_file,
      shared_chunk_prefix: self.shared_chunk_prefix,
      shared_chunk_suffix: self.shared_chunk_suffix,
      expected_entries: self.expected_entries,
    }
  }

  /// Borrowing conversion into a layout, cloning the underlying strings.
  pub fn to_layout(&self, root: impl Into<PathBuf>) -> ExtensionProjectLayout {
    self.clone().into_layout(root)
  }
}
