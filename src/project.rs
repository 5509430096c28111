//! Explicit description of the project layout the reconciler operates on.

use std::path::{Path, PathBuf};

/// Every path and candidate list the reconciler needs, resolved against an explicit root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionProjectLayout {
  /// Project root all relative paths resolve against.
  pub root: PathBuf,
  /// Bundler output directory, relative to the root.
  pub output_dir: String,
  /// Directory inside the output holding generated assets.
  pub assets_dir: String,
  /// File name the extension host expects for the content stylesheet.
  pub stylesheet_target: String,
  /// Fallback stylesheet names, searched in order when the target is absent.
  pub stylesheet_candidates: Vec<String>,
  /// Static entry document template, relative to the root.
  pub entry_template: String,
  /// Destination of the rewritten entry document inside the output directory.
  pub entry_document: String,
  /// Development-time script reference found in the template.
  pub script_reference: String,
  /// Built asset reference substituted for [`Self::script_reference`].
  pub script_replacement: String,
  /// Manifest source locations relative to the root, highest priority first.
  pub manifest_candidates: Vec<String>,
  /// Manifest file name inside the output directory.
  pub manifest_file: String,
  /// File name prefix of bundler-generated shared chunks.
  pub shared_chunk_prefix: String,
  /// File name suffix of bundler-generated shared chunks.
  pub shared_chunk_suffix: String,
  /// Entry bundle names expected as `<assets>/<name>.js`.
  pub expected_entries: Vec<String>,
}

impl ExtensionProjectLayout {
  /// Layout with the conventional `dist/` structure rooted at `root`.
  pub fn with_root(root: impl Into<PathBuf>) -> Self {
    crate::config::ProjectConfig::default().into_layout(root)
  }

  /// Absolute bundler output directory.
  pub fn output_root(&self) -> PathBuf {
    self.root.join(&self.output_dir)
  }

  /// Directory holding generated assets.
  pub fn assets_root(&self) -> PathBuf {
    self.output_root().join(&self.assets_dir)
  }

  /// Canonical stylesheet location.
  pub fn stylesheet_target_path(&self) -> PathBuf {
    self.assets_root().join(&self.stylesheet_target)
  }

  /// Stylesheet fallbacks in priority order.
  pub fn stylesheet_candidate_paths(&self) -> Vec<PathBuf> {
    let assets = self.assets_root();
    self
      .stylesheet_candidates
      .iter()
      .map(|name| assets.join(name))
      .collect()
  }

  /// Template the entry document is produced from.
  pub fn entry_template_path(&self) -> PathBuf {
    self.root.join(&self.entry_template)
  }

  /// Entry document written into the output directory.
  pub fn entry_document_path(&self) -> PathBuf {
    self.output_root().join(&self.entry_document)
  }

  /// Manifest sources in priority order.
  pub fn manifest_candidate_paths(&self) -> Vec<PathBuf> {
    self
      .manifest_candidates
      .iter()
      .map(|candidate| self.root.join(candidate))
      .collect()
  }

  /// Manifest location inside the output directory.
  pub fn manifest_output_path(&self) -> PathBuf {
    self.output_root().join(&self.manifest_file)
  }

  /// Path of a named entry bundle inside the assets directory.
  pub fn entry_bundle_path(&self, entry: &str) -> PathBuf {
    self.assets_root().join(format!("{entry}.js"))
  }

  /// Display a path relative to the output directory when possible.
  pub fn display_in_output(&self, path: &Path) -> String {
    let output = self.output_root();
    path
      .strip_prefix(&output)
      .unwrap_or(path)
      .to_string_lossy()
      .replace('\\', "/")
  }
}

/// Return the first candidate that exists on disk.
pub fn first_existing(candidates: &[PathBuf]) -> Option<&Path> {
  candidates
    .iter()
    .map(PathBuf::as_path)
    .find(|candidate| candidate.is_file())
}
