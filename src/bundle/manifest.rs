//! Propagation of the extension manifest into the output directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::bundle::install::write_derived;
use crate::diagnostics::{Diagnostics, Step};
use crate::models::ManifestOutcome;
use crate::project::{ExtensionProjectLayout, first_existing};

/// List shared chunks in `assets_dir` as `<assets>/<name>` paths, sorted by name.
///
/// A missing directory yields an empty list.
pub fn scan_shared_chunks(
  assets_dir: &Path,
  assets_prefix: &str,
  prefix: &str,
  suffix: &str,
) -> Result<Vec<String>> {
  if !assets_dir.is_dir() {
    return Ok(Vec::new());
  }

  let mut chunks = Vec::new();
  for entry in fs::read_dir(assets_dir)
    .with_context(|| format!("failed to read assets directory at {}", assets_dir.display()))?
  {
    let entry = entry?;
    let file_name = entry.file_name();
    let Some(name) = file_name.to_str() else {
      continue;
    };

    if is_shared_chunk(name, prefix, suffix) {
      chunks.push(format!("{assets_prefix}/{name}"));
    }
  }

  chunks.sort();
  Ok(chunks)
}

/// Whether a file name follows the bundler's shared chunk naming.
pub fn is_shared_chunk(name: &str, prefix: &str, suffix: &str) -> bool {
  name.len() >= prefix.len() + suffix.len() && name.starts_with(prefix) && name.ends_with(suffix)
}

/// Copy the highest-priority manifest source into the output directory byte for byte.
///
/// Shared chunks are collected along the way but do not alter the written manifest.
pub fn propagate_manifest(
  layout: &ExtensionProjectLayout,
  diagnostics: &mut Diagnostics,
) -> ManifestOutcome {
  propagate_manifest_with(layout, diagnostics, |assets_dir| {
    scan_shared_chunks(
      assets_dir,
      &layout.assets_dir,
      &layout.shared_chunk_prefix,
      &layout.shared_chunk_suffix,
    )
  })
}

/// [`propagate_manifest`] with a caller-supplied shared chunk lister.
///
/// A lister error is downgraded to a warning and the manifest is still written.
pub fn propagate_manifest_with<F>(
  layout: &ExtensionProjectLayout,
  diagnostics: &mut Diagnostics,
  list_shared_chunks: F,
) -> ManifestOutcome
where
  F: FnOnce(&Path) -> Result<Vec<String>>,
{
  let candidates = layout.manifest_candidate_paths();
  let Some(source) = first_existing(&candidates) else {
    diagnostics.info(
      Step::Manifest,
      format!(
        "no manifest found (looked for {})",
        layout.manifest_candidates.join(", ")
      ),
    );
    return ManifestOutcome::NoSource;
  };

  let read = fs::read(source).with_context(|| format!("failed to read {}", source.display()));
  let content = match read {
    Ok(content) => content,
    Err(err) => {
      diagnostics.warn(Step::Manifest, format!("{err:#}"));
      return ManifestOutcome::Failed;
    }
  };

  if content.is_empty() {
    diagnostics.warn(
      Step::Manifest,
      format!("{} is empty; no manifest written", source.display()),
    );
    return ManifestOutcome::NoSource;
  }

  let shared_chunks = match list_shared_chunks(&layout.assets_root()) {
    Ok(chunks) => chunks,
    Err(err) => {
      diagnostics.warn(Step::Manifest, format!("{err:#}"));
      Vec::new()
    }
  };
  if !shared_chunks.is_empty() {
    diagnostics.info(
      Step::Manifest,
      format!("shared chunks present: {}", shared_chunks.join(", ")),
    );
  }

  let destination = layout.manifest_output_path();
  match write_derived(source, &destination, &content) {
    Ok(written) => {
      let label = layout.display_in_output(&destination);
      if written {
        diagnostics.success(
          Step::Manifest,
          format!("{label} copied from {}", source.display()),
        );
      } else {
        diagnostics.info(
          Step::Manifest,
          format!("{label} is the selected source; left untouched"),
        );
      }
      ManifestOutcome::Written {
        source: source.to_path_buf(),
        shared_chunks,
      }
    }
    Err(err) => {
      diagnostics.warn(Step::Manifest, format!("{err:#}"));
      ManifestOutcome::Failed
    }
  }
}
