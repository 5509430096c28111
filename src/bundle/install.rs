//! File placement helpers shared by the reconciliation steps.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use same_file::is_same_file;

/// Copy `source` to `destination`, creating parent directories as needed.
///
/// Returns `false` when both paths already name the same file.
pub fn copy_file(source: &Path, destination: &Path) -> Result<bool> {
  if points_at_source(source, destination)? {
    return Ok(false);
  }

  ensure_parent(destination)?;
  fs::copy(source, destination).with_context(|| {
    format!(
      "failed to copy {} to {}",
      source.display(),
      destination.display()
    )
  })?;
  Ok(true)
}

/// Write `contents` to `destination` unless it is the file the contents came from.
pub fn write_derived(source: &Path, destination: &Path, contents: &[u8]) -> Result<bool> {
  if points_at_source(source, destination)? {
    return Ok(false);
  }

  ensure_parent(destination)?;
  fs::write(destination, contents)
    .with_context(|| format!("failed to write {}", destination.display()))?;
  Ok(true)
}

fn points_at_source(source: &Path, destination: &Path) -> Result<bool> {
  match is_same_file(source, destination) {
    Ok(same) => Ok(same),
    Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
    Err(err) => Err(err).with_context(|| {
      format!(
        "failed to compare {} with {}",
        source.display(),
        destination.display()
      )
    }),
  }
}

fn ensure_parent(path: &Path) -> Result<()> {
  if let Some(parent) = path.parent() {
    if !parent.as_os_str().is_empty() {
      fs::create_dir_all(parent)
        .with_context(|| format!("failed to create {}", parent.display()))?;
    }
  }
  Ok(())
}
