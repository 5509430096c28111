//! Data structures produced while reconciling an extension output directory.

use std::path::PathBuf;

use serde::Serialize;

use crate::diagnostics::Diagnostics;

/// Result of canonical stylesheet resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StylesheetOutcome {
  /// The bundler already wrote the canonical stylesheet.
  AlreadyPresent,
  /// A fallback candidate was copied onto the canonical name.
  Copied {
    /// Candidate that was copied; it stays in place.
    source: PathBuf,
  },
  /// No stylesheet or fallback candidate exists.
  Missing,
  /// A candidate was found but copying it failed.
  Failed {
    /// Candidate whose copy failed.
    source: PathBuf,
  },
}

/// Result of the entry document rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryDocumentOutcome {
  /// No template exists; nothing was written.
  TemplateMissing,
  /// The document was written into the output directory.
  Written {
    /// Whether the development script reference was found and replaced.
    reference_rewritten: bool,
  },
  /// Reading the template or writing the copy failed.
  Failed,
}

/// Result of manifest propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ManifestOutcome {
  /// No manifest source exists, or the selected source is empty.
  NoSource,
  /// The selected manifest was copied unchanged.
  Written {
    /// Manifest source that won the priority search.
    source: PathBuf,
    /// Shared chunks found in the assets directory, as `assets/<name>`.
    ///
    /// Collected for inspection only; never merged into the written manifest.
    shared_chunks: Vec<String>,
  },
  /// A source was selected but reading it or writing the copy failed.
  Failed,
}

/// Everything observed during a single reconciliation run.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileReport {
  /// Stylesheet step result.
  pub stylesheet: StylesheetOutcome,
  /// Entry document step result.
  pub entry_document: EntryDocumentOutcome,
  /// Manifest step result.
  pub manifest: ManifestOutcome,
  /// Expected entry bundles absent from the assets directory.
  pub missing_entries: Vec<String>,
  /// Status lines in emission order.
  pub diagnostics: Diagnostics,
}

impl ReconcileReport {
  /// Whether every step produced its expected output without warnings.
  pub fn is_clean(&self) -> bool {
    !self.diagnostics.has_warnings()
  }
}
