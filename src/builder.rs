//! Post-build orchestrator turning bundler output into an extension-shaped directory.

use crate::bundle::{
  audit_entry_bundles, propagate_manifest, resolve_stylesheet, rewrite_entry_document,
};
use crate::diagnostics::Diagnostics;
use crate::models::ReconcileReport;
use crate::project::ExtensionProjectLayout;

/// Runs the reconciliation steps against a finished build output directory.
pub struct ExtensionReconciler {
  layout: ExtensionProjectLayout,
}

impl ExtensionReconciler {
  /// Create a reconciler for the provided layout.
  pub fn new(layout: ExtensionProjectLayout) -> Self {
    Self { layout }
  }

  /// Resolve the stylesheet, rewrite the entry document, propagate the manifest and audit
  /// entry bundles, in that order.
  ///
  /// Missing inputs and I/O failures become warnings in the report; this never fails.
  pub fn run(&self) -> ReconcileReport {
    let layout = &self.layout;
    let output = layout.output_root();
    let _span = tracing::info_span!("reconcile", output = %output.display()).entered();

    if !output.is_dir() {
      tracing::debug!("output directory does not exist yet");
    }

    let mut diagnostics = Diagnostics::new();
    let stylesheet = resolve_stylesheet(layout, &mut diagnostics);
    let entry_document = rewrite_entry_document(layout, &mut diagnostics);
    let manifest = propagate_manifest(layout, &mut diagnostics);
    let missing_entries = audit_entry_bundles(layout, &mut diagnostics);

    ReconcileReport {
      stylesheet,
      entry_document,
      manifest,
      missing_entries,
      diagnostics,
    }
  }
}
