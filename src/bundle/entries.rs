//! Check that the bundler emitted the entry bundles the extension loads.

use crate::diagnostics::{Diagnostics, Step};
use crate::project::ExtensionProjectLayout;

/// Return the expected entry bundles missing from the assets directory, warning for each.
pub fn audit_entry_bundles(
  layout: &ExtensionProjectLayout,
  diagnostics: &mut Diagnostics,
) -> Vec<String> {
  let mut missing = Vec::new();
  for entry in &layout.expected_entries {
    let path = layout.entry_bundle_path(entry);
    if !path.is_file() {
      diagnostics.warn(
        Step::EntryBundles,
        format!("entry bundle {} missing", layout.display_in_output(&path)),
      );
      missing.push(entry.clone());
    }
  }

  if missing.is_empty() && !layout.expected_entries.is_empty() {
    diagnostics.success(
      Step::EntryBundles,
      format!("entry bundles present: {}", layout.expected_entries.join(", ")),
    );
  }
  missing
}
