//! Stylesheet helpers ensuring the extension host finds its content stylesheet.

use crate::bundle::install::copy_file;
use crate::diagnostics::{Diagnostics, Step};
use crate::models::StylesheetOutcome;
use crate::project::{ExtensionProjectLayout, first_existing};

/// Ensure the canonical stylesheet exists, copying the first fallback candidate onto it.
///
/// Never fails: a missing candidate or a failed copy is reported as a warning.
pub fn resolve_stylesheet(
  layout: &ExtensionProjectLayout,
  diagnostics: &mut Diagnostics,
) -> StylesheetOutcome {
  let target = layout.stylesheet_target_path();
  let target_label = layout.display_in_output(&target);

  if target.is_file() {
    diagnostics.success(Step::Stylesheet, format!("{target_label} already present"));
    return StylesheetOutcome::AlreadyPresent;
  }

  let candidates = layout.stylesheet_candidate_paths();
  let Some(source) = first_existing(&candidates) else {
    let mut searched = vec![layout.stylesheet_target.as_str()];
    searched.extend(layout.stylesheet_candidates.iter().map(String::as_str));
    diagnostics.warn(
      Step::Stylesheet,
      format!("no stylesheet found (looked for {})", searched.join(", ")),
    );
    return StylesheetOutcome::Missing;
  };

  match copy_file(source, &target) {
    Ok(_) => {
      diagnostics.success(
        Step::Stylesheet,
        format!(
          "copied {} to {target_label}",
          layout.display_in_output(source)
        ),
      );
      StylesheetOutcome::Copied {
        source: source.to_path_buf(),
      }
    }
    Err(err) => {
      diagnostics.warn(Step::Stylesheet, format!("{err:#}"));
      StylesheetOutcome::Failed {
        source: source.to_path_buf(),
      }
    }
  }
}
