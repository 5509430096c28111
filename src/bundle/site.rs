//! Entry document patching for the extension popup.

use std::fs;
use std::sync::OnceLock;

use anyhow::Context;
use regex::bytes::Regex;

use crate::bundle::install::write_derived;
use crate::diagnostics::{Diagnostics, Step};
use crate::models::EntryDocumentOutcome;
use crate::project::ExtensionProjectLayout;

fn source_script_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(r#"src="(/[^"]+\.(?:tsx|ts|jsx|mjs|js))""#).expect("invalid source script regex")
  })
}

/// Replace the first development script reference with the built asset reference.
///
/// Operates on raw bytes so templates in any ASCII-compatible encoding pass through intact.
/// Returns the rewritten document and whether the reference was present.
pub fn rewrite_script_reference(
  document: &[u8],
  reference: &str,
  replacement: &str,
) -> (Vec<u8>, bool) {
  let needle = reference.as_bytes();
  let position = if needle.is_empty() {
    None
  } else {
    document
      .windows(needle.len())
      .position(|window| window == needle)
  };

  let Some(start) = position else {
    return (document.to_vec(), false);
  };

  let mut patched = Vec::with_capacity(document.len() + replacement.len());
  patched.extend_from_slice(&document[..start]);
  patched.extend_from_slice(replacement.as_bytes());
  patched.extend_from_slice(&document[start + needle.len()..]);
  (patched, true)
}

/// Root-relative script references still present in a document.
pub fn leftover_source_scripts(document: &[u8]) -> Vec<String> {
  source_script_pattern()
    .captures_iter(document)
    .filter_map(|caps| caps.get(1))
    .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
    .collect()
}

/// Copy the entry template into the output directory with its script reference rewritten.
///
/// A missing template skips the step without a warning.
pub fn rewrite_entry_document(
  layout: &ExtensionProjectLayout,
  diagnostics: &mut Diagnostics,
) -> EntryDocumentOutcome {
  let template = layout.entry_template_path();
  if !template.is_file() {
    diagnostics.info(
      Step::EntryDocument,
      format!("no template at {}, skipping", template.display()),
    );
    return EntryDocumentOutcome::TemplateMissing;
  }

  let read =
    fs::read(&template).with_context(|| format!("failed to read {}", template.display()));
  let document = match read {
    Ok(document) => document,
    Err(err) => {
      diagnostics.warn(Step::EntryDocument, format!("{err:#}"));
      return EntryDocumentOutcome::Failed;
    }
  };
  if std::str::from_utf8(&document).is_err() {
    diagnostics.info(
      Step::EntryDocument,
      format!(
        "{} is not valid UTF-8; bytes are preserved",
        template.display()
      ),
    );
  }

  let (patched, reference_rewritten) = rewrite_script_reference(
    &document,
    &layout.script_reference,
    &layout.script_replacement,
  );

  if !reference_rewritten {
    let leftovers = leftover_source_scripts(&patched);
    if leftovers.is_empty() {
      diagnostics.warn(
        Step::EntryDocument,
        format!(
          "{} not found in {}; copied unchanged",
          layout.script_reference,
          template.display()
        ),
      );
    } else {
      diagnostics.warn(
        Step::EntryDocument,
        format!(
          "{} not found; document still references {}",
          layout.script_reference,
          leftovers.join(", ")
        ),
      );
    }
  }

  let destination = layout.entry_document_path();
  match write_derived(&template, &destination, &patched) {
    Ok(written) => {
      let label = layout.display_in_output(&destination);
      if written {
        diagnostics.success(Step::EntryDocument, format!("{label} written"));
      } else {
        diagnostics.info(
          Step::EntryDocument,
          format!("{label} is the template itself; left untouched"),
        );
      }
      EntryDocumentOutcome::Written {
        reference_rewritten,
      }
    }
    Err(err) => {
      diagnostics.warn(Step::EntryDocument, format!("{err:#}"));
      EntryDocumentOutcome::Failed
    }
  }
}
