//! Status lines collected while reconciling the output directory.

use std::fmt;

use serde::Serialize;

/// Reconciliation step a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
  /// Canonical stylesheet resolution.
  Stylesheet,
  /// Entry document rewrite.
  EntryDocument,
  /// Manifest propagation and shared chunk scan.
  Manifest,
  /// Check for the entry bundles the bundler should have emitted.
  EntryBundles,
}

impl fmt::Display for Step {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Step::Stylesheet => "stylesheet",
      Step::EntryDocument => "entry-document",
      Step::Manifest => "manifest",
      Step::EntryBundles => "entry-bundles",
    };
    f.write_str(name)
  }
}

/// Outcome class of a diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
  /// The step produced its expected output.
  Success,
  /// Informational note with no effect on the output.
  Info,
  /// Degraded output; the build still proceeds.
  Warning,
}

/// A single human-readable status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
  /// Step that produced the line.
  pub step: Step,
  /// Outcome class.
  pub severity: Severity,
  /// Message shown to the user.
  pub message: String,
}

/// Accumulates diagnostics and mirrors them to the tracing subscriber.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
  entries: Vec<Diagnostic>,
}

impl Diagnostics {
  /// Create an empty accumulator.
  pub fn new() -> Self {
    Self::default()
  }

  /// Record a successful outcome.
  pub fn success(&mut self, step: Step, message: impl Into<String>) {
    let message = message.into();
    tracing::info!(%step, "{message}");
    self.push(step, Severity::Success, message);
  }

  /// Record an informational note.
  pub fn info(&mut self, step: Step, message: impl Into<String>) {
    let message = message.into();
    tracing::debug!(%step, "{message}");
    self.push(step, Severity::Info, message);
  }

  /// Record a non-fatal warning.
  pub fn warn(&mut self, step: Step, message: impl Into<String>) {
    let message = message.into();
    tracing::warn!(%step, "{message}");
    self.push(step, Severity::Warning, message);
  }

  fn push(&mut self, step: Step, severity: Severity, message: String) {
    self.entries.push(Diagnostic {
      step,
      severity,
      message,
    });
  }

  /// All recorded diagnostics in emission order.
  pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
    self.entries.iter()
  }

  /// Diagnostics emitted by a single step.
  pub fn for_step(&self, step: Step) -> impl Iterator<Item = &Diagnostic> {
    self.entries.iter().filter(move |entry| entry.step == step)
  }

  /// Only the warnings.
  pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
    self
      .entries
      .iter()
      .filter(|entry| entry.severity == Severity::Warning)
  }

  /// Whether any warning was recorded.
  pub fn has_warnings(&self) -> bool {
    self.warnings().next().is_some()
  }

  /// Number of recorded diagnostics.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Whether nothing was recorded.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let marker = match self.severity {
      Severity::Success => "ok",
      Severity::Info => "info",
      Severity::Warning => "warning",
    };
    write!(f, "[{}] {}: {}", self.step, marker, self.message)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn filters_by_step_and_severity() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.success(Step::Stylesheet, "copied");
    diagnostics.warn(Step::Manifest, "no manifest");
    diagnostics.info(Step::EntryDocument, "template missing");

    assert_eq!(diagnostics.len(), 3);
    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.warnings().count(), 1);
    assert_eq!(diagnostics.for_step(Step::Stylesheet).count(), 1);
  }

  #[test]
  fn renders_status_line() {
    let diagnostic = Diagnostic {
      step: Step::EntryDocument,
      severity: Severity::Warning,
      message: "reference not found".into(),
    };
    assert_eq!(
      diagnostic.to_string(),
      "[entry-document] warning: reference not found"
    );
  }

  #[test]
  fn serialises_as_flat_list() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.success(Step::Manifest, "written");
    let json = serde_json::to_value(&diagnostics).unwrap();
    assert_eq!(json[0]["step"], "manifest");
    assert_eq!(json[0]["severity"], "success");
  }
}
