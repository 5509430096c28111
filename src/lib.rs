#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod builder;
pub mod bundle;
pub mod config;
pub mod diagnostics;
pub mod models;
pub mod project;

pub use builder::ExtensionReconciler;
pub use config::ProjectConfig;
pub use diagnostics::{Diagnostic, Diagnostics, Severity, Step};
pub use models::{EntryDocumentOutcome, ManifestOutcome, ReconcileReport, StylesheetOutcome};
pub use project::ExtensionProjectLayout;
