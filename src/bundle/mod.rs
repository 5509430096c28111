//! Steps that reshape the bundler output into an extension package.

pub mod entries;
pub mod install;
pub mod manifest;
pub mod site;
pub mod styles;

pub use entries::audit_entry_bundles;
pub use manifest::{propagate_manifest, propagate_manifest_with, scan_shared_chunks};
pub use site::rewrite_entry_document;
pub use styles::resolve_stylesheet;
