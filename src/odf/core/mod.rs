//! Core ODF package access.
//!
//! Opens the ZIP container, reads the `mimetype` entry and the manifest, and hands
//! out part bytes (chiefly `content.xml`) to the element tree.

/// ODF manifest parsing
mod manifest;
/// ODF package handling
mod package;

pub use manifest::{Manifest, ManifestEntry};
pub use package::Package;
