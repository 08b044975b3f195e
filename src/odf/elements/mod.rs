//! ODF XML element classes.
//!
//! A read-only, namespace-aware element tree for `content.xml` and typed views
//! over the table model it contains.

/// Core element functionality
pub mod element;
/// Namespace handling utilities
pub mod namespace;
/// Table-related elements (tables, rows, cells)
pub mod table;
/// Repeated cell and row handling
pub mod table_expansion;
