//! ODF MIME types and package part paths.
//!
//! Only the document classes that can carry `table:table` content are accepted by
//! the reader: text, spreadsheet and presentation documents and their templates.

use phf::{Map, phf_map};

// ============================================================================
// MIME TYPES
// ============================================================================

/// MIME type for OpenDocument Text (.odt)
pub const ODF_TEXT: &str = "application/vnd.oasis.opendocument.text";

/// MIME type for OpenDocument Text Template (.ott)
pub const ODF_TEXT_TEMPLATE: &str = "application/vnd.oasis.opendocument.text-template";

/// MIME type for OpenDocument Spreadsheet (.ods)
pub const ODF_SPREADSHEET: &str = "application/vnd.oasis.opendocument.spreadsheet";

/// MIME type for OpenDocument Spreadsheet Template (.ots)
pub const ODF_SPREADSHEET_TEMPLATE: &str =
    "application/vnd.oasis.opendocument.spreadsheet-template";

/// MIME type for OpenDocument Presentation (.odp)
pub const ODF_PRESENTATION: &str = "application/vnd.oasis.opendocument.presentation";

/// MIME type for OpenDocument Presentation Template (.otp)
pub const ODF_PRESENTATION_TEMPLATE: &str =
    "application/vnd.oasis.opendocument.presentation-template";

/// MIME type for OpenDocument Drawing (.odg)
pub const ODF_DRAWING: &str = "application/vnd.oasis.opendocument.graphics";

/// Document class of a table-bearing package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// OpenDocument Text (.odt, .ott)
    Text,
    /// OpenDocument Spreadsheet (.ods, .ots)
    Spreadsheet,
    /// OpenDocument Presentation (.odp, .otp)
    Presentation,
}

/// Table-bearing MIME types (compile-time perfect hash map)
static TABLE_MIMETYPES: Map<&'static str, DocumentKind> = phf_map! {
    "application/vnd.oasis.opendocument.text" => DocumentKind::Text,
    "application/vnd.oasis.opendocument.text-template" => DocumentKind::Text,
    "application/vnd.oasis.opendocument.spreadsheet" => DocumentKind::Spreadsheet,
    "application/vnd.oasis.opendocument.spreadsheet-template" => DocumentKind::Spreadsheet,
    "application/vnd.oasis.opendocument.presentation" => DocumentKind::Presentation,
    "application/vnd.oasis.opendocument.presentation-template" => DocumentKind::Presentation,
};

// ============================================================================
// STANDARD ODF PARTS PATHS
// ============================================================================

/// Path to the uncompressed mimetype entry
pub const ODF_MIMETYPE: &str = "mimetype";

/// Path to content.xml (main document content)
pub const ODF_CONTENT: &str = "content.xml";

/// Path to manifest.xml (package manifest)
pub const ODF_MANIFEST: &str = "META-INF/manifest.xml";

/// Classify a MIME type, returning `None` for packages without table content.
///
/// # Examples
///
/// ```
/// use odfgrid::odf::constants::{document_kind, DocumentKind};
///
/// assert_eq!(
///     document_kind("application/vnd.oasis.opendocument.spreadsheet"),
///     Some(DocumentKind::Spreadsheet)
/// );
/// assert_eq!(document_kind("application/vnd.oasis.opendocument.graphics"), None);
/// ```
#[inline]
pub fn document_kind(mime_type: &str) -> Option<DocumentKind> {
    TABLE_MIMETYPES.get(mime_type.trim()).copied()
}
