//! Namespace handling for ODF XML elements.
//!
//! Names are kept as `(namespace URI, local name)` pairs so `table:name` and
//! `office:value` can never collide with a same-named attribute from another
//! vocabulary. Prefixes are resolved through the `xmlns` declarations in scope,
//! falling back to the standard ODF prefixes for fragments that omit them.

use phf::{Map, phf_map};
use std::fmt;

// ============================================================================
// NAMESPACE CONSTANTS
// ============================================================================

/// Office namespace
pub const OFFICENS: &str = "urn:oasis:names:tc:opendocument:xmlns:office:1.0";

/// Table namespace
pub const TABLENS: &str = "urn:oasis:names:tc:opendocument:xmlns:table:1.0";

/// Text namespace
pub const TEXTNS: &str = "urn:oasis:names:tc:opendocument:xmlns:text:1.0";

/// Prefix to URI mapping for the standard ODF prefixes
static PREFIX_TO_URI: Map<&'static str, &'static str> = phf_map! {
    "calcext" => "urn:org:documentfoundation:names:experimental:calc:xmlns:calcext:1.0",
    "dc" => "http://purl.org/dc/elements/1.1/",
    "draw" => "urn:oasis:names:tc:opendocument:xmlns:drawing:1.0",
    "fo" => "urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0",
    "loext" => "urn:org:documentfoundation:names:experimental:office:xmlns:loext:1.0",
    "manifest" => "urn:oasis:names:tc:opendocument:xmlns:manifest:1.0",
    "meta" => "urn:oasis:names:tc:opendocument:xmlns:meta:1.0",
    "number" => "urn:oasis:names:tc:opendocument:xmlns:datastyle:1.0",
    "of" => "urn:oasis:names:tc:opendocument:xmlns:of:1.2",
    "office" => "urn:oasis:names:tc:opendocument:xmlns:office:1.0",
    "presentation" => "urn:oasis:names:tc:opendocument:xmlns:presentation:1.0",
    "style" => "urn:oasis:names:tc:opendocument:xmlns:style:1.0",
    "svg" => "urn:oasis:names:tc:opendocument:xmlns:svg-compatible:1.0",
    "table" => "urn:oasis:names:tc:opendocument:xmlns:table:1.0",
    "text" => "urn:oasis:names:tc:opendocument:xmlns:text:1.0",
    "xlink" => "http://www.w3.org/1999/xlink",
    "xml" => "http://www.w3.org/XML/1998/namespace",
};

// ============================================================================
// QUALIFIED NAME
// ============================================================================

/// Namespace-qualified XML name, the composite key for elements and attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// Namespace URI
    pub namespace_uri: Option<String>,
    /// Local name (without prefix)
    pub local_name: String,
}

impl QualifiedName {
    /// Create a new qualified name
    pub fn new(namespace_uri: Option<&str>, local_name: &str) -> Self {
        Self {
            namespace_uri: namespace_uri.map(str::to_string),
            local_name: local_name.to_string(),
        }
    }

    /// Name in the table namespace.
    pub fn table(local_name: &str) -> Self {
        Self::new(Some(TABLENS), local_name)
    }

    /// Name in the office namespace.
    pub fn office(local_name: &str) -> Self {
        Self::new(Some(OFFICENS), local_name)
    }

    /// Name in the text namespace.
    pub fn text(local_name: &str) -> Self {
        Self::new(Some(TEXTNS), local_name)
    }

    /// Compare against a `(namespace, local name)` pair without allocating.
    #[inline]
    pub fn is(&self, namespace_uri: &str, local_name: &str) -> bool {
        self.local_name == local_name && self.namespace_uri.as_deref() == Some(namespace_uri)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace_uri {
            Some(uri) => write!(f, "{{{}}}{}", uri, self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}

// ============================================================================
// NAMESPACE CONTEXT
// ============================================================================

/// Scoped namespace declarations for resolving prefixes to URIs.
///
/// Each element pushes a frame holding the `xmlns` declarations made on it; the
/// frame is popped when the element closes.
#[derive(Debug, Default)]
pub struct NamespaceContext {
    /// `(prefix, uri)` bindings; the empty prefix is the default namespace
    bindings: Vec<(String, String)>,
    /// Number of bindings each open element contributed
    frames: Vec<usize>,
}

impl NamespaceContext {
    /// Open an element scope with the given `(attribute key, value)` declarations.
    ///
    /// Keys other than `xmlns` and `xmlns:*` are ignored.
    pub fn push_scope<'a, I>(&mut self, declarations: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut added = 0;
        for (key, uri) in declarations {
            if key == "xmlns" {
                self.bindings.push((String::new(), uri.to_string()));
                added += 1;
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                self.bindings.push((prefix.to_string(), uri.to_string()));
                added += 1;
            }
        }
        self.frames.push(added);
    }

    /// Close the innermost element scope.
    pub fn pop_scope(&mut self) {
        if let Some(added) = self.frames.pop() {
            let keep = self.bindings.len().saturating_sub(added);
            self.bindings.truncate(keep);
        }
    }

    /// Resolve prefix to namespace URI, innermost declaration first.
    pub fn resolve_prefix(&self, prefix: &str) -> Option<&str> {
        self.bindings
            .iter()
            .rev()
            .find(|(bound, _)| bound == prefix)
            .map(|(_, uri)| uri.as_str())
            .or_else(|| PREFIX_TO_URI.get(prefix).copied())
    }

    /// Resolve an element name; unprefixed names take the default namespace.
    pub fn resolve_element(&self, raw: &str) -> QualifiedName {
        match raw.split_once(':') {
            Some((prefix, local)) => QualifiedName::new(self.resolve_prefix(prefix), local),
            None => QualifiedName::new(self.resolve_prefix(""), raw),
        }
    }

    /// Resolve an attribute name; unprefixed attributes have no namespace.
    pub fn resolve_attribute(&self, raw: &str) -> QualifiedName {
        match raw.split_once(':') {
            Some((prefix, local)) => QualifiedName::new(self.resolve_prefix(prefix), local),
            None => QualifiedName::new(None, raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_prefix_wins() {
        let mut ctx = NamespaceContext::default();
        ctx.push_scope([("xmlns:t", TABLENS)]);
        assert_eq!(ctx.resolve_element("t:table-row"), QualifiedName::table("table-row"));
        ctx.pop_scope();
        // Unknown once the scope closes
        assert_eq!(ctx.resolve_element("t:table-row").namespace_uri, None);
    }

    #[test]
    fn test_inner_scope_shadows_outer() {
        let mut ctx = NamespaceContext::default();
        ctx.push_scope([("xmlns:x", OFFICENS)]);
        ctx.push_scope([("xmlns:x", TABLENS)]);
        assert_eq!(ctx.resolve_prefix("x"), Some(TABLENS));
        ctx.pop_scope();
        assert_eq!(ctx.resolve_prefix("x"), Some(OFFICENS));
    }

    #[test]
    fn test_standard_prefix_fallback() {
        let ctx = NamespaceContext::default();
        assert_eq!(
            ctx.resolve_attribute("office:value-type"),
            QualifiedName::office("value-type")
        );
    }

    #[test]
    fn test_unprefixed_names() {
        let mut ctx = NamespaceContext::default();
        ctx.push_scope([("xmlns", TEXTNS), ("id", "ignored")]);
        assert_eq!(ctx.resolve_element("p"), QualifiedName::text("p"));
        assert_eq!(ctx.resolve_attribute("id"), QualifiedName::new(None, "id"));
    }

    #[test]
    fn test_table_and_office_names_do_not_collide() {
        let table_name = QualifiedName::table("name");
        let office_name = QualifiedName::office("name");
        assert_ne!(table_name, office_name);
        assert!(table_name.is(TABLENS, "name"));
        assert!(!office_name.is(TABLENS, "name"));
    }
}
