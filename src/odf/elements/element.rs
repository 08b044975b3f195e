//! Read-only ODF element tree.
//!
//! `content.xml` is parsed once into a tree of [`Element`]s whose children keep
//! their document order, text runs included. Attribute lookup is keyed by
//! [`QualifiedName`], the `(namespace, local name)` pair.

use crate::common::xml::{resolve_entity, unescape_xml};
use crate::common::{Error, Result};
use crate::odf::elements::namespace::{
    NamespaceContext, OFFICENS, QualifiedName, TEXTNS,
};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;

/// A child of an element: either a nested element or a run of text.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// Concrete element with namespace-qualified name and attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: QualifiedName,
    attributes: HashMap<QualifiedName, String>,
    children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(name: QualifiedName) -> Self {
        Self {
            name,
            attributes: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Get the qualified name
    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    /// Check the element's name against a `(namespace, local name)` pair
    #[inline]
    pub fn is(&self, namespace_uri: &str, local_name: &str) -> bool {
        self.name.is(namespace_uri, local_name)
    }

    /// Get attribute value by qualified name
    pub fn attribute(&self, name: &QualifiedName) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Get attribute value by namespace URI and local name
    pub fn attribute_ns(&self, namespace_uri: &str, local_name: &str) -> Option<&str> {
        self.attribute(&QualifiedName::new(Some(namespace_uri), local_name))
    }

    /// All attributes of this element
    pub fn attributes(&self) -> &HashMap<QualifiedName, String> {
        &self.attributes
    }

    /// Child nodes in document order, text runs included
    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    /// Child elements in document order
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// True when the element has no child nodes at all
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// All descendants with the given name, in document order.
    pub fn elements_by_type(&self, name: &QualifiedName) -> Vec<&Element> {
        self.find_descendants(name, None)
    }

    /// Descendants with the given name, not descending into `barrier` elements.
    ///
    /// A matching element is still collected when it is itself a barrier.
    pub fn find_descendants<'a>(
        &'a self,
        name: &QualifiedName,
        barrier: Option<&QualifiedName>,
    ) -> Vec<&'a Element> {
        let mut found = Vec::new();
        let mut stack: Vec<&Element> = self.child_elements().collect();
        stack.reverse();

        while let Some(element) = stack.pop() {
            if element.name == *name {
                found.push(element);
            }
            if barrier.is_some_and(|barrier| element.name == *barrier) {
                continue;
            }
            let start = stack.len();
            stack.extend(element.child_elements());
            stack[start..].reverse();
        }

        found
    }

    /// Rendered text of this element and all descendants.
    ///
    /// `text:s`, `text:tab` and `text:line-break` render as the whitespace they
    /// stand for; sibling paragraphs are separated by a newline; annotations are
    /// skipped.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.render_text(&mut text);
        text
    }

    fn render_text(&self, out: &mut String) {
        let mut seen_paragraph = false;

        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) if element.is(TEXTNS, "s") => {
                    let count = element
                        .attribute_ns(TEXTNS, "c")
                        .and_then(|c| c.parse::<usize>().ok())
                        .unwrap_or(1);
                    out.extend(std::iter::repeat_n(' ', count));
                },
                Node::Element(element) if element.is(TEXTNS, "tab") => out.push('\t'),
                Node::Element(element) if element.is(TEXTNS, "line-break") => out.push('\n'),
                Node::Element(element) if element.is(OFFICENS, "annotation") => {},
                Node::Element(element) if element.is(TEXTNS, "p") || element.is(TEXTNS, "h") => {
                    if seen_paragraph {
                        out.push('\n');
                    }
                    seen_paragraph = true;
                    element.render_text(out);
                },
                Node::Element(element) => element.render_text(out),
            }
        }
    }

    /// Parse an XML part into its root element
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(bytes);
        let mut buf = Vec::new();
        let mut namespaces = NamespaceContext::default();
        let mut stack: Vec<Element> = Vec::new();
        let mut pending_text = String::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.flush_text(&mut pending_text);
                    }
                    let element = Self::open_element(e, &mut namespaces)?;
                    stack.push(element);
                },
                Ok(Event::Empty(ref e)) => {
                    let element = Self::open_element(e, &mut namespaces)?;
                    namespaces.pop_scope();
                    match stack.last_mut() {
                        Some(parent) => {
                            parent.flush_text(&mut pending_text);
                            parent.children.push(Node::Element(element));
                        },
                        None => return Ok(element),
                    }
                },
                Ok(Event::Text(ref t)) => {
                    if !stack.is_empty() {
                        let text = String::from_utf8(t.to_vec())?;
                        pending_text.push_str(&unescape_xml(&text));
                    }
                },
                Ok(Event::CData(ref c)) => {
                    if !stack.is_empty() {
                        pending_text.push_str(&String::from_utf8(c.to_vec())?);
                    }
                },
                Ok(Event::GeneralRef(ref r)) => {
                    if !stack.is_empty() {
                        let name = String::from_utf8(r.to_vec())?;
                        match resolve_entity(&name) {
                            Some(ch) => pending_text.push(ch),
                            None => {
                                return Err(Error::XmlError(format!(
                                    "Unknown entity reference &{};",
                                    name
                                )));
                            },
                        }
                    }
                },
                Ok(Event::End(_)) => {
                    namespaces.pop_scope();
                    let Some(mut element) = stack.pop() else {
                        return Err(Error::XmlError("Unbalanced closing tag".to_string()));
                    };
                    element.flush_text(&mut pending_text);
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(Node::Element(element)),
                        None => return Ok(element),
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "at position {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                },
                _ => {},
            }
            buf.clear();
        }

        Err(Error::InvalidFormat("No root element found".to_string()))
    }

    /// Build an element from a start tag, opening its namespace scope.
    fn open_element(e: &BytesStart, namespaces: &mut NamespaceContext) -> Result<Self> {
        let mut raw_attributes = Vec::new();
        for attr_result in e.attributes() {
            let attr = attr_result?;
            let key = String::from_utf8(attr.key.as_ref().to_vec())?;
            let value = String::from_utf8(attr.value.to_vec())?;
            raw_attributes.push((key, unescape_xml(&value).into_owned()));
        }

        // Declarations on this tag apply to its own name and attributes.
        namespaces.push_scope(
            raw_attributes
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str())),
        );

        let tag_name = String::from_utf8(e.name().as_ref().to_vec())?;
        let mut element = Element::new(namespaces.resolve_element(&tag_name));
        for (key, value) in raw_attributes {
            if key == "xmlns" || key.starts_with("xmlns:") {
                continue;
            }
            element
                .attributes
                .insert(namespaces.resolve_attribute(&key), value);
        }

        Ok(element)
    }

    /// Move buffered text into the children, dropping layout whitespace.
    ///
    /// Whitespace-only runs are kept inside text-namespace elements, where a
    /// single space between spans is content.
    fn flush_text(&mut self, pending: &mut String) {
        if pending.is_empty() {
            return;
        }
        let in_text_content = self.name.namespace_uri.as_deref() == Some(TEXTNS);
        if in_text_content || !pending.trim().is_empty() {
            self.children.push(Node::Text(std::mem::take(pending)));
        } else {
            pending.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::elements::namespace::TABLENS;

    const NS: &str = r#"xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0""#;

    fn parse(body: &str) -> Element {
        Element::parse(format!("<office:body {}>{}</office:body>", NS, body).as_bytes()).unwrap()
    }

    #[test]
    fn test_parse_namespaced_attributes() {
        let root = parse(
            r#"<table:table table:name="Sheet1"><table:table-row><table:table-cell office:value-type="float" office:value="1.5"/></table:table-row></table:table>"#,
        );
        assert!(root.is(OFFICENS, "body"));

        let tables = root.elements_by_type(&QualifiedName::table("table"));
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].attribute_ns(TABLENS, "name"), Some("Sheet1"));
        assert_eq!(tables[0].attribute_ns(OFFICENS, "name"), None);

        let cells = root.elements_by_type(&QualifiedName::table("table-cell"));
        assert_eq!(cells[0].attribute(&QualifiedName::office("value")), Some("1.5"));
        assert!(cells[0].is_leaf());
    }

    #[test]
    fn test_custom_prefixes_resolve() {
        let xml = r#"<doc xmlns:t="urn:oasis:names:tc:opendocument:xmlns:table:1.0"><t:table t:name="Custom"/></doc>"#;
        let root = Element::parse(xml.as_bytes()).unwrap();
        let tables = root.elements_by_type(&QualifiedName::table("table"));
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].attribute(&QualifiedName::table("name")), Some("Custom"));
    }

    #[test]
    fn test_layout_whitespace_dropped() {
        let root = parse("\n  <table:table-row>\n    <table:table-cell/>\n  </table:table-row>\n");
        let row = root.child_elements().next().unwrap();
        assert_eq!(row.child_nodes().len(), 1);
        assert!(row.child_elements().next().unwrap().is_leaf());
    }

    #[test]
    fn test_text_content_rendering() {
        let root = parse(
            r#"<table:table-cell><text:p>a<text:s text:c="2"/>b<text:tab/>c</text:p><text:p><text:span>x</text:span> <text:a>y</text:a></text:p></table:table-cell>"#,
        );
        let cell = root.child_elements().next().unwrap();
        assert_eq!(cell.text_content(), "a  b\tc\nx y");
    }

    #[test]
    fn test_entities_unescaped() {
        let root = parse(r#"<text:p text:style-name="a&amp;b">R&amp;D &lt;1&gt; &#233;</text:p>"#);
        let p = root.child_elements().next().unwrap();
        assert_eq!(p.text_content(), "R&D <1> é");
        assert_eq!(p.attribute_ns(TEXTNS, "style-name"), Some("a&b"));
    }

    #[test]
    fn test_annotations_skipped_in_text() {
        let root = parse(
            r#"<table:table-cell><office:annotation><text:p>note</text:p></office:annotation><text:p>value</text:p></table:table-cell>"#,
        );
        let cell = root.child_elements().next().unwrap();
        assert_eq!(cell.text_content(), "value");
    }

    #[test]
    fn test_find_descendants_barrier() {
        let root = parse(
            r#"<table:table><table:table-row><table:table-cell><table:table><table:table-row/></table:table></table:table-cell></table:table-row></table:table>"#,
        );
        let outer = root.child_elements().next().unwrap();
        let row = QualifiedName::table("table-row");
        let table = QualifiedName::table("table");
        assert_eq!(outer.elements_by_type(&row).len(), 2);
        assert_eq!(outer.find_descendants(&row, Some(&table)).len(), 1);
        // Nested tables are still found from the root
        assert_eq!(root.elements_by_type(&table).len(), 2);
    }

    #[test]
    fn test_malformed_xml() {
        let err = Element::parse(b"<a><b></a>").unwrap_err();
        assert!(matches!(err, Error::XmlError(_)));
    }

    #[test]
    fn test_empty_input() {
        let err = Element::parse(b"").unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(_)));
    }
}
