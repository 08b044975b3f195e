//! Fixtures for building ODF content and packages in tests.

use crate::odf::constants::{ODF_SPREADSHEET, ODF_TEXT};
use crate::odf::elements::element::Element;
use crate::odf::elements::namespace::QualifiedName;
use std::io::{Cursor, Write};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

const NAMESPACES: &str = concat!(
    r#"xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" "#,
    r#"xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" "#,
    r#"xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" "#,
    r#"xmlns:xlink="http://www.w3.org/1999/xlink" "#,
    r#"office:version="1.2""#
);

/// `content.xml` with the given `office:body` child (`office:spreadsheet`, ...).
pub(crate) fn document_content(body_element: &str, inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content {ns}>
  <office:body>
    <office:{body}>
      {inner}
    </office:{body}>
  </office:body>
</office:document-content>"#,
        ns = NAMESPACES,
        body = body_element,
        inner = inner
    )
}

/// A `table:table` element, unnamed when `name` is `None`.
pub(crate) fn table_xml(name: Option<&str>, rows_xml: &str) -> String {
    match name {
        Some(name) => format!(r#"<table:table table:name="{}">{}</table:table>"#, name, rows_xml),
        None => format!("<table:table>{}</table:table>", rows_xml),
    }
}

/// Spreadsheet `content.xml` with a single table named `Sheet1`.
pub(crate) fn spreadsheet_content(rows_xml: &str) -> String {
    document_content("spreadsheet", &table_xml(Some("Sheet1"), rows_xml))
}

/// Parse a single `Sheet1` table and return its element.
pub(crate) fn table_from_rows(rows_xml: &str) -> Element {
    let root = Element::parse(spreadsheet_content(rows_xml).as_bytes()).unwrap();
    root.elements_by_type(&QualifiedName::table("table"))[0].clone()
}

/// In-memory ODF package writer.
pub(crate) struct PackageBuilder {
    media_type: String,
    mimetype: bool,
    manifest: bool,
    encrypted_content: bool,
    content: Option<String>,
}

impl PackageBuilder {
    pub(crate) fn new(mimetype: &str, content: &str) -> Self {
        Self {
            media_type: mimetype.to_string(),
            mimetype: true,
            manifest: true,
            encrypted_content: false,
            content: Some(content.to_string()),
        }
    }

    pub(crate) fn spreadsheet(content: &str) -> Self {
        Self::new(ODF_SPREADSHEET, content)
    }

    pub(crate) fn text(content: &str) -> Self {
        Self::new(ODF_TEXT, content)
    }

    pub(crate) fn without_mimetype(mut self) -> Self {
        self.mimetype = false;
        self
    }

    pub(crate) fn without_manifest(mut self) -> Self {
        self.manifest = false;
        self
    }

    pub(crate) fn without_content(mut self) -> Self {
        self.content = None;
        self
    }

    pub(crate) fn with_encrypted_content(mut self) -> Self {
        self.encrypted_content = true;
        self
    }

    fn manifest_xml(&self, media_type: &str) -> String {
        let encryption = if self.encrypted_content {
            r#"<manifest:encryption-data manifest:checksum-type="SHA1/1K" manifest:checksum="AAAA"/>"#
        } else {
            ""
        };
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0" manifest:version="1.2">
 <manifest:file-entry manifest:full-path="/" manifest:media-type="{}"/>
 <manifest:file-entry manifest:full-path="content.xml" manifest:media-type="text/xml">{}</manifest:file-entry>
</manifest:manifest>"#,
            media_type, encryption
        )
    }

    /// Write the package as zip bytes; `mimetype` goes first, stored.
    pub(crate) fn build(&self) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        if self.mimetype {
            writer.start_file("mimetype", stored).unwrap();
            writer.write_all(self.media_type.as_bytes()).unwrap();
        }
        if self.manifest {
            writer.start_file("META-INF/manifest.xml", deflated).unwrap();
            writer.write_all(self.manifest_xml(&self.media_type).as_bytes()).unwrap();
        }
        if let Some(content) = &self.content {
            writer.start_file("content.xml", deflated).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }

        writer.finish().unwrap().into_inner()
    }
}
