//! ODF manifest parsing functionality.
//!
//! The manifest.xml file lists every part of the package with its media type and
//! marks the parts that are encrypted.

use crate::common::xml::unescape_xml;
use crate::common::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;

/// ODF manifest (META-INF/manifest.xml)
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    entries: HashMap<String, ManifestEntry>,
}

/// Entry in the ODF manifest
#[derive(Debug, Clone)]
pub struct ManifestEntry {
    pub full_path: String,
    pub media_type: String,
    pub encrypted: bool,
}

impl Manifest {
    /// Parse manifest XML content
    pub fn parse(xml_content: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml_content);
        let mut buf = Vec::new();
        let mut entries = HashMap::new();
        // Entry whose children are still being read; encryption data nests inside it.
        let mut open_entry: Option<ManifestEntry> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.name().as_ref() {
                    b"manifest:file-entry" => open_entry = Self::parse_file_entry(e)?,
                    b"manifest:encryption-data" => {
                        if let Some(entry) = open_entry.as_mut() {
                            entry.encrypted = true;
                        }
                    },
                    _ => {},
                },
                Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                    b"manifest:file-entry" => {
                        if let Some(entry) = Self::parse_file_entry(e)? {
                            entries.insert(entry.full_path.clone(), entry);
                        }
                    },
                    b"manifest:encryption-data" => {
                        if let Some(entry) = open_entry.as_mut() {
                            entry.encrypted = true;
                        }
                    },
                    _ => {},
                },
                Ok(Event::End(ref e)) => {
                    if e.name().as_ref() == b"manifest:file-entry"
                        && let Some(entry) = open_entry.take()
                    {
                        entries.insert(entry.full_path.clone(), entry);
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlError(format!("manifest.xml: {}", e))),
                _ => {},
            }
            buf.clear();
        }

        Ok(Self { entries })
    }

    /// Parse a single file-entry element
    fn parse_file_entry(e: &BytesStart) -> Result<Option<ManifestEntry>> {
        let mut full_path = String::new();
        let mut media_type = String::new();

        for attr_result in e.attributes() {
            let attr = attr_result?;
            let value = String::from_utf8(attr.value.to_vec())?;

            match attr.key.as_ref() {
                b"manifest:full-path" => full_path = unescape_xml(&value).into_owned(),
                b"manifest:media-type" => media_type = unescape_xml(&value).into_owned(),
                _ => {},
            }
        }

        if full_path.is_empty() {
            return Ok(None);
        }
        Ok(Some(ManifestEntry {
            full_path,
            media_type,
            encrypted: false,
        }))
    }

    /// Media type declared for the package root (`/`), if any.
    pub fn root_media_type(&self) -> Option<&str> {
        self.entries
            .get("/")
            .map(|entry| entry.media_type.as_str())
            .filter(|media_type| !media_type.is_empty())
    }

    /// Get entry for a path
    pub fn get_entry(&self, path: &str) -> Option<&ManifestEntry> {
        self.entries.get(path)
    }

    /// Whether the manifest marks `path` as encrypted.
    pub fn is_encrypted(&self, path: &str) -> bool {
        self.get_entry(path).is_some_and(|entry| entry.encrypted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0" manifest:version="1.2">
 <manifest:file-entry manifest:full-path="/" manifest:version="1.2" manifest:media-type="application/vnd.oasis.opendocument.spreadsheet"/>
 <manifest:file-entry manifest:full-path="content.xml" manifest:media-type="text/xml"/>
 <manifest:file-entry manifest:full-path="styles.xml" manifest:media-type="text/xml">
  <manifest:encryption-data manifest:checksum-type="SHA1/1K" manifest:checksum="abc=">
   <manifest:algorithm manifest:algorithm-name="Blowfish CFB"/>
  </manifest:encryption-data>
 </manifest:file-entry>
</manifest:manifest>"#;

    #[test]
    fn test_root_media_type() {
        let manifest = Manifest::parse(MANIFEST).unwrap();
        assert_eq!(
            manifest.root_media_type(),
            Some("application/vnd.oasis.opendocument.spreadsheet")
        );
        assert_eq!(manifest.get_entry("content.xml").unwrap().media_type, "text/xml");
    }

    #[test]
    fn test_encryption_flag() {
        let manifest = Manifest::parse(MANIFEST).unwrap();
        assert!(!manifest.is_encrypted("content.xml"));
        assert!(manifest.is_encrypted("styles.xml"));
        assert!(!manifest.is_encrypted("missing.xml"));
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = Manifest::default();
        assert_eq!(manifest.root_media_type(), None);
    }
}
