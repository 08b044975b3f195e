//! ODF package (ZIP archive) handling functionality.
//!
//! An ODF package is a ZIP archive holding a `mimetype` entry, a manifest and the
//! XML parts. Only reading is supported.

use super::manifest::Manifest;
use crate::common::{Error, Result};
use crate::odf::constants::{ODF_MANIFEST, ODF_MIMETYPE};
use std::cell::RefCell;
use std::io::{Read, Seek};

/// An ODF package (ZIP file containing XML documents)
pub struct Package<R> {
    archive: RefCell<zip::ZipArchive<R>>,
    manifest: Manifest,
    mimetype: String,
}

impl<R: Read + Seek> Package<R> {
    /// Open an ODF package from a reader
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut archive = zip::ZipArchive::new(reader)
            .map_err(|e| Error::InvalidFormat(format!("Invalid ZIP archive: {}", e)))?;

        let manifest = Self::read_manifest(&mut archive)?;

        // The manifest's root entry stands in for a missing mimetype entry.
        let mimetype = match Self::read_mimetype(&mut archive)? {
            Some(mimetype) => mimetype,
            None => manifest
                .root_media_type()
                .map(str::to_string)
                .ok_or_else(|| {
                    Error::InvalidFormat(
                        "No mimetype entry or manifest media type in ODF package".to_string(),
                    )
                })?,
        };

        tracing::debug!(target: "odfgrid::package", mimetype = %mimetype, entries = archive.len(), "opened ODF package");

        Ok(Self {
            archive: RefCell::new(archive),
            manifest,
            mimetype,
        })
    }

    /// Read MIME type from the mimetype file
    fn read_mimetype(archive: &mut zip::ZipArchive<R>) -> Result<Option<String>> {
        let mut mimetype_file = match archive.by_name(ODF_MIMETYPE) {
            Ok(file) => file,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut content = String::new();
        mimetype_file.read_to_string(&mut content)?;
        Ok(Some(content.trim().to_string()))
    }

    fn read_manifest(archive: &mut zip::ZipArchive<R>) -> Result<Manifest> {
        let mut file = match archive.by_name(ODF_MANIFEST) {
            Ok(file) => file,
            Err(zip::result::ZipError::FileNotFound) => {
                tracing::debug!(target: "odfgrid::package", "package has no manifest");
                return Ok(Manifest::default());
            },
            Err(e) => return Err(e.into()),
        };

        let mut content = String::new();
        file.read_to_string(&mut content)?;
        Manifest::parse(&content)
    }

    /// Get the MIME type from the mimetype file
    pub fn mimetype(&self) -> &str {
        &self.mimetype
    }

    /// Get the manifest
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Get a file from the package by path
    pub fn get_file(&self, path: &str) -> Result<Vec<u8>> {
        if self.manifest.is_encrypted(path) {
            return Err(Error::Unsupported(format!("encrypted package part {}", path)));
        }

        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(path)
            .map_err(|_| Error::InvalidFormat(format!("File not found: {}", path)))?;

        let mut content = Vec::new();
        file.read_to_end(&mut content)?;
        Ok(content)
    }

    /// Check if a file exists in the package
    pub fn has_file(&self, path: &str) -> bool {
        self.archive.borrow_mut().by_name(path).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::testing::{PackageBuilder, spreadsheet_content};
    use std::io::Cursor;

    #[test]
    fn test_reads_mimetype_and_content() {
        let bytes = PackageBuilder::spreadsheet(&spreadsheet_content("")).build();
        let package = Package::from_reader(Cursor::new(bytes)).unwrap();

        assert_eq!(package.mimetype(), "application/vnd.oasis.opendocument.spreadsheet");
        assert!(package.has_file("content.xml"));
        assert!(!package.has_file("missing.xml"));
        assert!(package.get_file("content.xml").unwrap().starts_with(b"<?xml"));
    }

    #[test]
    fn test_manifest_fallback_for_mimetype() {
        let bytes = PackageBuilder::spreadsheet(&spreadsheet_content(""))
            .without_mimetype()
            .build();
        let package = Package::from_reader(Cursor::new(bytes)).unwrap();
        assert_eq!(package.mimetype(), "application/vnd.oasis.opendocument.spreadsheet");
    }

    #[test]
    fn test_missing_mimetype_and_manifest() {
        let bytes = PackageBuilder::spreadsheet(&spreadsheet_content(""))
            .without_mimetype()
            .without_manifest()
            .build();
        let err = Package::from_reader(Cursor::new(bytes)).err().unwrap();
        assert!(matches!(err, Error::InvalidFormat(_)));
    }

    #[test]
    fn test_not_a_zip() {
        let err = Package::from_reader(Cursor::new(b"plain text".to_vec()))
            .err()
            .unwrap();
        assert!(matches!(err, Error::InvalidFormat(_)));
    }

    #[test]
    fn test_missing_file() {
        let bytes = PackageBuilder::spreadsheet(&spreadsheet_content("")).build();
        let package = Package::from_reader(Cursor::new(bytes)).unwrap();
        assert!(matches!(
            package.get_file("styles.xml"),
            Err(Error::InvalidFormat(_))
        ));
    }
}
