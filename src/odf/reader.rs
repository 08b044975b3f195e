//! Document reader: opens an ODF package and exposes its tables.
//!
//! Tables are addressed by position or by name. They look the same in
//! spreadsheets, text documents and presentations, so all three are accepted.

use crate::common::{Error, Result};
use crate::frame::{Frame, ParseOptions};
use crate::odf::constants::{DocumentKind, ODF_CONTENT, document_kind};
use crate::odf::core::Package;
use crate::odf::elements::element::Element;
use crate::odf::elements::namespace::QualifiedName;
use crate::odf::elements::table::Table;
use crate::odf::elements::table_expansion::{RepeatPolicy, RowEmptiness};
use crate::odf::grid::Grid;
use std::fmt;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

/// Table selector: a position or a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetId {
    Index(usize),
    Name(String),
}

impl From<usize> for SheetId {
    fn from(index: usize) -> Self {
        SheetId::Index(index)
    }
}

/// Untyped integer literals default to `i32`, so `select(0)` lands here.
/// A negative position can never match and selects past the end.
impl From<i32> for SheetId {
    fn from(index: i32) -> Self {
        SheetId::Index(usize::try_from(index).unwrap_or(usize::MAX))
    }
}

impl From<&str> for SheetId {
    fn from(name: &str) -> Self {
        SheetId::Name(name.to_string())
    }
}

impl From<String> for SheetId {
    fn from(name: String) -> Self {
        SheetId::Name(name)
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetId::Index(index) => write!(f, "#{}", index),
            SheetId::Name(name) => f.write_str(name),
        }
    }
}

/// An opened ODF document.
///
/// The whole package is read and parsed at load time; the reader owns the
/// content tree and hands out borrowed [`Table`] views.
///
/// # Examples
///
/// ```no_run
/// use odfgrid::OdfReader;
///
/// # fn main() -> odfgrid::Result<()> {
/// let reader = OdfReader::load("data.ods")?;
/// println!("Tables: {:?}", reader.sheet_names());
///
/// let grid = reader.grid("Sheet1")?;
/// println!("{} x {}", grid.height(), grid.width());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct OdfReader {
    mimetype: String,
    kind: DocumentKind,
    root: Element,
    sheet_names: Vec<String>,
}

impl OdfReader {
    /// Open an ODF document from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not an ODF package, or
    /// is of a document type that carries no tables.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(bytes)
    }

    /// Open an ODF document from its bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Open an ODF document from a seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let package = Package::from_reader(reader)?;

        let mimetype = package.mimetype().to_string();
        let kind = document_kind(&mimetype)
            .ok_or_else(|| Error::Unsupported(format!("document type '{}'", mimetype)))?;

        if !package.has_file(ODF_CONTENT) {
            return Err(Error::InvalidFormat(format!(
                "ODF package has no {}",
                ODF_CONTENT
            )));
        }
        let root = Element::parse(&package.get_file(ODF_CONTENT)?)?;

        let sheet_names: Vec<String> = root
            .elements_by_type(&QualifiedName::table("table"))
            .into_iter()
            .enumerate()
            .map(|(i, element)| match Table::from_element(element)?.name() {
                Some(name) => Ok(name.to_string()),
                None => Ok(format!("Table{}", i + 1)),
            })
            .collect::<Result<_>>()?;

        tracing::debug!(target: "odfgrid::reader", ?kind, tables = sheet_names.len(), "loaded document");

        Ok(Self {
            mimetype,
            kind,
            root,
            sheet_names,
        })
    }

    /// MIME type of the package
    pub fn mimetype(&self) -> &str {
        &self.mimetype
    }

    /// Document class (text, spreadsheet or presentation)
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Table names in document order.
    ///
    /// Unnamed tables appear as `Table{n}` with `n` their 1-based position.
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// Number of tables in the document
    pub fn table_count(&self) -> usize {
        self.sheet_names.len()
    }

    /// Resolve a position or name to a table.
    ///
    /// # Errors
    ///
    /// [`Error::SheetIndexOutOfRange`] for a position past the end,
    /// [`Error::SheetNotFound`] for an unknown name.
    pub fn select(&self, id: impl Into<SheetId>) -> Result<Table<'_>> {
        let index = match id.into() {
            SheetId::Index(index) => index,
            SheetId::Name(name) => self
                .sheet_names
                .iter()
                .position(|candidate| *candidate == name)
                .ok_or(Error::SheetNotFound(name))?,
        };

        let tables = self.root.elements_by_type(&QualifiedName::table("table"));
        let count = tables.len();
        let element = tables
            .into_iter()
            .nth(index)
            .ok_or(Error::SheetIndexOutOfRange { index, count })?;
        Table::from_element(element)
    }

    /// Materialize a table with the default repeat policy.
    pub fn grid(&self, id: impl Into<SheetId>) -> Result<Grid> {
        self.grid_with(id, RepeatPolicy::default())
    }

    /// Materialize a table with an explicit repeat policy.
    pub fn grid_with(&self, id: impl Into<SheetId>, policy: RepeatPolicy) -> Result<Grid> {
        let table = self.select(id)?;
        Grid::materialize(&table, policy)
    }

    /// Materialize a table and run it through the ingestion options.
    pub fn parse(&self, id: impl Into<SheetId>, options: &ParseOptions) -> Result<Frame> {
        let table = self.select(id)?;
        let grid = Grid::materialize_with(&table, options.repeat_policy, options.row_emptiness)?;
        Frame::from_grid(grid, options)
    }
}
