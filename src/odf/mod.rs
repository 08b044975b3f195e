//! OpenDocument table decoding.
//!
//! This module reads the tables of OpenDocument packages (.ods, .odt, .odp and
//! their templates) and decodes them into rectangular grids of typed values.
//!
//! # Example
//!
//! ```no_run
//! use odfgrid::odf::{CellValue, OdfReader};
//!
//! # fn main() -> odfgrid::Result<()> {
//! let reader = OdfReader::load("budget.ods")?;
//! let grid = reader.grid(0)?;
//!
//! for row in grid.rows() {
//!     let cells: Vec<String> = row.iter().map(CellValue::to_string).collect();
//!     println!("{}", cells.join("\t"));
//! }
//! # Ok(())
//! # }
//! ```

/// MIME types and package paths
pub mod constants;
/// ODF package access
pub mod core;
/// Boolean, date and duration conversions
pub mod datatype;
/// ODF XML element classes
pub mod elements;
/// Rectangular grids
pub mod grid;
/// Document reader
pub mod reader;
/// Typed cell values
pub mod value;

#[cfg(test)]
pub(crate) mod testing;

pub use constants::DocumentKind;
pub use elements::table_expansion::{RepeatPolicy, RowEmptiness};
pub use grid::Grid;
pub use reader::{OdfReader, SheetId};
pub use value::{CellValue, ValueType};
