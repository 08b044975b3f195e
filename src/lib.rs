//! odfgrid - A Rust library for decoding OpenDocument tables
//!
//! This library reads the tables stored in OpenDocument Format packages and
//! materializes each one as a rectangular grid of typed values, ready for
//! tabular analysis.
//!
//! # Features
//!
//! - **Any table-bearing document**: spreadsheets (.ods), text documents (.odt)
//!   and presentations (.odp), plus their templates
//! - **Typed cells**: booleans, floats (including percentages and currencies),
//!   strings, timestamps and durations
//! - **Run-length expansion**: repeated cells and rows are expanded, trailing
//!   padding is dropped, and every grid is rectangular
//! - **Ingestion**: header promotion, row skipping, missing-value detection and
//!   index columns over a decoded grid
//!
//! # Example - Reading a spreadsheet
//!
//! ```no_run
//! use odfgrid::OdfReader;
//!
//! # fn main() -> odfgrid::Result<()> {
//! let reader = OdfReader::load("data.ods")?;
//! println!("Tables: {:?}", reader.sheet_names());
//!
//! let grid = reader.grid("Sheet1")?;
//! println!("{} rows x {} columns", grid.height(), grid.width());
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Labelled ingestion
//!
//! ```no_run
//! use odfgrid::{OdfReader, ParseOptions};
//!
//! # fn main() -> odfgrid::Result<()> {
//! let reader = OdfReader::load("data.ods")?;
//! let options = ParseOptions::default().with_index_col(Some(0));
//! let frame = reader.parse(0, &options)?;
//!
//! println!("Columns: {:?}", frame.columns());
//! # Ok(())
//! # }
//! ```

/// Common types shared across the crate (errors, XML helpers)
pub mod common;

/// OpenDocument package reading and table decoding
pub mod odf;

/// Tabular ingestion over decoded grids
pub mod frame;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use frame::{Frame, ParseOptions};
pub use odf::{CellValue, Grid, OdfReader, RepeatPolicy, RowEmptiness, SheetId};
