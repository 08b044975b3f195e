//! Tabular ingestion over decoded grids.
//!
//! Promotes a header row to column labels, drops leading and trailing rows,
//! clears missing-value strings and lifts out an index column.

mod ingest;
mod options;

pub use ingest::Frame;
pub use options::ParseOptions;
