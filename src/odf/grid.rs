//! Rectangular grids of decoded cell values.
//!
//! [`Grid::materialize`] walks a table's rows, expands repeats through
//! [`TableExpander`], and pads every row to the widest one so the result is
//! always rectangular.

use crate::common::{Error, Result};
use crate::odf::elements::table::Table;
use crate::odf::elements::table_expansion::{
    RepeatPolicy, RowEmptiness, RunLengthAccumulator, TableExpander,
};
use crate::odf::value::CellValue;

/// A rectangular table of decoded values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    rows: Vec<Vec<CellValue>>,
    width: usize,
}

impl Grid {
    /// Build a grid from ragged rows, right-padding with [`CellValue::Empty`].
    pub fn from_rows(mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, CellValue::Empty);
        }
        Self { rows, width }
    }

    /// Decode a table into a grid.
    ///
    /// Trailing empty rows are dropped; interior ones become rows of
    /// [`CellValue::Empty`].
    ///
    /// # Errors
    ///
    /// [`Error::Consistency`] for repeated content the policy does not expand,
    /// plus any repeat attribute or cell decoding error.
    pub fn materialize(table: &Table<'_>, policy: RepeatPolicy) -> Result<Self> {
        Self::materialize_with(table, policy, RowEmptiness::default())
    }

    /// Decode a table, choosing which rows count as empty placeholders.
    ///
    /// With [`RowEmptiness::AllCellsEmpty`], rows made only of empty cell runs
    /// are deferred like any other empty row, so a repeated padding row is not
    /// a consistency error.
    pub fn materialize_with(
        table: &Table<'_>,
        policy: RepeatPolicy,
        emptiness: RowEmptiness,
    ) -> Result<Self> {
        let mut rows: Vec<Vec<CellValue>> = Vec::new();
        let mut empties = RunLengthAccumulator::new();

        for row in table.rows() {
            let repeat = row.repeat_count()?;

            if row.is_empty_under(emptiness) {
                empties.defer(repeat);
                continue;
            }

            let values = TableExpander::expand_row(&row, policy)?;

            if repeat > 1 && !policy.expands_rows() {
                return Err(Error::Consistency {
                    element: "table:table-row",
                    repeat,
                });
            }

            empties.flush_into(&mut rows, Vec::new());
            if repeat > 1 {
                rows.extend(std::iter::repeat_n(values, repeat));
            } else {
                rows.push(values);
            }
        }

        let grid = Self::from_rows(rows);
        tracing::debug!(
            target: "odfgrid::grid",
            table = table.name().unwrap_or_default(),
            height = grid.height(),
            width = grid.width(),
            dropped_rows = empties.pending(),
            "materialized table"
        );
        Ok(grid)
    }

    /// Rows in order, each exactly [`width`](Self::width) long
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Check if the grid has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the value at `(row, column)`
    pub fn get(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Consume the grid, returning its rows
    pub fn into_rows(self) -> Vec<Vec<CellValue>> {
        self.rows
    }
}
