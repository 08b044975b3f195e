//! Labelled tables built from grids.

use super::options::ParseOptions;
use crate::common::{Error, Result};
use crate::odf::grid::Grid;
use crate::odf::value::CellValue;

/// A grid with column labels and an optional row index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    columns: Vec<Option<String>>,
    index_name: Option<String>,
    index: Option<Vec<CellValue>>,
    data: Vec<Vec<CellValue>>,
}

impl Frame {
    /// Apply ingestion options to a grid.
    ///
    /// Rows are trimmed by `skiprows` and `skip_footer` first, then the header
    /// row is promoted, missing-value strings are cleared, and finally the
    /// index column is lifted out.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidOptions`] when `header` or `index_col` point outside
    /// the remaining table.
    pub fn from_grid(grid: Grid, options: &ParseOptions) -> Result<Self> {
        let width = grid.width();
        let mut rows = grid.into_rows();

        let skip = options.skiprows.min(rows.len());
        rows.drain(..skip);
        let keep = rows.len().saturating_sub(options.skip_footer);
        rows.truncate(keep);

        if rows.is_empty() {
            tracing::debug!(target: "odfgrid::frame", "no rows left after skipping");
            return Ok(Self::default());
        }

        let mut columns = vec![None; width];
        if let Some(header) = options.header {
            if header >= rows.len() {
                return Err(Error::InvalidOptions(format!(
                    "header row {} out of range ({} rows)",
                    header,
                    rows.len()
                )));
            }
            let mut remaining = rows.split_off(header);
            let labels = remaining.remove(0);
            columns = labels.iter().map(Self::label).collect();
            rows = remaining;
        }

        for value in rows.iter_mut().flatten() {
            if let CellValue::String(s) = value
                && options.is_na(s)
            {
                *value = CellValue::Empty;
            }
        }

        let mut index_name = None;
        let mut index = None;
        if let Some(column) = options.index_col {
            if column >= width {
                return Err(Error::InvalidOptions(format!(
                    "index column {} out of range ({} columns)",
                    column, width
                )));
            }
            index_name = columns.remove(column);
            index = Some(rows.iter_mut().map(|row| row.remove(column)).collect());
        }

        tracing::debug!(target: "odfgrid::frame", rows = rows.len(), columns = columns.len(), "built frame");

        Ok(Self {
            columns,
            index_name,
            index,
            data: rows,
        })
    }

    /// Header cell to column label; blank cells stay unlabelled.
    fn label(value: &CellValue) -> Option<String> {
        let text = value.to_string();
        if text.is_empty() { None } else { Some(text) }
    }

    /// Column labels, `None` for unlabelled columns
    pub fn columns(&self) -> &[Option<String>] {
        &self.columns
    }

    /// Label of the index column
    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref()
    }

    /// Row index values, when an index column was chosen
    pub fn index(&self) -> Option<&[CellValue]> {
        self.index.as_deref()
    }

    /// Data rows, each as wide as [`columns`](Self::columns)
    pub fn data(&self) -> &[Vec<CellValue>] {
        &self.data
    }

    /// Values of the first column carrying `label`
    pub fn column(&self, label: &str) -> Option<Vec<&CellValue>> {
        let position = self
            .columns
            .iter()
            .position(|column| column.as_deref() == Some(label))?;
        Some(self.data.iter().map(|row| &row[position]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> CellValue {
        CellValue::from(text)
    }

    fn f(n: f64) -> CellValue {
        CellValue::Float(n)
    }

    fn headed_grid() -> Grid {
        Grid::from_rows(vec![
            vec![
                CellValue::Empty,
                s("Column 1"),
                s("Column 2"),
                CellValue::Empty,
                s("Column 4"),
            ],
            vec![s("Row 1"), f(1.0), f(2.0), f(3.0), f(4.0)],
            vec![s("Row 2"), f(5.0), f(6.0), f(7.0), f(8.0)],
        ])
    }

    #[test]
    fn test_header_and_index_column() {
        let options = ParseOptions::default().with_index_col(Some(0));
        let frame = Frame::from_grid(headed_grid(), &options).unwrap();

        assert_eq!(
            frame.columns(),
            [
                Some("Column 1".to_string()),
                Some("Column 2".to_string()),
                None,
                Some("Column 4".to_string())
            ]
        );
        assert_eq!(frame.index_name(), None);
        assert_eq!(frame.index().unwrap(), [s("Row 1"), s("Row 2")]);
        assert_eq!(frame.data()[1], vec![f(5.0), f(6.0), f(7.0), f(8.0)]);
        assert_eq!(frame.column("Column 4").unwrap(), vec![&f(4.0), &f(8.0)]);
    }

    #[test]
    fn test_no_header() {
        let options = ParseOptions::default().with_header(None);
        let frame = Frame::from_grid(headed_grid(), &options).unwrap();
        assert_eq!(frame.columns(), [None::<String>, None, None, None, None]);
        assert_eq!(frame.data().len(), 3);
        assert!(frame.index().is_none());
    }

    #[test]
    fn test_skiprows_and_footer() {
        let grid = Grid::from_rows(vec![
            vec![s("title")],
            vec![s("a"), s("b")],
            vec![f(1.0), f(2.0)],
            vec![f(3.0), f(4.0)],
            vec![s("total"), f(10.0)],
        ]);
        let options = ParseOptions::default().with_skiprows(1).with_skip_footer(1);
        let frame = Frame::from_grid(grid, &options).unwrap();
        assert_eq!(frame.columns(), [Some("a".to_string()), Some("b".to_string())]);
        assert_eq!(frame.data(), [vec![f(1.0), f(2.0)], vec![f(3.0), f(4.0)]]);
    }

    #[test]
    fn test_header_below_first_row() {
        let grid = Grid::from_rows(vec![vec![s("junk")], vec![s("label")], vec![f(1.0)]]);
        let frame = Frame::from_grid(grid, &ParseOptions::default().with_header(Some(1))).unwrap();
        assert_eq!(frame.columns(), [Some("label".to_string())]);
        assert_eq!(frame.data(), [vec![f(1.0)]]);
    }

    #[test]
    fn test_na_values() {
        let grid = Grid::from_rows(vec![
            vec![s("x")],
            vec![s("NA")],
            vec![s("-")],
            vec![s("kept")],
        ]);
        let options = ParseOptions::default().with_na_values(["-"]);
        let frame = Frame::from_grid(grid, &options).unwrap();
        assert_eq!(
            frame.data(),
            [vec![CellValue::Empty], vec![CellValue::Empty], vec![s("kept")]]
        );
    }

    #[test]
    fn test_out_of_range_options() {
        let err = Frame::from_grid(headed_grid(), &ParseOptions::default().with_header(Some(3)))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOptions(_)));

        let err = Frame::from_grid(headed_grid(), &ParseOptions::default().with_index_col(Some(5)))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOptions(_)));
    }

    #[test]
    fn test_everything_skipped() {
        let options = ParseOptions::default().with_skiprows(10);
        let frame = Frame::from_grid(headed_grid(), &options).unwrap();
        assert!(frame.columns().is_empty());
        assert!(frame.data().is_empty());
    }
}
