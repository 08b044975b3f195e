//! Table expansion utilities for handling repeated cells and rows.
//!
//! ODF files mark runs of identical cells and rows with
//! `table:number-columns-repeated` and `table:number-rows-repeated`. Spreadsheet
//! applications pad every sheet to its full extent this way (a trailing cell
//! repeated a thousand times, a trailing row repeated a million times), so runs
//! of empty placeholders are deferred and only materialized when later content
//! follows them.

use super::element::{Element, Node};
use super::namespace::TABLENS;
use super::table::TableRow;
use crate::common::{Error, Result};
use crate::odf::value::CellValue;
use serde::{Deserialize, Serialize};

/// How content-bearing elements with a repeat count are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatPolicy {
    /// Repeated content cells and rows are consistency errors
    Strict,
    /// Repeated content cells expand; repeated content rows are errors
    #[default]
    ExpandCells,
    /// Repeated content cells and rows both expand
    ExpandAll,
}

impl RepeatPolicy {
    /// Whether a content cell with repeat > 1 is expanded
    #[inline]
    pub fn expands_cells(&self) -> bool {
        matches!(self, RepeatPolicy::ExpandCells | RepeatPolicy::ExpandAll)
    }

    /// Whether a content row with repeat > 1 is expanded
    #[inline]
    pub fn expands_rows(&self) -> bool {
        matches!(self, RepeatPolicy::ExpandAll)
    }
}

/// Effective repeat count from a `table:*-repeated` attribute.
///
/// Absent means 1. Zero and non-numeric values are rejected.
pub(crate) fn repeat_attribute(element: &Element, local_name: &str) -> Result<usize> {
    let Some(raw) = element.attribute_ns(TABLENS, local_name) else {
        return Ok(1);
    };

    match raw.trim().parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(Error::ParseError(format!(
            "Invalid table:{} value '{}'",
            local_name, raw
        ))),
    }
}

/// A cell is an empty placeholder when it has no child content.
#[inline]
pub(crate) fn is_empty_cell(element: &Element) -> bool {
    element.is_leaf()
}

/// A row is an empty placeholder when it has exactly one child and that child
/// has no content.
pub(crate) fn is_empty_row(element: &Element) -> bool {
    matches!(element.child_nodes(), [Node::Element(only)] if only.is_leaf())
}

/// A row whose cells are all empty placeholders, however many runs it holds.
///
/// LibreOffice writes styled padding rows as a styled empty cell followed by a
/// long empty run.
pub(crate) fn is_padding_row(element: &Element) -> bool {
    let mut cells = element
        .child_elements()
        .filter(|child| child.is(TABLENS, "table-cell") || child.is(TABLENS, "covered-table-cell"))
        .peekable();
    cells.peek().is_some() && cells.all(is_empty_cell)
}

/// Which rows the materializer treats as empty placeholders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowEmptiness {
    /// Only a row with a single childless child
    #[default]
    SingleChild,
    /// Also any row whose cells are all empty placeholders
    AllCellsEmpty,
}

impl RowEmptiness {
    /// Apply the rule to a row element
    pub(crate) fn matches(&self, element: &Element) -> bool {
        match self {
            RowEmptiness::SingleChild => is_empty_row(element),
            RowEmptiness::AllCellsEmpty => is_empty_row(element) || is_padding_row(element),
        }
    }
}

/// Deferred run of empty placeholders.
///
/// Empties are counted rather than stored; [`flush_into`](Self::flush_into)
/// writes them out once real content follows, and whatever is still pending at
/// the end of a row or table is trailing padding to drop.
#[derive(Debug, Default)]
pub struct RunLengthAccumulator {
    pending: usize,
}

impl RunLengthAccumulator {
    /// Create an accumulator with nothing pending
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `count` more empty placeholders
    pub fn defer(&mut self, count: usize) {
        self.pending = self.pending.saturating_add(count);
    }

    /// Number of empties waiting to be flushed
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Append the pending empties as copies of `filler` and reset.
    pub fn flush_into<T: Clone>(&mut self, out: &mut Vec<T>, filler: T) {
        if self.pending > 0 {
            out.extend(std::iter::repeat_n(filler, self.pending));
            self.pending = 0;
        }
    }
}

/// Utilities for expanding repeated table elements
pub struct TableExpander;

impl TableExpander {
    /// Expand a row's cells into decoded values.
    ///
    /// Every cell is decoded, placeholders included, so malformed values fail
    /// even where they would be dropped. Interior empty runs become
    /// [`CellValue::Empty`]; trailing ones are dropped.
    ///
    /// # Errors
    ///
    /// [`Error::Consistency`] when a content cell repeats and `policy` does not
    /// expand cells, plus any cell decoding error.
    pub fn expand_row(row: &TableRow<'_>, policy: RepeatPolicy) -> Result<Vec<CellValue>> {
        let mut values = Vec::new();
        let mut empties = RunLengthAccumulator::new();

        for cell in row.cells() {
            let repeat = cell.repeat_count()?;
            let value = cell.value()?;

            if cell.is_empty() {
                empties.defer(repeat);
                continue;
            }

            if repeat > 1 && !policy.expands_cells() {
                return Err(Error::Consistency {
                    element: "table:table-cell",
                    repeat,
                });
            }

            empties.flush_into(&mut values, CellValue::Empty);
            values.extend(std::iter::repeat_n(value, repeat));
        }

        if empties.pending() > 0 {
            tracing::trace!(target: "odfgrid::expand", dropped = empties.pending(), "dropped trailing empty cells");
        }

        Ok(values)
    }
}
