//! Table elements for ODF documents.
//!
//! Lightweight views over `table:table`, `table:table-row` and
//! `table:table-cell` elements of a parsed content tree. The views borrow the
//! tree; nothing is copied until a cell value is decoded.

use super::element::Element;
use super::namespace::{OFFICENS, QualifiedName, TABLENS};
use super::table_expansion::{RowEmptiness, is_empty_cell, is_empty_row, repeat_attribute};
use crate::common::{Error, Result};
use crate::odf::datatype::{Boolean, DurationOdf, Timestamp};
use crate::odf::value::{CellValue, ValueType};

/// A table element
#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    element: &'a Element,
}

impl<'a> Table<'a> {
    /// Wrap a `table:table` element
    pub fn from_element(element: &'a Element) -> Result<Self> {
        if !element.is(TABLENS, "table") {
            return Err(Error::InvalidFormat(format!(
                "Expected table:table, found {}",
                element.name()
            )));
        }
        Ok(Self { element })
    }

    /// Get the table name
    pub fn name(&self) -> Option<&'a str> {
        self.element.attribute_ns(TABLENS, "name")
    }

    /// Underlying element
    pub fn element(&self) -> &'a Element {
        self.element
    }

    /// Rows in document order.
    ///
    /// Rows inside header-row, row-group and rows containers are included;
    /// rows of nested tables are not.
    pub fn rows(&self) -> Vec<TableRow<'a>> {
        let table = QualifiedName::table("table");
        self.element
            .find_descendants(&QualifiedName::table("table-row"), Some(&table))
            .into_iter()
            .map(|element| TableRow { element })
            .collect()
    }

    /// Get the number of row elements (repeats not expanded)
    pub fn row_count(&self) -> usize {
        self.rows().len()
    }
}

impl PartialEq for Table<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.element, other.element)
    }
}

/// A table row element
#[derive(Debug, Clone, Copy)]
pub struct TableRow<'a> {
    element: &'a Element,
}

impl<'a> TableRow<'a> {
    /// Cells in column order, covered cells included
    pub fn cells(&self) -> Vec<TableCell<'a>> {
        self.element
            .child_elements()
            .filter(|child| child.is(TABLENS, "table-cell") || child.is(TABLENS, "covered-table-cell"))
            .map(|element| TableCell { element })
            .collect()
    }

    /// Effective `table:number-rows-repeated`
    pub fn repeat_count(&self) -> Result<usize> {
        repeat_attribute(self.element, "number-rows-repeated")
    }

    /// Check whether the row is an empty placeholder
    pub fn is_empty(&self) -> bool {
        is_empty_row(self.element)
    }

    /// Check whether the row is empty under an explicit rule
    pub fn is_empty_under(&self, rule: RowEmptiness) -> bool {
        rule.matches(self.element)
    }

    /// Underlying element
    pub fn element(&self) -> &'a Element {
        self.element
    }
}

/// A table cell element
#[derive(Debug, Clone, Copy)]
pub struct TableCell<'a> {
    element: &'a Element,
}

impl<'a> TableCell<'a> {
    /// Effective `table:number-columns-repeated`
    pub fn repeat_count(&self) -> Result<usize> {
        repeat_attribute(self.element, "number-columns-repeated")
    }

    /// Check whether the cell is an empty placeholder (no child content)
    pub fn is_empty(&self) -> bool {
        is_empty_cell(self.element)
    }

    /// Rendered text content
    pub fn text(&self) -> String {
        self.element.text_content()
    }

    /// Declared `office:value-type`, `None` when absent
    pub fn value_type(&self) -> Result<Option<ValueType>> {
        self.element
            .attribute_ns(OFFICENS, "value-type")
            .map(str::parse)
            .transpose()
    }

    /// Decode the cell into a typed scalar.
    ///
    /// The value comes from the attribute matching the declared type; string
    /// cells use the rendered text. An untyped cell decodes to `Empty`.
    pub fn value(&self) -> Result<CellValue> {
        let Some(value_type) = self.value_type()? else {
            return Ok(CellValue::Empty);
        };

        match value_type {
            ValueType::Boolean => {
                let value = match self.element.attribute_ns(OFFICENS, "boolean-value") {
                    Some(raw) => Boolean::decode(raw)?,
                    None => false,
                };
                Ok(CellValue::Boolean(value))
            },
            ValueType::Float | ValueType::Percentage | ValueType::Currency => {
                let raw = self.required_attribute("value", "office:value")?;
                let number = fast_float2::parse::<f64, _>(raw.trim()).map_err(|_| {
                    Error::ParseError(format!("Invalid {} value '{}'", value_type, raw))
                })?;
                Ok(CellValue::Float(number))
            },
            ValueType::String => Ok(CellValue::String(self.text())),
            ValueType::Date => {
                Timestamp::decode(self.required_attribute("date-value", "office:date-value")?).map(CellValue::Timestamp)
            },
            ValueType::Time => {
                DurationOdf::decode(self.required_attribute("time-value", "office:time-value")?).map(CellValue::Duration)
            },
        }
    }

    fn required_attribute(&self, local_name: &str, attribute: &'static str) -> Result<&'a str> {
        self.element
            .attribute_ns(OFFICENS, local_name)
            .ok_or(Error::MissingAttribute {
                element: "table:table-cell",
                attribute,
            })
    }

    /// Underlying element
    pub fn element(&self) -> &'a Element {
        self.element
    }
}
