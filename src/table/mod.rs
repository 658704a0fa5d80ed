//! In-memory tabular data: labelled columns and positional rows.

pub(crate) mod key;
pub(crate) mod value;

use crate::error::SplitError;
use crate::spreadsheet::reference::index_to_reference;
use std::collections::HashSet;

pub use key::PartitionKey;
pub use value::CellValue;
pub use value::DateKind;

/// A rectangular table read from (or destined for) one worksheet.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    /// Source sheet name
    name: String,
    /// Column labels, unique and non-empty
    columns: Vec<String>,
    /// Rows, each exactly `columns.len()` cells wide
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Creates an empty table after checking that labels are present and unique.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Result<Table, SplitError> {
        validate_labels(&columns, 0, 0)?;
        Ok(Table {
            name: name.into(),
            columns,
            rows: Vec::new(),
        })
    }

    /// Appends a row; short rows are padded with nulls and cells beyond the
    /// last column are discarded.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Null);
        self.rows.push(row);
    }

    /// Name of the worksheet the table came from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column labels in input order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of `label` among the columns.
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == label)
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// The first `count` rows, for previews.
    pub fn head(&self, count: usize) -> &[Vec<CellValue>] {
        &self.rows[..count.min(self.rows.len())]
    }

    /// Cell at `row` under column `label`.
    pub fn cell(&self, row: usize, label: &str) -> Option<&CellValue> {
        let col = self.column_index(label)?;
        self.rows.get(row).and_then(|cells| cells.get(col))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// A table with the same name and columns holding `rows`.
    pub(crate) fn with_rows(&self, rows: Vec<Vec<CellValue>>) -> Table {
        Table {
            name: self.name.to_owned(),
            columns: self.columns.to_owned(),
            rows,
        }
    }
}

/// Checks header labels read from 0-based sheet row `header_row`, the first
/// label sitting in sheet column `first_col`.
pub(crate) fn validate_labels(columns: &[String], header_row: usize, first_col: usize) -> Result<(), SplitError> {
    let mut seen = HashSet::<&str>::with_capacity(columns.len());
    for (col, label) in columns.iter().enumerate() {
        if label.is_empty() {
            Err(SplitError::MissingColumnLabel {
                reference: index_to_reference(header_row, first_col + col),
            })?
        }
        if !seen.insert(label.as_str()) {
            Err(SplitError::DuplicateColumn {
                label: label.to_owned(),
                reference: index_to_reference(header_row, first_col + col),
            })?
        }
    }
    Ok(())
}
