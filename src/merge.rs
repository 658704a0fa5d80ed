//! Stacks the tables of several workbooks into one, tagging every row with
//! the workbook it came from.

use crate::error::SplitError;
use crate::table::CellValue;
use crate::table::Table;
use std::collections::HashMap;

/// Label of the column naming each row's source workbook.
pub const SOURCE_COLUMN: &str = "Source_File";

/// Name of the merged table and of the worksheet it is written to.
pub const MERGED_SHEET_NAME: &str = "Sheet1";

/// Concatenates `sources` in order.
///
/// Columns are the union of the source labels in order of first appearance,
/// followed by [`SOURCE_COLUMN`]. Cells under a column a source lacks are
/// null. A source column already called [`SOURCE_COLUMN`] is overwritten by
/// the source name.
pub fn merge_tables<'a>(sources: &[(&'a str, &'a Table)]) -> Result<Table, SplitError> {
    if sources.is_empty() {
        Err(SplitError::EmptyWorkbook)?
    }

    let mut columns = Vec::<String>::new();
    let mut positions = HashMap::<&str, usize>::new();
    for (_, table) in sources {
        for label in table.columns() {
            if label != SOURCE_COLUMN && !positions.contains_key(label.as_str()) {
                positions.insert(label.as_str(), columns.len());
                columns.push(label.to_owned());
            }
        }
    }
    let source_col = columns.len();
    columns.push(SOURCE_COLUMN.to_owned());
    let width = columns.len();

    let mut merged = Table::new(MERGED_SHEET_NAME, columns)?;
    for (name, table) in sources {
        let targets: Vec<Option<usize>> = table
            .columns()
            .iter()
            .map(|label| positions.get(label.as_str()).copied())
            .collect();
        for row in table.rows() {
            let mut cells = vec![CellValue::Null; width];
            for (value, target) in row.iter().zip(&targets) {
                if let Some(target) = target {
                    cells[*target] = value.clone();
                }
            }
            cells[source_col] = CellValue::from(*name);
            merged.push_row(cells);
        }
    }
    Ok(merged)
}
