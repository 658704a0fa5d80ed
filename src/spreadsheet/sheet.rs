use crate::error::SplitError;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::DateSystem;
use crate::spreadsheet::options::ErrorCells;
use crate::table::validate_labels;
use crate::table::CellValue;
use crate::table::Table;

/// Cells collected from one worksheet, in document order, before a header
/// has been chosen.
pub(crate) struct Sheet {
    /// Sheet name
    pub(crate) name: String,
    /// Every populated cell
    pub(crate) cells: Vec<Cell>,
}

/// A typed cell with its position.
struct Located {
    row: usize,
    col: usize,
    value: CellValue,
}

impl Sheet {
    pub(super) fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            cells: Vec::new(),
        }
    }

    pub(super) fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Types every cell and lays them out as a table.
    ///
    /// The first row holding a value is the header. Leading empty rows and
    /// trailing empty rows are dropped; empty rows in between become rows of
    /// nulls. Columns span from the leftmost to the rightmost label or value.
    pub(super) fn into_table(
        self,
        shared_strings: &[String],
        date_system: DateSystem,
        error_cells: ErrorCells,
    ) -> Result<Table, SplitError> {
        let mut located = Vec::<Located>::with_capacity(self.cells.len());
        for cell in &self.cells {
            let value = cell.to_value(shared_strings, date_system, error_cells)?;
            if !value.is_null() {
                located.push(Located {
                    row: cell.row,
                    col: cell.col,
                    value,
                });
            }
        }
        // rows and cells are almost always in order already
        located.sort_by_key(|cell| (cell.row, cell.col));

        let (header_row, last_row) = match (located.first(), located.last()) {
            (Some(first), Some(last)) => (first.row, last.row),
            _ => Err(SplitError::EmptyWorkbook)?,
        };
        let col_lower_bound = located.iter().map(|cell| cell.col).min().unwrap_or_default();
        let col_upper_bound = located.iter().map(|cell| cell.col).max().unwrap_or_default();
        let width = col_upper_bound - col_lower_bound + 1;

        let mut located = located.into_iter().peekable();
        let mut labels = vec![String::new(); width];
        while let Some(cell) = located.next_if(|cell| cell.row == header_row) {
            labels[cell.col - col_lower_bound] = cell.value.to_string();
        }
        validate_labels(&labels, header_row, col_lower_bound)?;

        // rows grow as cells arrive, empty rows in between are padded by push_row
        let mut table = Table::new(self.name, labels)?;
        let mut current_row = header_row + 1;
        let mut cells = Vec::<CellValue>::new();
        for cell in located {
            while current_row < cell.row {
                table.push_row(std::mem::take(&mut cells));
                current_row += 1;
            }
            let col = cell.col - col_lower_bound;
            if cells.len() <= col {
                cells.resize(col + 1, CellValue::Null);
            }
            cells[col] = cell.value;
        }
        if last_row > header_row {
            table.push_row(cells);
        }
        Ok(table)
    }
}
