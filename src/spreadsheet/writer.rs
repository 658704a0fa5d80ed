//! Serializes a table into a single-sheet xlsx workbook.

use crate::error::SplitError;
use crate::spreadsheet::cell::datetime_to_serial;
use crate::spreadsheet::reference::MAX_COLS;
use crate::spreadsheet::reference::MAX_ROWS;
use crate::table::CellValue;
use crate::table::DateKind;
use crate::table::Table;
use rust_xlsxwriter::Format;
use rust_xlsxwriter::Workbook;
use rust_xlsxwriter::Worksheet;

/// Characters per cell.
const MAX_STRING_LEN: usize = 32_767;
const MAX_SHEET_NAME_LEN: usize = 31;
const ILLEGAL_SHEET_NAME_CHARS: [char; 7] = ['*', ':', '?', '/', '\\', '[', ']'];

/// Number formats for the three date-like cell kinds.
struct DateFormats {
    date_time: Format,
    date: Format,
    time: Format,
}

impl DateFormats {
    fn new() -> Self {
        Self {
            date_time: Format::new().set_num_format(DateKind::DateTime.number_format()),
            date: Format::new().set_num_format(DateKind::Date.number_format()),
            time: Format::new().set_num_format(DateKind::Time.number_format()),
        }
    }

    fn get(&self, kind: DateKind) -> &Format {
        match kind {
            DateKind::DateTime => &self.date_time,
            DateKind::Date => &self.date,
            DateKind::Time => &self.time,
        }
    }
}

/// Writes `table` as the only worksheet of a new workbook: the labels on the
/// first row, then one worksheet row per table row. No index column is added.
pub(crate) fn write(table: &Table, sheet_name: &str) -> Result<Vec<u8>, SplitError> {
    let columns = table.columns();
    if columns.len() > MAX_COLS {
        Err(SplitError::SerializationError {
            row: 1,
            column: columns[MAX_COLS].to_owned(),
            message: format!("more than {MAX_COLS} columns"),
        })?
    }
    if table.len() + 1 > MAX_ROWS {
        Err(SplitError::SerializationError {
            row: MAX_ROWS + 1,
            column: columns.first().cloned().unwrap_or_default(),
            message: format!("more than {MAX_ROWS} rows"),
        })?
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sanitize_sheet_name(sheet_name))?;

    for (col, label) in columns.iter().enumerate() {
        write_cell(worksheet, 0, col, label, &CellValue::String(label.to_owned()), None)?;
    }
    let formats = DateFormats::new();
    for (index, row) in table.rows().iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            write_cell(worksheet, index + 1, col, &columns[col], value, Some(&formats))?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: usize,
    col: usize,
    label: &str,
    value: &CellValue,
    formats: Option<&DateFormats>,
) -> Result<(), SplitError> {
    let unrepresentable = |message: String| SplitError::SerializationError {
        row: row + 1,
        column: label.to_owned(),
        message,
    };
    let (xlsx_row, xlsx_col) = (cast_row_num(row), cast_col_num(col));
    match value {
        CellValue::Null => (),
        CellValue::String(text) => {
            if text.chars().count() > MAX_STRING_LEN {
                Err(unrepresentable(format!("string longer than {MAX_STRING_LEN} characters")))?
            }
            worksheet
                .write_string(xlsx_row, xlsx_col, text)
                .map_err(|error| unrepresentable(error.to_string()))?;
        }
        CellValue::Number(number) => {
            if !number.is_finite() {
                Err(unrepresentable(format!("number {number} is not finite")))?
            }
            worksheet
                .write_number(xlsx_row, xlsx_col, *number)
                .map_err(|error| unrepresentable(error.to_string()))?;
        }
        CellValue::Boolean(flag) => {
            worksheet
                .write_boolean(xlsx_row, xlsx_col, *flag)
                .map_err(|error| unrepresentable(error.to_string()))?;
        }
        CellValue::DateTime(datetime, kind) => {
            let serial = datetime_to_serial(datetime)
                .ok_or_else(|| unrepresentable(format!("date {datetime} is outside 1899-12-31..=9999-12-31")))?;
            let written = match formats {
                Some(formats) => worksheet.write_number_with_format(xlsx_row, xlsx_col, serial, formats.get(*kind)),
                None => worksheet.write_number(xlsx_row, xlsx_col, serial),
            };
            written.map_err(|error| unrepresentable(error.to_string()))?;
        }
    }
    Ok(())
}

/// Makes `name` acceptable as a worksheet name: illegal characters become `_`,
/// surrounding whitespace and apostrophes are dropped, and the result is cut
/// to 31 characters. Falls back to `Sheet`.
pub(crate) fn sanitize_sheet_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if ILLEGAL_SHEET_NAME_CHARS.contains(&c) || c.is_control() { '_' } else { c })
        .collect();
    let trimmed = replaced.trim().trim_matches('\'');
    let truncated: String = trimmed.chars().take(MAX_SHEET_NAME_LEN).collect();
    let sanitized = truncated.trim_end().trim_end_matches('\'');
    if sanitized.is_empty() {
        "Sheet".to_owned()
    } else if sanitized.eq_ignore_ascii_case("history") {
        // reserved by Excel
        format!("{sanitized}_")
    } else {
        sanitized.to_owned()
    }
}

// Bounds are checked against MAX_ROWS and MAX_COLS before any cell is written.
fn cast_row_num(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn cast_col_num(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
