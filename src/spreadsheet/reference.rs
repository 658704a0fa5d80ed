//! Conversions between A1-style references and 0-based (row, col) indexes.

/// Rows per worksheet.
pub(crate) const MAX_ROWS: usize = 1_048_576;
/// Columns per worksheet, `A` through `XFD`.
pub(crate) const MAX_COLS: usize = 16_384;

/// Parses a column label such as `A` or `XFD` into a 0-based index, `None`
/// past the last worksheet column.
pub(crate) fn col_to_index(label: &str) -> Option<usize> {
    if label.is_empty() {
        return None;
    }
    let mut index = 0usize;
    for character in label.chars() {
        if !character.is_ascii_alphabetic() {
            return None;
        }
        let digit = (character.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        index = index.checked_mul(26)?.checked_add(digit)?;
    }
    Some(index - 1).filter(|index| *index < MAX_COLS)
}

/// Parses a 1-based row number into a 0-based index, `None` past the last
/// worksheet row.
pub(crate) fn row_to_index(label: &str) -> Option<usize> {
    label
        .parse::<usize>()
        .ok()
        .filter(|row| (1..=MAX_ROWS).contains(row))
        .map(|row| row - 1)
}

/// Parses a reference like `B12` into `(row, col)`.
pub(crate) fn reference_to_index(reference: &str) -> Option<(usize, usize)> {
    let split = reference.find(|character: char| character.is_ascii_digit())?;
    let (col, row) = reference.split_at(split);
    let col = col.trim_start_matches('$');
    let row = row.trim_start_matches('$');
    Some((row_to_index(row)?, col_to_index(col.trim_end_matches('$'))?))
}

/// Formats a 0-based column index as its letter label.
pub(crate) fn index_to_col(mut col: usize) -> String {
    let mut label = Vec::<u8>::new();
    loop {
        label.push(b'A' + (col % 26) as u8);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    label.iter().rev().map(|byte| *byte as char).collect()
}

/// Formats 0-based `(row, col)` as an A1-style reference.
pub(crate) fn index_to_reference(row: usize, col: usize) -> String {
    format!("{}{}", index_to_col(col), row + 1)
}
