use crate::error::SplitError;

/// What to do with cells holding an Excel error value such as `#N/A`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ErrorCells {
    /// Keep the error literal as a string.
    #[default]
    Text,
    /// Treat the cell as empty.
    Null,
    /// Fail the read.
    Reject,
}

/// Options controlling how an input workbook is loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Handling of error cells.
    pub error_cells: ErrorCells,

    /// Largest input accepted, in bytes. Unlimited when `None`.
    pub max_input_bytes: Option<usize>,
}

impl ReadOptions {
    /// Fails with `ResourceExhausted` when `size` exceeds the configured limit.
    pub(crate) fn check_size(&self, size: usize) -> Result<(), SplitError> {
        match self.max_input_bytes {
            Some(limit) if size > limit => Err(SplitError::ResourceExhausted { size, limit }),
            _ => Ok(()),
        }
    }
}
