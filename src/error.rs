use std::fmt::Display;
use thiserror::Error;

/// Pipeline stage in which an error surfaced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Read,
    ColumnCheck,
    Write,
    Archive,
}

impl Stage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Stage::Read => "read",
            Stage::ColumnCheck => "column-check",
            Stage::Write => "write",
            Stage::Archive => "archive",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every failure the split pipeline can report to its caller.
/// Messages are prefixed with the stage that produced them.
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("read: input is not a recognizable workbook: {0}")]
    MalformedInput(#[from] WorkbookError),

    #[error("read: workbook has no header row")]
    EmptyWorkbook,

    #[error("read: duplicate column label '{label}' at {reference}")]
    DuplicateColumn { label: String, reference: String },

    #[error("read: missing column label at {reference}")]
    MissingColumnLabel { reference: String },

    #[error("column-check: unknown column '{column}'")]
    UnknownColumn { column: String },

    #[error("write: cannot represent cell in row {row}, column '{column}': {message}")]
    SerializationError {
        row: usize,
        column: String,
        message: String,
    },

    /// Failure of the workbook as a whole (sheet setup or packaging), not tied
    /// to a cell. Cell failures are `SerializationError`.
    #[error("write: workbook serialization failed: {0}")]
    WorkbookWriteError(#[from] rust_xlsxwriter::XlsxError),

    #[error("archive: {0}")]
    ArchiveError(String),

    #[error("read: input of {size} bytes exceeds the limit of {limit} bytes")]
    ResourceExhausted { size: usize, limit: usize },
}

impl SplitError {
    /// Returns the stage that raised this error.
    pub fn stage(&self) -> Stage {
        match self {
            SplitError::MalformedInput(_)
            | SplitError::EmptyWorkbook
            | SplitError::DuplicateColumn { .. }
            | SplitError::MissingColumnLabel { .. }
            | SplitError::ResourceExhausted { .. } => Stage::Read,
            SplitError::UnknownColumn { .. } => Stage::ColumnCheck,
            SplitError::SerializationError { .. } | SplitError::WorkbookWriteError(_) => Stage::Write,
            SplitError::ArchiveError(_) => Stage::Archive,
        }
    }
}

/// Reasons a blob could not be understood as an xlsx workbook.
/// Aggregates errors from the zip and XML layers as well as the reader itself.
#[derive(Error, Debug)]
pub enum WorkbookError {
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    ParseIntError(#[from] std::num::ParseIntError),

    #[error("{0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("{0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("{0}")]
    XmlEncodingError(#[from] quick_xml::encoding::EncodingError),

    #[error("{0}")]
    XmlAttributeError(#[from] quick_xml::events::attributes::AttrError),

    #[error("{0}")]
    XmlHelperError(#[from] crate::helpers::xml::XmlError),

    #[error("missing workbook part '{0}'")]
    MissingPart(String),

    #[error("workbook is encrypted or uses the legacy binary format")]
    UnsupportedContainer,

    #[error("workbook contains no worksheets")]
    NoWorksheets,

    #[error("invalid value '{value}' at {reference}: {message}")]
    CellValueError {
        reference: String,
        value: String,
        message: String,
    },

    #[error("error value '{value}' at {reference}")]
    ErrorCell { reference: String, value: String },
}
