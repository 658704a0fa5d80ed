//! # Rusty Split
//!
//! Splits a spreadsheet into one workbook per distinct value of a chosen
//! column and packs the results into a single zip archive.
//!
//! ## Features
//!
//! - Reads the first worksheet of an `.xlsx` workbook, with shared and inline
//!   strings, booleans, error cells and dates in both the 1900 and 1904 systems
//! - Groups rows by key in order of first appearance, keeping input row order
//! - Writes each group with the full header and no index column
//! - Names archive entries after their key, sanitized and made unique
//! - Merges several workbooks into one, tagging rows with their source
//!
//! ## Example
//!
//! ```no_run
//! let input = std::fs::read("sales.xlsx")?;
//! let archive = rusty_split::split(&input, "region")?;
//! std::fs::write("Split_sales.zip", archive)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`Splitter`] exposes the options for reading, naming and archiving.

pub mod archive;
pub mod error;
mod helpers;
pub mod merge;
pub mod partition;
pub mod pipeline;
pub mod spreadsheet;
pub mod table;

pub use archive::ArchiveOptions;
pub use archive::Compression;
pub use error::SplitError;
pub use error::Stage;
pub use merge::SOURCE_COLUMN;
pub use pipeline::NullKeys;
pub use pipeline::SheetNaming;
pub use pipeline::SplitOptions;
pub use pipeline::SplitOutcome;
pub use pipeline::Splitter;
pub use spreadsheet::ErrorCells;
pub use spreadsheet::ReadOptions;
pub use table::CellValue;
pub use table::PartitionKey;
pub use table::Table;

/// Splits `input` by the values under `column` with default options and
/// returns the zip archive.
pub fn split(input: &[u8], column: &str) -> Result<Vec<u8>, SplitError> {
    Splitter::default().split(input, column)
}

/// Stacks the first worksheets of `inputs`, each named by its source, into
/// one workbook with default options.
pub fn merge(inputs: &[(&str, &[u8])]) -> Result<Vec<u8>, SplitError> {
    Splitter::default().merge(inputs)
}
