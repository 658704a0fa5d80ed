//! # Spreadsheet Processing Module
//!
//! Reads the first worksheet of an xlsx workbook into a [`Table`] and writes
//! tables back out as single-sheet workbooks. Number formats decide which
//! numeric cells are dates, and both the 1900 and 1904 date systems are
//! understood.
//!
//! [`Table`]: crate::table::Table

pub(crate) mod cell;
pub(crate) mod excel;
pub(crate) mod options;
pub(crate) mod reference;
pub(crate) mod sheet;
pub(crate) mod writer;
pub(crate) mod xlsx;

pub use options::ErrorCells;
pub use options::ReadOptions;
pub(crate) use writer::write;
pub(crate) use xlsx::read;
