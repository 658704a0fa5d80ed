//! End-to-end split: read, check the column, partition, write, archive.
//! Merging runs the same reader and writer the other way round.

use crate::archive;
use crate::archive::ArchiveEntry;
use crate::archive::ArchiveOptions;
use crate::error::SplitError;
use crate::merge::merge_tables;
use crate::merge::MERGED_SHEET_NAME;
use crate::partition::partition;
use crate::spreadsheet;
use crate::spreadsheet::ReadOptions;
use crate::table::PartitionKey;
use crate::table::Table;
use tracing::debug;
use tracing::info;

/// Name given to the worksheet inside each output workbook.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SheetNaming {
    /// The display form of the partition key.
    #[default]
    PartitionKey,
    /// The name of the input worksheet.
    Source,
    /// The same name for every output.
    Fixed(String),
}

/// Treatment of rows whose partition cell is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NullKeys {
    /// Leave them out of the archive.
    #[default]
    Drop,
    /// Gather them into one last entry with this stem, e.g. `__unassigned__`.
    Collect(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitOptions {
    pub read: ReadOptions,
    pub sheet_naming: SheetNaming,
    pub null_keys: NullKeys,
    pub archive: ArchiveOptions,
}

/// Summary of one archive entry.
#[derive(Clone, Debug, PartialEq)]
pub struct EntrySummary {
    pub entry_name: String,
    /// `None` for the entry collecting empty keys
    pub key: Option<PartitionKey>,
    pub rows: usize,
}

/// The archive together with what went into it.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitOutcome {
    pub archive: Vec<u8>,
    /// One summary per entry, in archive order
    pub entries: Vec<EntrySummary>,
    /// Rows left out because their partition cell was empty
    pub dropped_rows: usize,
}

/// Splits workbooks according to a fixed set of options.
#[derive(Clone, Debug, Default)]
pub struct Splitter {
    options: SplitOptions,
}

impl Splitter {
    pub fn new(options: SplitOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SplitOptions {
        &self.options
    }

    /// Reads the first worksheet of `input`.
    pub fn read(&self, input: &[u8]) -> Result<Table, SplitError> {
        spreadsheet::read(input, &self.options.read)
    }

    /// Splits `input` by the values under `column` and returns the archive.
    pub fn split(&self, input: &[u8], column: &str) -> Result<Vec<u8>, SplitError> {
        Ok(self.split_detailed(input, column)?.archive)
    }

    /// Like [`Splitter::split`], also reporting every entry written.
    pub fn split_detailed(&self, input: &[u8], column: &str) -> Result<SplitOutcome, SplitError> {
        let table = self.read(input)?;
        info!(
            sheet = table.name(),
            columns = table.columns().len(),
            rows = table.len(),
            "workbook loaded"
        );
        self.split_table(&table, column)
    }

    /// Splits an already loaded table.
    pub fn split_table(&self, table: &Table, column: &str) -> Result<SplitOutcome, SplitError> {
        let partitions = partition(table, column)?;
        debug!(column, partitions = partitions.partitions.len(), "rows grouped");

        let mut outputs = Vec::<(Option<PartitionKey>, String, Table)>::new();
        for part in partitions.partitions {
            let stem = part.key.to_string();
            outputs.push((Some(part.key), stem, part.table));
        }
        let mut dropped_rows = partitions.unkeyed.len();
        if let NullKeys::Collect(stem) = &self.options.null_keys {
            if !partitions.unkeyed.is_empty() {
                dropped_rows = 0;
                outputs.push((None, stem.to_owned(), partitions.unkeyed));
            }
        }

        let names = archive::entry_names(outputs.iter().map(|(_, stem, _)| stem.as_str()), &self.options.archive);
        let mut entries = Vec::<ArchiveEntry>::with_capacity(outputs.len());
        let mut summaries = Vec::<EntrySummary>::with_capacity(outputs.len());
        for ((key, stem, table), name) in outputs.into_iter().zip(names) {
            let sheet_name = match &self.options.sheet_naming {
                SheetNaming::PartitionKey => stem.as_str(),
                SheetNaming::Source => table.name(),
                SheetNaming::Fixed(name) => name.as_str(),
            };
            let blob = spreadsheet::write(&table, sheet_name)?;
            debug!(entry = %name, rows = table.len(), bytes = blob.len(), "partition written");
            summaries.push(EntrySummary {
                entry_name: name.to_owned(),
                key,
                rows: table.len(),
            });
            entries.push(ArchiveEntry { name, blob });
        }

        let archive = archive::assemble(&entries, &self.options.archive)?;
        info!(
            entries = entries.len(),
            dropped_rows,
            bytes = archive.len(),
            "archive assembled"
        );
        Ok(SplitOutcome {
            archive,
            entries: summaries,
            dropped_rows,
        })
    }

    /// Reads the first worksheet of every named input and writes them, one
    /// after the other, to a single-sheet workbook.
    pub fn merge(&self, inputs: &[(&str, &[u8])]) -> Result<Vec<u8>, SplitError> {
        let mut tables = Vec::<(&str, Table)>::with_capacity(inputs.len());
        for (name, input) in inputs {
            let table = self.read(input)?;
            debug!(source = *name, rows = table.len(), "merge source loaded");
            tables.push((*name, table));
        }
        let sources: Vec<(&str, &Table)> = tables.iter().map(|(name, table)| (*name, table)).collect();
        self.merge_tables(&sources)
    }

    /// Merges already loaded tables, see [`merge_tables`].
    pub fn merge_tables(&self, sources: &[(&str, &Table)]) -> Result<Vec<u8>, SplitError> {
        let merged = merge_tables(sources)?;
        let blob = spreadsheet::write(&merged, MERGED_SHEET_NAME)?;
        info!(
            sources = sources.len(),
            columns = merged.columns().len(),
            rows = merged.len(),
            bytes = blob.len(),
            "workbooks merged"
        );
        Ok(blob)
    }
}
