//! Grouping of table rows by the distinct values of one column.

use crate::error::SplitError;
use crate::table::PartitionKey;
use crate::table::Table;
use std::collections::HashMap;

/// Rows of the input sharing one key, with the full column set.
#[derive(Clone, Debug, PartialEq)]
pub struct Partition {
    pub key: PartitionKey,
    pub table: Table,
}

/// Result of grouping a table by a column.
#[derive(Clone, Debug, PartialEq)]
pub struct Partitions {
    /// One partition per distinct key, in order of first appearance
    pub partitions: Vec<Partition>,
    /// Rows whose key cell was empty, in input order
    pub unkeyed: Table,
}

/// Groups the rows of `table` by the value under `column`.
///
/// Partitions come out in the order their key first appears and keep the
/// input order of their rows. Rows with an empty key cell go to `unkeyed`.
pub fn partition(table: &Table, column: &str) -> Result<Partitions, SplitError> {
    let index = table.column_index(column).ok_or_else(|| SplitError::UnknownColumn {
        column: column.to_owned(),
    })?;

    let mut positions = HashMap::<PartitionKey, usize>::new();
    let mut groups = Vec::<(PartitionKey, Vec<Vec<_>>)>::new();
    let mut unkeyed = Vec::new();
    for row in table.rows() {
        match PartitionKey::new(&row[index]) {
            Some(key) => match positions.get(&key) {
                Some(position) => groups[*position].1.push(row.to_owned()),
                None => {
                    positions.insert(key.clone(), groups.len());
                    groups.push((key, vec![row.to_owned()]));
                }
            },
            None => unkeyed.push(row.to_owned()),
        }
    }

    let partitions = groups
        .into_iter()
        .map(|(key, rows)| Partition {
            key,
            table: table.with_rows(rows),
        })
        .collect();
    Ok(Partitions {
        partitions,
        unkeyed: table.with_rows(unkeyed),
    })
}
