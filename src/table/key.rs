use crate::table::value::CellValue;
use std::fmt::Display;
use std::hash::Hash;
use std::hash::Hasher;

/// Hashable canonical form of a non-null cell value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Canonical {
    Text(String),
    /// f64 bits with -0.0 folded into 0.0 and every NaN folded into one pattern
    Number(u64),
    Boolean(bool),
    /// seconds and sub-second nanoseconds since the Unix epoch
    Instant(i64, u32),
}

/// A distinct value of the partition column.
///
/// Keeps the first-seen cell value for display while equality and hashing
/// go through the canonical form, so `1` and `1.0` collide and `1` and `"1"`
/// do not.
#[derive(Clone, Debug)]
pub struct PartitionKey {
    canonical: Canonical,
    value: CellValue,
}

impl PartitionKey {
    /// Builds the key for `value`, `None` for null cells.
    pub fn new(value: &CellValue) -> Option<PartitionKey> {
        let canonical = match value {
            CellValue::Null => return None,
            CellValue::String(text) => Canonical::Text(text.to_owned()),
            CellValue::Number(number) if number.is_nan() => Canonical::Number(f64::NAN.to_bits()),
            CellValue::Number(number) if *number == 0.0 => Canonical::Number(0f64.to_bits()),
            CellValue::Number(number) => Canonical::Number(number.to_bits()),
            CellValue::Boolean(flag) => Canonical::Boolean(*flag),
            CellValue::DateTime(datetime, _) => {
                let instant = datetime.and_utc();
                Canonical::Instant(instant.timestamp(), instant.timestamp_subsec_nanos())
            }
        };
        Some(PartitionKey {
            canonical,
            value: value.to_owned(),
        })
    }

    /// The cell value this key was first observed as.
    pub fn value(&self) -> &CellValue {
        &self.value
    }
}

impl PartialEq for PartitionKey {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for PartitionKey {}

impl Hash for PartitionKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl Display for PartitionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.value, f)
    }
}
