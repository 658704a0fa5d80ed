use chrono::NaiveDateTime;
use std::fmt::Display;

/// Which of the date-like display forms a value came from.
///
/// Only affects rendering (key names, output number formats); two values that
/// denote the same instant are equal whatever their kind.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DateKind {
    #[default]
    DateTime,
    Date,
    Time,
}

impl DateKind {
    /// strftime pattern used for the display form.
    pub const fn display_pattern(&self) -> &'static str {
        match self {
            DateKind::DateTime => "%Y-%m-%d %H:%M:%S",
            DateKind::Date => "%Y-%m-%d",
            DateKind::Time => "%H:%M:%S",
        }
    }

    /// Excel number format code written for cells of this kind.
    pub const fn number_format(&self) -> &'static str {
        match self {
            DateKind::DateTime => "yyyy-mm-dd hh:mm:ss",
            DateKind::Date => "yyyy-mm-dd",
            DateKind::Time => "hh:mm:ss",
        }
    }
}

/// A single cell of a [`crate::Table`].
#[derive(Clone, Debug, Default)]
pub enum CellValue {
    /// Missing or empty cell
    #[default]
    Null,
    String(String),
    Number(f64),
    Boolean(bool),
    DateTime(NaiveDateTime, DateKind),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

/// Equality follows the partition key rule: numbers compare numerically,
/// dates by instant, and differing type families never match.
impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::String(left), CellValue::String(right)) => left == right,
            (CellValue::Number(left), CellValue::Number(right)) => {
                left == right || (left.is_nan() && right.is_nan())
            }
            (CellValue::Boolean(left), CellValue::Boolean(right)) => left == right,
            (CellValue::DateTime(left, _), CellValue::DateTime(right, _)) => left == right,
            _ => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

/// Human-readable form: strings verbatim, integral numbers without a
/// fraction, booleans as `true`/`false`, dates per their [`DateKind`].
impl Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::String(value) => f.write_str(value),
            CellValue::Number(value) => write!(f, "{}", format_number(*value)),
            CellValue::Boolean(value) => write!(f, "{value}"),
            CellValue::DateTime(value, kind) => write!(f, "{}", value.format(kind.display_pattern())),
        }
    }
}

fn format_number(value: f64) -> String {
    // integers below 2^53 print exactly; larger magnitudes keep f64's own form
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, s).unwrap()
    }

    #[test]
    fn display_forms() {
        assert_eq!(CellValue::from("  EU ").to_string(), "  EU ");
        assert_eq!(CellValue::from(1.0).to_string(), "1");
        assert_eq!(CellValue::from(-42i64).to_string(), "-42");
        assert_eq!(CellValue::from(2.5).to_string(), "2.5");
        assert_eq!(CellValue::from(-0.0).to_string(), "0");
        assert_eq!(CellValue::from(true).to_string(), "true");
        assert_eq!(CellValue::Null.to_string(), "");

        let value = datetime(2024, 1, 31, 8, 30, 0);
        assert_eq!(CellValue::DateTime(value, DateKind::Date).to_string(), "2024-01-31");
        assert_eq!(CellValue::DateTime(value, DateKind::DateTime).to_string(), "2024-01-31 08:30:00");
        assert_eq!(CellValue::DateTime(value, DateKind::Time).to_string(), "08:30:00");
    }

    #[test]
    fn equality_is_per_type_family() {
        assert_eq!(CellValue::from(1.0), CellValue::from(1i64));
        assert_eq!(CellValue::from(0.0), CellValue::from(-0.0));
        assert_eq!(CellValue::from(f64::NAN), CellValue::from(f64::NAN));
        assert_ne!(CellValue::from(1.0), CellValue::from("1"));
        assert_ne!(CellValue::from(1.0), CellValue::from(true));
        assert_ne!(CellValue::from("a"), CellValue::from("A"));
        assert_ne!(CellValue::from("a"), CellValue::from(" a"));

        let value = datetime(2024, 1, 31, 0, 0, 0);
        assert_eq!(
            CellValue::DateTime(value, DateKind::Date),
            CellValue::DateTime(value, DateKind::DateTime)
        );
    }

    #[test]
    fn option_maps_none_to_null() {
        assert!(CellValue::from(None::<&str>).is_null());
        assert_eq!(CellValue::from(Some("x")), CellValue::from("x"));
    }
}
