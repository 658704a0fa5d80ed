use crate::error::WorkbookError;
use crate::spreadsheet::options::ErrorCells;
use crate::spreadsheet::reference::index_to_reference;
use crate::table::CellValue;
use crate::table::DateKind;
use chrono::Datelike;
use chrono::Duration;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;

/// Serial number of 10000-01-01, the first day Excel cannot show.
const MAX_SERIAL: f64 = 2_958_466.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Epoch a workbook counts serial dates from.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) enum DateSystem {
    #[default]
    Epoch1900,
    Epoch1904,
}

/// How the raw text of a cell is to be interpreted.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) enum CellType {
    #[default]
    Empty,
    Boolean,
    Number,
    /// Number shown through a date or time format
    SerialDate(DateKind),
    /// ISO 8601 text (`t="d"`)
    IsoDateTime,
    InlineString,
    /// Index into the shared string table
    SharedString,
    Error,
}

impl CellType {
    /// Classifies the built-in number format ids that render dates or times.
    pub(crate) fn parse_builtin_number_format_id(id: &str) -> Option<Self> {
        match id {
            "22" => Some(Self::SerialDate(DateKind::DateTime)),
            "14" | "15" | "16" | "17" => Some(Self::SerialDate(DateKind::Date)),
            "18" | "19" | "20" | "21" | "45" | "46" | "47" => Some(Self::SerialDate(DateKind::Time)),
            _ => None,
        }
    }

    /// Classifies a custom format code by the date and time tokens it uses
    /// outside of quoted literals, escapes and bracketed sections.
    pub(crate) fn parse_custom_number_format(format: &str) -> Self {
        let mut is_escaped = false;
        let mut is_literal = false;
        let mut is_bracket = false;
        let mut is_date = false;
        let mut is_time = false;
        for character in format.chars() {
            match character {
                _ if is_escaped => is_escaped = false,
                '_' | '\\' if !is_literal => is_escaped = true,

                '"' if is_literal => is_literal = false,
                '"' if !is_bracket => is_literal = true,

                ']' if is_bracket => is_bracket = false,
                '[' if !is_literal => is_bracket = true,
                _ if is_literal || is_bracket => (),

                'Y' | 'y' | 'D' | 'd' => is_date = true,
                'H' | 'h' | 'S' | 's' => is_time = true,
                _ => (),
            }
        }

        match (is_date, is_time) {
            (true, true) => Self::SerialDate(DateKind::DateTime),
            (true, false) => Self::SerialDate(DateKind::Date),
            (false, true) => Self::SerialDate(DateKind::Time),
            (false, false) => Self::Number,
        }
    }

    /// Maps the `t` attribute of a `<c>` element; style-driven date detection happens later.
    pub(crate) fn from_type_attribute(t: Option<&str>) -> Self {
        match t {
            Some("s") => Self::SharedString,
            Some("inlineStr") | Some("str") => Self::InlineString,
            Some("b") => Self::Boolean,
            Some("d") => Self::IsoDateTime,
            Some("e") => Self::Error,
            _ => Self::Number,
        }
    }
}

/// One populated cell as found in the sheet XML, before typing.
#[derive(Clone, Debug)]
pub(crate) struct Cell {
    /// Row index (0-based)
    pub(crate) row: usize,
    /// Column index (0-based)
    pub(crate) col: usize,
    pub(crate) kind: CellType,
    /// Raw text of `<v>` or `<is>`
    pub(crate) value: String,
}

impl Cell {
    /// Excel-style reference such as `B7`.
    pub(crate) fn reference(&self) -> String {
        index_to_reference(self.row, self.col)
    }

    /// Interprets the raw text as a typed value.
    pub(crate) fn to_value(
        &self,
        shared_strings: &[String],
        date_system: DateSystem,
        error_cells: ErrorCells,
    ) -> Result<CellValue, WorkbookError> {
        let value = match self.kind {
            CellType::Empty => CellValue::Null,
            CellType::InlineString => CellValue::String(self.value.to_owned()),
            CellType::SharedString => {
                let index = self.value.trim().parse::<usize>()?;
                let string = shared_strings
                    .get(index)
                    .ok_or_else(|| self.invalid("shared string index out of range"))?;
                CellValue::String(string.to_owned())
            }
            CellType::Boolean => match self.value.trim() {
                "1" | "true" | "TRUE" => CellValue::Boolean(true),
                "0" | "false" | "FALSE" => CellValue::Boolean(false),
                _ => Err(self.invalid("not a boolean"))?,
            },
            CellType::Number if self.value.trim().is_empty() => CellValue::Null,
            CellType::Number => CellValue::Number(self.to_double()?),
            CellType::SerialDate(_) if self.value.trim().is_empty() => CellValue::Null,
            CellType::SerialDate(kind) => {
                let datetime = serial_to_datetime(self.to_double()?, date_system)
                    .ok_or_else(|| self.invalid("serial date out of range"))?;
                CellValue::DateTime(datetime, kind)
            }
            CellType::IsoDateTime => {
                let (datetime, kind) = parse_iso_datetime(self.value.trim())
                    .ok_or_else(|| self.invalid("not an ISO 8601 date"))?;
                CellValue::DateTime(datetime, kind)
            }
            CellType::Error => match error_cells {
                ErrorCells::Text => CellValue::String(self.value.to_owned()),
                ErrorCells::Null => CellValue::Null,
                ErrorCells::Reject => Err(WorkbookError::ErrorCell {
                    reference: self.reference(),
                    value: self.value.to_owned(),
                })?,
            },
        };
        Ok(value)
    }

    fn to_double(&self) -> Result<f64, WorkbookError> {
        self.value
            .trim()
            .parse::<f64>()
            .map_err(|_| self.invalid("not a number"))
    }

    fn invalid(&self, message: &str) -> WorkbookError {
        WorkbookError::CellValueError {
            reference: self.reference(),
            value: self.value.to_owned(),
            message: message.to_owned(),
        }
    }
}

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN)
}

/// Converts an Excel serial number to a date-time.
/// Serials below 60 in the 1900 system are shifted by the Lotus 1-2-3 leap-year bug.
pub(crate) fn serial_to_datetime(serial: f64, date_system: DateSystem) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 || serial >= MAX_SERIAL {
        return None;
    }
    let days = serial.trunc() as i64;
    let millis = (serial.fract() * MILLIS_PER_DAY).round() as i64;
    let offset = match date_system {
        DateSystem::Epoch1904 => 1_462,
        DateSystem::Epoch1900 if days < 60 => 1,
        DateSystem::Epoch1900 => 0,
    };
    epoch()
        .checked_add_signed(Duration::days(days + offset))?
        .checked_add_signed(Duration::milliseconds(millis))
}

/// Converts a date-time to a serial number in the 1900 date system.
/// `None` before 1899-12-31 or after 9999-12-31.
pub(crate) fn datetime_to_serial(datetime: &NaiveDateTime) -> Option<f64> {
    if datetime.year() > 9999 {
        return None;
    }
    let delta = datetime.signed_duration_since(epoch());
    let whole_days = delta.num_days();
    if whole_days < 1 {
        return None;
    }
    let millis = (delta - Duration::days(whole_days)).num_milliseconds() as f64;
    let days = if whole_days < 61 { whole_days - 1 } else { whole_days };
    Some(days as f64 + millis / MILLIS_PER_DAY)
}

/// Parses `t="d"` cell text: a date, a date-time or a bare time.
fn parse_iso_datetime(value: &str) -> Option<(NaiveDateTime, DateKind)> {
    let value = value.trim_end_matches('Z');
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        Some((datetime, DateKind::DateTime))
    } else if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Some((date.and_time(NaiveTime::MIN), DateKind::Date))
    } else if let Ok(time) = NaiveTime::parse_from_str(value, "%H:%M:%S%.f") {
        Some((epoch().date().succ_opt()?.and_time(time), DateKind::Time))
    } else {
        None
    }
}
