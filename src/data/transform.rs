//! Column transforms: date-time conversion and time-field extraction
//!
//! Both operations mutate a dataset in place. Callers refresh any
//! column lists afterwards so new or retyped columns become selectable.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use polars::prelude::*;
use std::str::FromStr;

use super::Dataset;
use crate::error::{AppError, Result};

/// Sub-component of a date-time that can be pulled into its own column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeField {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl TimeField {
    pub const ALL: [TimeField; 6] = [
        TimeField::Second,
        TimeField::Minute,
        TimeField::Hour,
        TimeField::Day,
        TimeField::Month,
        TimeField::Year,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TimeField::Second => "second",
            TimeField::Minute => "minute",
            TimeField::Hour => "hour",
            TimeField::Day => "day",
            TimeField::Month => "month",
            TimeField::Year => "year",
        }
    }

    pub fn extract(self, t: &NaiveDateTime) -> i32 {
        match self {
            TimeField::Second => t.second() as i32,
            TimeField::Minute => t.minute() as i32,
            TimeField::Hour => t.hour() as i32,
            TimeField::Day => t.day() as i32,
            TimeField::Month => t.month() as i32,
            TimeField::Year => t.year(),
        }
    }
}

impl FromStr for TimeField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        TimeField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| AppError::UnknownTimeField(s.to_string()))
    }
}

impl std::fmt::Display for TimeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Entries of the data grid's column context menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnAction {
    ToDateTime,
    Extract(TimeField),
}

impl ColumnAction {
    /// Menu entries in display order
    pub fn all() -> impl Iterator<Item = ColumnAction> {
        std::iter::once(ColumnAction::ToDateTime)
            .chain(TimeField::ALL.into_iter().map(ColumnAction::Extract))
    }

    pub fn label(self) -> String {
        match self {
            ColumnAction::ToDateTime => "Column to DateTime".to_string(),
            ColumnAction::Extract(field) => format!("DateTime to {}", field),
        }
    }

    /// Run the action against the selected columns of `dataset`
    pub fn apply(self, dataset: &mut Dataset, selected: &[String]) -> Result<()> {
        let column = require_single_column(selected)?;
        match self {
            ColumnAction::ToDateTime => convert_to_datetime(dataset, column),
            ColumnAction::Extract(field) => extract_time_field(dataset, column, field).map(|_| ()),
        }
    }
}

/// Column actions work on exactly one selected column
pub fn require_single_column(selected: &[String]) -> Result<&str> {
    match selected {
        [column] => Ok(column.as_str()),
        _ => Err(AppError::SelectionCount {
            actual: selected.len(),
        }),
    }
}

/// Name of the column produced by extracting `field` from `column`
pub fn extracted_column_name(column: &str, field: TimeField) -> String {
    format!("{}.{}", column, field)
}

/// Reinterpret a column as date-times, keeping its name
///
/// Temporal columns are normalized to microsecond datetimes. Anything else is
/// read as text and parsed with a format inferred from the first value.
pub fn convert_to_datetime(dataset: &mut Dataset, column: &str) -> Result<()> {
    let series = dataset.column_values(column)?;
    let converted = match series.dtype() {
        DataType::Datetime(_, _) | DataType::Date => {
            series.cast(&DataType::Datetime(TimeUnit::Microseconds, None))?
        }
        _ => {
            let values = dataset.column_as_strings(column)?;
            let micros = parse_datetimes(column, &values)?;
            Series::new(column.into(), &micros)
                .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?
        }
    };
    dataset.put_column(converted)?;
    log::info!("Converted column '{}' to date-time", column);
    Ok(())
}

/// Write `field` of every date-time in `column` into `<column>.<field>`
///
/// Returns the name of the new column. Missing values stay missing.
pub fn extract_time_field(dataset: &mut Dataset, column: &str, field: TimeField) -> Result<String> {
    if !dataset.is_temporal_column(column) {
        // Distinguish a missing column from a wrongly typed one
        dataset.column_values(column)?;
        return Err(AppError::NotTemporal {
            column: column.to_string(),
        });
    }

    let micros = dataset
        .column_values(column)?
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?
        .cast(&DataType::Int64)?;
    let extracted: Vec<Option<i32>> = micros
        .i64()?
        .into_iter()
        .map(|opt| {
            opt.and_then(DateTime::<Utc>::from_timestamp_micros)
                .map(|t| field.extract(&t.naive_utc()))
        })
        .collect();

    let name = extracted_column_name(column, field);
    dataset.put_column(Series::new(name.as_str().into(), &extracted))?;
    log::info!("Extracted {} from '{}' into '{}'", field, column, name);
    Ok(name)
}

/// How a text value is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Rfc3339,
    DateTime(&'static str),
    Date(&'static str),
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%Y%m%d %H%M%S",
    "%b %d, %Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%Y%m%d",
    "%b %d, %Y",
    "%d %b %Y",
];

impl Layout {
    fn parse(self, s: &str) -> Option<NaiveDateTime> {
        match self {
            Layout::Rfc3339 => DateTime::parse_from_rfc3339(s).ok().map(|t| t.naive_utc()),
            Layout::DateTime(format) => NaiveDateTime::parse_from_str(s, format).ok(),
            Layout::Date(format) => NaiveDate::parse_from_str(s, format)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0)),
        }
    }

    fn candidates() -> impl Iterator<Item = Layout> {
        std::iter::once(Layout::Rfc3339)
            .chain(DATETIME_FORMATS.iter().copied().map(Layout::DateTime))
            .chain(DATE_FORMATS.iter().copied().map(Layout::Date))
    }

    fn infer(sample: &str) -> Option<Layout> {
        Layout::candidates().find(|layout| layout.parse(sample).is_some())
    }
}

/// Parse text values into microseconds since the epoch
///
/// The layout is inferred from the first non-empty value; values that do not
/// match it fall back to trying every known layout.
fn parse_datetimes(column: &str, values: &[Option<String>]) -> Result<Vec<Option<i64>>> {
    let mut inferred: Option<Layout> = None;

    values
        .iter()
        .map(|value| {
            let Some(raw) = value.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
                return Ok(None);
            };
            let parsed = inferred
                .and_then(|layout| layout.parse(raw))
                .or_else(|| {
                    let layout = Layout::infer(raw)?;
                    inferred.get_or_insert(layout);
                    layout.parse(raw)
                })
                .ok_or_else(|| AppError::DateTimeParse {
                    column: column.to_string(),
                    value: raw.to_string(),
                })?;
            Ok(Some(parsed.and_utc().timestamp_micros()))
        })
        .collect()
}
