//! Per-file description of the date/time columns

use std::fmt;
use std::str::FromStr;

use crate::app::services::format_spec::DateTimeFormat;
use crate::{Error, Result};

/// Numeric date conventions supported for a single decimal column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecimalDateKind {
    /// Spreadsheet serial day (1900 date system)
    Excel,
    /// Julian date
    Julian,
    /// Modified julian date
    ModifiedJulian,
    /// Matlab datenum
    Matlab,
    /// Days since 1900-01-01
    Rfc868,
    /// Integer seconds since 1970-01-01 UTC
    Unix,
}

impl FromStr for DecimalDateKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_uppercase().as_str() {
            "EXCEL" => Ok(Self::Excel),
            "JULIAN" => Ok(Self::Julian),
            "MJULIAN" => Ok(Self::ModifiedJulian),
            "MATLAB" => Ok(Self::Matlab),
            "RFC868" => Ok(Self::Rfc868),
            "UNIX" => Ok(Self::Unix),
            other => Err(Error::configuration(format!(
                "Unknown decimal date type '{other}'"
            ))),
        }
    }
}

impl fmt::Display for DecimalDateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Excel => "EXCEL",
            Self::Julian => "JULIAN",
            Self::ModifiedJulian => "MJULIAN",
            Self::Matlab => "MATLAB",
            Self::Rfc868 => "RFC868",
            Self::Unix => "UNIX",
        };
        f.write_str(name)
    }
}

/// Constant year used when a file has no year column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedYear {
    pub year: i32,
    /// Assign rows to the previous year until a day before October is seen
    pub auto_wrap: bool,
}

/// Where the year of a component-based timestamp comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSource {
    pub column: Option<usize>,
    pub fixed: Option<FixedYear>,
}

impl YearSource {
    pub fn is_defined(&self) -> bool {
        self.column.is_some() || self.fixed.is_some()
    }
}

/// Day within the year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayChannel {
    /// Day of year starting at 1
    DayOfYear(usize),
    MonthDay { month: usize, day: usize },
}

/// Time of day
#[derive(Debug, Clone, PartialEq)]
pub enum TimeChannel {
    /// Time string matched against a time pattern
    String { column: usize, format: DateTimeFormat },
    /// Integer `HMM` / `HHMM`
    Numeric(usize),
    /// Separate hour, minute and second columns
    Split {
        hours: usize,
        minutes: Option<usize>,
        seconds: Option<usize>,
    },
}

/// Timestamp assembled from individual numeric columns
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentColumns {
    pub year: YearSource,
    pub day: DayChannel,
    pub time: TimeChannel,
}

/// The active date/time encoding of a file
#[derive(Debug, Clone, PartialEq)]
pub enum DateRepresentation {
    /// One numeric column following a decimal convention
    Decimal { column: usize, kind: DecimalDateKind },
    /// One column holding both date and time
    Combined { column: usize, format: DateTimeFormat },
    /// A date column and a time column
    Separate {
        date_column: usize,
        date_format: DateTimeFormat,
        time_column: usize,
        time_format: DateTimeFormat,
    },
    /// Split numeric components
    Components(ComponentColumns),
}

impl DateRepresentation {
    /// Every column index read by this representation
    pub fn columns(&self) -> Vec<usize> {
        match self {
            Self::Decimal { column, .. } | Self::Combined { column, .. } => vec![*column],
            Self::Separate {
                date_column,
                time_column,
                ..
            } => vec![*date_column, *time_column],
            Self::Components(components) => {
                let mut columns: Vec<usize> = components.year.column.into_iter().collect();
                match components.day {
                    DayChannel::DayOfYear(column) => columns.push(column),
                    DayChannel::MonthDay { month, day } => columns.extend([month, day]),
                }
                match &components.time {
                    TimeChannel::String { column, .. } | TimeChannel::Numeric(column) => {
                        columns.push(*column)
                    }
                    TimeChannel::Split {
                        hours,
                        minutes,
                        seconds,
                    } => {
                        columns.push(*hours);
                        columns.extend(minutes.iter().chain(seconds.iter()).copied());
                    }
                }
                columns
            }
        }
    }

    /// Highest column index read by this representation
    pub fn max_column(&self) -> usize {
        self.columns().into_iter().max().unwrap_or(0)
    }

    /// Fixed year configuration, if the year is not read from a column only
    pub fn fixed_year(&self) -> Option<FixedYear> {
        match self {
            Self::Components(components) => components.year.fixed,
            _ => None,
        }
    }

    /// Short name used in diagnostics
    pub fn describe(&self) -> String {
        match self {
            Self::Decimal { column, kind } => format!("decimal {kind} date in column {}", column + 1),
            Self::Combined { column, format } => {
                format!("date/time '{}' in column {}", format.pattern(), column + 1)
            }
            Self::Separate {
                date_column,
                date_format,
                time_column,
                time_format,
            } => format!(
                "date '{}' in column {} and time '{}' in column {}",
                date_format.pattern(),
                date_column + 1,
                time_format.pattern(),
                time_column + 1
            ),
            Self::Components(_) => "date/time components".to_string(),
        }
    }
}
