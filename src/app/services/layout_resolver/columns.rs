//! Column name canonicalization and role lookup
//!
//! Names are canonicalized once (unquoted, trimmed, upper-cased, whitespace
//! runs replaced by `_`) and then looked up in an exact-match table. Names
//! missing from the table are measured fields.

use tracing::warn;

use crate::app::services::row_pipeline::tokenizer::unquote;

/// Meaning of one column of a data file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    Skip,
    /// Date string
    Date,
    /// Time string
    Time,
    /// Date and time string, or decimal date
    CombinedDateTime,
    Year,
    /// Day of year
    JulianDayNumber,
    Month,
    Day,
    /// Integer `HHMM` time
    NumericTimeOfDay,
    Hour,
    Minute,
    Second,
    /// Station id used to filter multi-station files
    StationIdFilter,
    /// Measured field
    Named(String),
}

impl ColumnRole {
    /// Field name when the column carries a measured value
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            _ => None,
        }
    }

    /// Short label used in diagnostics
    pub fn label(&self) -> &str {
        match self {
            Self::Skip => "skip",
            Self::Date => "date",
            Self::Time => "time",
            Self::CombinedDateTime => "timestamp",
            Self::Year => "year",
            Self::JulianDayNumber => "jdn",
            Self::Month => "month",
            Self::Day => "day",
            Self::NumericTimeOfDay => "ntime",
            Self::Hour => "hours",
            Self::Minute => "minutes",
            Self::Second => "seconds",
            Self::StationIdFilter => "station_id",
            Self::Named(name) => name,
        }
    }
}

/// Canonical spelling of a column name
pub fn canonical_column_name(raw: &str) -> String {
    unquote(raw)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase()
}

/// Role of an already canonical column name
pub fn role_for_name(name: &str) -> ColumnRole {
    match name {
        "" | "SKIP" => ColumnRole::Skip,
        "TIMESTAMP" | "TS" | "DATETIME" => ColumnRole::CombinedDateTime,
        "DATE" | "GIORNO" | "FECHA" => ColumnRole::Date,
        "TIME" | "ORA" | "HORA" => ColumnRole::Time,
        "YEAR" => ColumnRole::Year,
        "JDAY" | "JDN" | "YDAY" | "DAY_OF_YEAR" | "DOY" => ColumnRole::JulianDayNumber,
        "MONTH" => ColumnRole::Month,
        "DAY" => ColumnRole::Day,
        "NTIME" => ColumnRole::NumericTimeOfDay,
        "HOUR" | "HOURS" => ColumnRole::Hour,
        "MINUTE" | "MINUTES" => ColumnRole::Minute,
        "SECOND" | "SECONDS" => ColumnRole::Second,
        "ID" | "STATIONID" => ColumnRole::StationIdFilter,
        other => ColumnRole::Named(other.to_string()),
    }
}

/// Roles for every column, with user-skipped columns (1-based) forced to skip
pub fn assign_roles(names: &[String], skip_fields: &[usize]) -> Vec<ColumnRole> {
    let mut roles: Vec<ColumnRole> = names
        .iter()
        .map(|name| role_for_name(&canonical_column_name(name)))
        .collect();

    for &column in skip_fields {
        match column.checked_sub(1).and_then(|index| roles.get_mut(index)) {
            Some(role) => *role = ColumnRole::Skip,
            None => warn!(
                "Ignoring skipped field {} outside the {} declared columns",
                column,
                names.len()
            ),
        }
    }
    roles
}

/// Index of the first column with `role`
pub fn find_role(roles: &[ColumnRole], role: &ColumnRole) -> Option<usize> {
    roles.iter().position(|candidate| candidate == role)
}
