//! Selection of the active date/time representation from column roles

use super::columns::{ColumnRole, find_role};
use super::options::DateOptions;
use crate::app::services::date_resolver::{
    ComponentColumns, DateRepresentation, DayChannel, TimeChannel, YearSource,
};
use crate::app::services::format_spec::DateTimeFormat;
use crate::constants::{DEFAULT_DATE_SPEC, DEFAULT_DATETIME_SPEC, DEFAULT_TIME_SPEC};
use crate::{Error, Result};

/// Build the date representation of a file
///
/// A combined column wins, then a date+time column pair, then complete
/// numeric components. Anything else is a configuration error.
pub fn build_date_representation(
    roles: &[ColumnRole],
    options: &DateOptions,
) -> Result<DateRepresentation> {
    let find = |role: ColumnRole| find_role(roles, &role);

    if let Some(column) = find(ColumnRole::CombinedDateTime) {
        if let Some(kind) = options.decimal_type {
            return Ok(DateRepresentation::Decimal { column, kind });
        }
        let pattern = options
            .datetime_spec
            .as_deref()
            .unwrap_or(DEFAULT_DATETIME_SPEC);
        return Ok(DateRepresentation::Combined {
            column,
            format: DateTimeFormat::compile(pattern)?,
        });
    }

    if options.decimal_type.is_some() {
        return Err(Error::configuration(
            "A decimal date type was declared but no TIMESTAMP column was found",
        ));
    }

    if let (Some(date_column), Some(time_column)) = (find(ColumnRole::Date), find(ColumnRole::Time)) {
        let date_pattern = options.date_spec.as_deref().unwrap_or(DEFAULT_DATE_SPEC);
        let time_pattern = options.time_spec.as_deref().unwrap_or(DEFAULT_TIME_SPEC);
        return Ok(DateRepresentation::Separate {
            date_column,
            date_format: DateTimeFormat::compile(date_pattern)?,
            time_column,
            time_format: DateTimeFormat::compile_time(time_pattern)?,
        });
    }

    match components(roles, options) {
        Some(components) => Ok(DateRepresentation::Components(components?)),
        None => {
            let identified: Vec<&str> = roles
                .iter()
                .filter(|role| role.field_name().is_none() && **role != ColumnRole::Skip)
                .map(ColumnRole::label)
                .collect();
            Err(Error::configuration(format!(
                "Please define how to parse the date and time information (as strings, decimal or components). Identified fields: [{}]",
                identified.join(", ")
            )))
        }
    }
}

/// Complete numeric components, `None` when a channel is missing
fn components(
    roles: &[ColumnRole],
    options: &DateOptions,
) -> Option<Result<ComponentColumns>> {
    let find = |role: ColumnRole| find_role(roles, &role);

    let year = YearSource {
        column: find(ColumnRole::Year),
        fixed: options.fixed_year,
    };
    if !year.is_defined() {
        return None;
    }

    let day = match (
        find(ColumnRole::JulianDayNumber),
        find(ColumnRole::Month),
        find(ColumnRole::Day),
    ) {
        (Some(column), _, _) => DayChannel::DayOfYear(column),
        (None, Some(month), Some(day)) => DayChannel::MonthDay { month, day },
        _ => return None,
    };

    let time = if let Some(column) = find(ColumnRole::Time) {
        let pattern = options.time_spec.as_deref().unwrap_or(DEFAULT_TIME_SPEC);
        match DateTimeFormat::compile_time(pattern) {
            Ok(format) => TimeChannel::String { column, format },
            Err(e) => return Some(Err(e)),
        }
    } else if let Some(column) = find(ColumnRole::NumericTimeOfDay) {
        TimeChannel::Numeric(column)
    } else if let Some(hours) = find(ColumnRole::Hour) {
        TimeChannel::Split {
            hours,
            minutes: find(ColumnRole::Minute),
            seconds: find(ColumnRole::Second),
        }
    } else {
        return None;
    };

    Some(Ok(ComponentColumns { year, day, time }))
}
