//! Row-level timestamp resolution
//!
//! The resolver is created once per read. Its only mutable state is the
//! fallback-year wrap flag: once a day before October has been seen, every
//! following row is assigned to the configured year itself.

use chrono::NaiveDate;

use super::calendar;
use super::representation::{
    ComponentColumns, DateRepresentation, DayChannel, FixedYear, TimeChannel,
};
use crate::app::models::Timestamp;
use crate::app::services::format_spec::{DateParts, parse_time_zone};
use crate::constants::{AUTO_WRAP_DAY_OF_YEAR, AUTO_WRAP_MONTH};

/// Applies a file's [`DateRepresentation`] to tokenized rows
#[derive(Debug, Clone)]
pub struct DateResolver<'a> {
    representation: &'a DateRepresentation,
    time_zone: f64,
    wrap_active: bool,
}

impl<'a> DateResolver<'a> {
    /// Create a resolver starting at the top of a file
    pub fn new(representation: &'a DateRepresentation, time_zone: f64) -> Self {
        let wrap_active = representation
            .fixed_year()
            .is_some_and(|fixed| fixed.auto_wrap);
        Self {
            representation,
            time_zone,
            wrap_active,
        }
    }

    /// Create a resolver continuing from a recorded wrap state
    pub fn resume(representation: &'a DateRepresentation, time_zone: f64, wrap_active: bool) -> Self {
        Self {
            representation,
            time_zone,
            wrap_active,
        }
    }

    /// Whether rows are still assigned to the year before the fixed year
    pub fn wrap_active(&self) -> bool {
        self.wrap_active
    }

    /// Resolve the timestamp of a row, `None` when any date token is invalid
    pub fn resolve(&mut self, tokens: &[&str]) -> Option<Timestamp> {
        match self.representation {
            DateRepresentation::Decimal { column, kind } => {
                calendar::from_decimal(tokens.get(*column)?, *kind, self.time_zone)
            }
            DateRepresentation::Combined { column, format } => {
                let parts = format.scan(tokens.get(*column)?)?;
                calendar::from_parts(&parts, self.time_zone)
            }
            DateRepresentation::Separate {
                date_column,
                date_format,
                time_column,
                time_format,
            } => {
                let mut parts = date_format.scan(tokens.get(*date_column)?)?;
                time_format.scan_into(tokens.get(*time_column)?, &mut parts)?;
                calendar::from_parts(&parts, self.time_zone)
            }
            DateRepresentation::Components(components) => self.resolve_components(components, tokens),
        }
    }

    fn resolve_components(
        &mut self,
        components: &ComponentColumns,
        tokens: &[&str],
    ) -> Option<Timestamp> {
        let (time_of_day, time_zone) = self.time_of_day(&components.time, tokens)?;

        match components.day {
            DayChannel::DayOfYear(column) => {
                // Fractional days are only meaningful next to a time string
                let day: f64 = match components.time {
                    TimeChannel::String { .. } => parse_number(tokens.get(column)?)?,
                    _ => f64::from(parse_integer(tokens.get(column)?)?),
                };
                let year = self.year(components, tokens, day < AUTO_WRAP_DAY_OF_YEAR)?;
                let (date, day_fraction) = calendar::day_of_year(year, day)?;
                calendar::assemble(date, day_fraction + time_of_day, time_zone)
            }
            DayChannel::MonthDay { month, day } => {
                let month = u32::try_from(parse_integer(tokens.get(month)?)?).ok()?;
                let day = u32::try_from(parse_integer(tokens.get(day)?)?).ok()?;
                let year = self.year(components, tokens, month < AUTO_WRAP_MONTH)?;
                let date = NaiveDate::from_ymd_opt(year, month, day)?;
                calendar::assemble(date, time_of_day, time_zone)
            }
        }
    }

    /// Year column value, or the fixed year when the column is absent or 0
    fn year(&mut self, components: &ComponentColumns, tokens: &[&str], before_wrap: bool) -> Option<i32> {
        let from_column = match components.year.column {
            Some(column) => parse_integer(tokens.get(column)?)?,
            None => 0,
        };
        if from_column != 0 {
            return Some(from_column);
        }
        match components.year.fixed {
            Some(fixed) => Some(self.fixed_year(fixed, before_wrap)),
            None if components.year.column.is_some() => Some(0),
            None => None,
        }
    }

    fn fixed_year(&mut self, fixed: FixedYear, before_wrap: bool) -> i32 {
        if before_wrap {
            self.wrap_active = false;
        }
        if self.wrap_active {
            fixed.year - 1
        } else {
            fixed.year
        }
    }

    /// Seconds since midnight and the timezone applying to the row
    fn time_of_day(&self, channel: &TimeChannel, tokens: &[&str]) -> Option<(f64, f64)> {
        match channel {
            TimeChannel::String { column, format } => {
                let mut parts = DateParts::default();
                format.scan_into(tokens.get(*column)?, &mut parts)?;
                let time_zone = match &parts.time_zone {
                    Some(token) => parse_time_zone(token)?,
                    None => self.time_zone,
                };
                let seconds = calendar::clock_seconds(parts.hour, parts.minute, parts.second)?;
                Some((seconds, time_zone))
            }
            TimeChannel::Numeric(column) => {
                let value = u32::try_from(parse_integer(tokens.get(*column)?)?).ok()?;
                let seconds = calendar::clock_seconds(value / 100, value % 100, 0.0)?;
                Some((seconds, self.time_zone))
            }
            TimeChannel::Split {
                hours,
                minutes,
                seconds,
            } => {
                let hour = u32::try_from(parse_integer(tokens.get(*hours)?)?).ok()?;
                let minute = match minutes {
                    Some(column) => u32::try_from(parse_integer(tokens.get(*column)?)?).ok()?,
                    None => 0,
                };
                let second = match seconds {
                    Some(column) => parse_number(tokens.get(*column)?)?,
                    None => 0.0,
                };
                Some((calendar::clock_seconds(hour, minute, second)?, self.time_zone))
            }
        }
    }
}

fn parse_integer(token: &str) -> Option<i32> {
    token.trim().parse().ok()
}

fn parse_number(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}
