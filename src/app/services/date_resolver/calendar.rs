//! Validated construction of UTC instants
//!
//! Every helper returns `None` for out-of-range input instead of panicking,
//! so the row pipeline can treat a bad timestamp like any other bad token.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::representation::DecimalDateKind;
use crate::app::models::Timestamp;
use crate::app::services::format_spec::{DateParts, parse_time_zone};
use crate::constants::{
    EXCEL_DATE_UNIX_EPOCH, JULIAN_DATE_UNIX_EPOCH, MATLAB_DATE_UNIX_EPOCH, MODIFIED_JULIAN_OFFSET,
    RFC868_DATE_UNIX_EPOCH, SECONDS_PER_DAY,
};

/// Largest offset accepted from a decimal date, about 30000 years
const MAX_OFFSET_SECONDS: f64 = 1.0e12;

/// Convert fractional seconds into a millisecond-precision duration
pub fn duration_from_seconds(seconds: f64) -> Option<Duration> {
    if !seconds.is_finite() || seconds.abs() > MAX_OFFSET_SECONDS {
        return None;
    }
    Some(Duration::milliseconds((seconds * 1000.0).round() as i64))
}

/// Seconds since midnight for a validated clock reading
///
/// `24:00:00` is accepted and means midnight of the following day.
pub fn clock_seconds(hour: u32, minute: u32, second: f64) -> Option<f64> {
    if minute >= 60 || !(0.0..60.0).contains(&second) {
        return None;
    }
    if hour > 24 || (hour == 24 && (minute != 0 || second != 0.0)) {
        return None;
    }
    Some(f64::from(hour) * 3600.0 + f64::from(minute) * 60.0 + second)
}

/// Assemble a local calendar day plus seconds into a UTC instant
pub fn assemble(date: NaiveDate, seconds: f64, time_zone: f64) -> Option<Timestamp> {
    let midnight = date.and_hms_opt(0, 0, 0)?.and_utc();
    let local_offset = duration_from_seconds(seconds - time_zone * 3600.0)?;
    midnight.checked_add_signed(local_offset)
}

/// Resolve parts scanned from a combined or date+time pattern
///
/// A timezone token carried by the parts overrides `default_time_zone`.
pub fn from_parts(parts: &DateParts, default_time_zone: f64) -> Option<Timestamp> {
    let time_zone = match &parts.time_zone {
        Some(token) => parse_time_zone(token)?,
        None => default_time_zone,
    };
    let date = NaiveDate::from_ymd_opt(parts.year, parts.month, parts.day)?;
    let seconds = clock_seconds(parts.hour, parts.minute, parts.second)?;
    assemble(date, seconds, time_zone)
}

/// First day of `year` shifted by a (possibly fractional) day of year
///
/// Returns the calendar day and the seconds carried by the fraction.
pub fn day_of_year(year: i32, day_of_year: f64) -> Option<(NaiveDate, f64)> {
    if !day_of_year.is_finite() || day_of_year < 1.0 {
        return None;
    }
    let whole = day_of_year.floor();
    let date = NaiveDate::from_yo_opt(year, whole as u32)?;
    Some((date, (day_of_year - whole) * SECONDS_PER_DAY))
}

/// Resolve a decimal date token
///
/// Unix times are integer seconds and always UTC; every other convention is
/// a fractional day count expressed in `time_zone`.
pub fn from_decimal(token: &str, kind: DecimalDateKind, time_zone: f64) -> Option<Timestamp> {
    let token = token.trim();
    let epoch = match kind {
        DecimalDateKind::Unix => {
            let seconds: i64 = token.parse().ok()?;
            return DateTime::from_timestamp(seconds, 0);
        }
        DecimalDateKind::Excel => EXCEL_DATE_UNIX_EPOCH,
        DecimalDateKind::Julian => JULIAN_DATE_UNIX_EPOCH,
        DecimalDateKind::ModifiedJulian => JULIAN_DATE_UNIX_EPOCH - MODIFIED_JULIAN_OFFSET,
        DecimalDateKind::Matlab => MATLAB_DATE_UNIX_EPOCH,
        DecimalDateKind::Rfc868 => RFC868_DATE_UNIX_EPOCH,
    };

    let value: f64 = token.parse().ok()?;
    let offset = duration_from_seconds((value - epoch) * SECONDS_PER_DAY - time_zone * 3600.0)?;
    DateTime::<Utc>::from_timestamp(0, 0)?.checked_add_signed(offset)
}
