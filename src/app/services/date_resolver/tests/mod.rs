//! Tests for timestamp reconstruction

mod resolver_tests;

use chrono::{TimeZone, Utc};

use crate::app::models::Timestamp;

/// Build a UTC instant
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Timestamp {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
        .unwrap()
}
