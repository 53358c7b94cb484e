//! Tests for configuration-driven ingestion

mod station_options_tests;

use std::fs;
use std::path::Path;

use chrono::{Duration, TimeZone, Utc};
use tempfile::TempDir;

use crate::app::models::Timestamp;
use crate::config::KeyValueConfig;

/// Write `content` to `name` inside `dir`
pub fn write_file(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).unwrap();
}

/// Minimal configuration reading from `meteopath`
pub fn base_config(meteopath: &Path) -> KeyValueConfig {
    KeyValueConfig::new()
        .with("Input", "METEOPATH", meteopath.display().to_string())
        .with("Input", "POSITION", "latlon (46.83, 9.81, 2540)")
}

/// Timestamp of the `hour`-th hourly row starting 2020-01-01T00:00:00Z
pub fn hour(hour: i64) -> Timestamp {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hour)
}

/// Hourly `TIMESTAMP,TA` rows with TA equal to the row number
pub fn hourly_file(rows: i64) -> String {
    let mut content = String::from("TIMESTAMP,TA\n");
    for row in 0..rows {
        content.push_str(&format!("{},{}\n", hour(row).format("%Y-%m-%dT%H:%M:%S"), row));
    }
    content
}
