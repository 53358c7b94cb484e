//! Tests for the row pipeline

mod reader_tests;

use std::fs;
use std::path::PathBuf;

use chrono::{Duration, TimeZone, Utc};
use tempfile::TempDir;

use crate::app::models::{Location, Timestamp};
use crate::app::services::layout_resolver::{FileOptions, LayoutDescriptor, resolve_layout};

/// Write `content` to `name` inside `dir`
pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Resolve the layout of a file after adjusting its default options
pub fn layout_for(path: &PathBuf, configure: impl FnOnce(&mut FileOptions)) -> LayoutDescriptor {
    let mut options = FileOptions::new(path);
    options.metadata.location = Location::from_lat_lon(46.83, 9.81, Some(2540.0));
    configure(&mut options);
    resolve_layout(&options).unwrap()
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
