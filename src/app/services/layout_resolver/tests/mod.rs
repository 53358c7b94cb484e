//! Tests for layout resolution
//!
//! Files are written to temporary directories so the resolver reads real
//! headers, line endings and data rows.

mod units_tests;

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::options::FileOptions;
use crate::app::models::Location;

/// Write `content` to `name` inside `dir`
pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Default options with a configured position, so metadata always resolves
pub fn located_options(path: &Path) -> FileOptions {
    let mut options = FileOptions::new(path);
    options.metadata.location = Location::from_lat_lon(46.83, 9.81, Some(2540.0));
    options
}

/// Hourly ISO timestamps starting 2020-01-01T00:00:00
pub fn hourly_rows(count: usize, value: impl Fn(usize) -> String) -> String {
    (0..count)
        .map(|hour| {
            format!(
                "2020-01-{:02}T{:02}:00:00,{}\n",
                1 + hour / 24,
                hour % 24,
                value(hour)
            )
        })
        .collect()
}
