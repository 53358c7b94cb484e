//! In-memory seek index for repeated range reads
//!
//! While an ascending file is scanned, a [`SeekPoint`] is recorded every
//! few thousand lines. Later reads of the same file start from the latest
//! point before the requested range instead of the first data line.
//!
//! ## Architecture
//!
//! - [`index`] - Per-file sorted seek points and the shared store, keyed by
//!   file and station filter
//!
//! ## Usage
//!
//! ```rust
//! use std::path::Path;
//! use meteo_csv_ingest::app::services::position_index::{PositionIndex, SeekKey, SeekPoint};
//! use chrono::{TimeZone, Utc};
//!
//! let index = PositionIndex::new();
//! let key = SeekKey::file(Path::new("station.csv"));
//! let point = SeekPoint {
//!     timestamp: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
//!     offset: 4096,
//!     line_number: 2001,
//!     wrap_active: false,
//! };
//! index.record(&key, vec![point]);
//!
//! let start = Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap();
//! assert_eq!(index.seek_before(&key, start), Some(point));
//! ```

pub mod index;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use index::{FileIndex, PositionIndex, SeekKey, SeekPoint};
