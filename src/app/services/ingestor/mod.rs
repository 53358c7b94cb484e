//! Configuration-driven ingestion of several station files
//!
//! Reads the `Input` section of a [`ConfigStore`](crate::config::ConfigStore),
//! builds the [`FileOptions`](crate::app::services::layout_resolver::FileOptions)
//! of every `STATION<n>` file, resolves their layouts and serves range reads.
//!
//! ## Architecture
//!
//! - [`station_options`] - `CSV_*` / `CSV<n>_*` keys to per-file options
//! - [`csv_ingestor`] - Layout set, shared position index and range reads
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::{TimeZone, Utc};
//! use meteo_csv_ingest::{CsvIngestor, KeyValueConfig};
//!
//! # fn example() -> meteo_csv_ingest::Result<()> {
//! let config = KeyValueConfig::new()
//!     .with("Input", "METEOPATH", "./data")
//!     .with("Input", "STATION1", "WFJ2.csv")
//!     .with("Input", "POSITION1", "latlon (46.83, 9.81, 2540)");
//! let ingestor = CsvIngestor::from_config(&config)?;
//!
//! let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
//! let end = Utc.with_ymd_and_hms(2020, 1, 31, 23, 0, 0).unwrap();
//! for records in ingestor.read_range(start, end)? {
//!     println!("{} records", records.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod csv_ingestor;
pub mod station_options;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use csv_ingestor::CsvIngestor;
pub use station_options::station_options;
