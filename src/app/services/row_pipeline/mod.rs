//! Row pipeline turning data lines into records
//!
//! Given a [`LayoutDescriptor`](crate::app::services::layout_resolver::LayoutDescriptor),
//! the pipeline streams a file line by line: end-of-line handling, line
//! exclusion, comment and quote stripping, header-repeat skipping,
//! tokenizing, station filtering, column count check, timestamp resolution,
//! nodata detection and unit conversion.
//!
//! ## Architecture
//!
//! - [`reader`] - End-of-line detection and offset-tracking line reader
//! - [`tokenizer`] - Line cleaning, field splitting and unquoting
//! - [`source`] - Filtered iterator over the data lines of a file
//! - [`policy`] - Row-level error policy
//! - [`stats`] - Read statistics and result structures
//! - [`pipeline`] - The per-file read loop
//!
//! ## Usage
//!
//! ```rust,no_run
//! use meteo_csv_ingest::app::models::DateRange;
//! use meteo_csv_ingest::app::services::layout_resolver::{FileOptions, resolve_layout};
//! use meteo_csv_ingest::app::services::row_pipeline::{ErrorPolicy, read_file};
//! use meteo_csv_ingest::{Location, PositionIndex};
//!
//! # fn example() -> meteo_csv_ingest::Result<()> {
//! let mut options = FileOptions::new("data/WFJ2.csv");
//! options.metadata.location = Location::from_lat_lon(46.83, 9.81, Some(2540.0));
//! let layout = resolve_layout(&options)?;
//!
//! let index = PositionIndex::new();
//! let result = read_file(&layout, &index, DateRange::all(), ErrorPolicy::strict())?;
//! println!("{} records, {:.1}% parsed", result.records.len(), result.stats.success_rate());
//! # Ok(())
//! # }
//! ```

pub mod pipeline;
pub mod policy;
pub mod reader;
pub mod source;
pub mod stats;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use pipeline::read_file;
pub use policy::ErrorPolicy;
pub use reader::{EolStyle, LineReader, detect_eol};
pub use source::{DataLine, LineFilter, RowSource};
pub use stats::{ParseResult, ParseStats};
