//! Date/time format specification compiler
//!
//! Turns user-facing patterns such as `DD.MM.YYYY HH24:MI:SS` into a list of
//! tagged segments that can be matched against data tokens without any
//! textual placeholder substitution.
//!
//! ## Architecture
//!
//! - [`compiler`] - Pattern tokenization and validation
//! - [`scanner`] - Matching a compiled pattern against an input token
//! - [`timezone`] - Numeric and abbreviated timezone resolution
//!
//! ## Usage
//!
//! ```rust
//! use meteo_csv_ingest::app::services::format_spec::DateTimeFormat;
//!
//! # fn example() -> meteo_csv_ingest::Result<()> {
//! let format = DateTimeFormat::compile("YYYY-MM-DDTHH24:MI:SS")?;
//! let parts = format.scan("2020-01-05T08:30:00").expect("matches");
//! assert_eq!((parts.year, parts.month, parts.day), (2020, 1, 5));
//! # Ok(())
//! # }
//! ```

pub mod compiler;
pub mod scanner;
pub mod timezone;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use compiler::{DateField, DateTimeFormat, Segment};
pub use scanner::DateParts;
pub use timezone::parse_time_zone;
