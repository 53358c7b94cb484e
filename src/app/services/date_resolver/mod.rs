//! Timestamp reconstruction from tokenized data rows
//!
//! A file encodes its timestamps in one of four shapes: a single combined
//! string, separate date and time strings, a decimal day count, or split
//! numeric components. The layout resolver picks the shape once per file as a
//! [`DateRepresentation`]; the [`DateResolver`] applies it to every row.
//!
//! ## Architecture
//!
//! - [`representation`] - The per-file description of where date parts live
//! - [`calendar`] - Validated construction of UTC instants from raw parts
//! - [`resolver`] - Row-level dispatch and fallback-year wrapping state

pub mod calendar;
pub mod representation;
pub mod resolver;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use representation::{
    ComponentColumns, DateRepresentation, DayChannel, DecimalDateKind, FixedYear, TimeChannel,
    YearSource,
};
pub use resolver::DateResolver;
