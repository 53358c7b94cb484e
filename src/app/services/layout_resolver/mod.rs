//! Per-file layout resolution
//!
//! Aggregates everything known about a file into one immutable
//! [`LayoutDescriptor`]: declared options, the column-name and units header
//! lines, station metadata, column roles, the date representation and the
//! timestamp order discovered from the first data rows.
//!
//! ## Architecture
//!
//! - [`options`] - Declarations made before the file is opened
//! - [`columns`] - Column name canonicalization and role lookup
//! - [`units`] - Unit recognition and SI conversion factors
//! - [`date_columns`] - Choice of the active date/time representation
//! - [`descriptor`] - The immutable layout consumed by the row pipeline
//! - [`resolver`] - Header scan, consistency checks and order probe
//!
//! ## Usage
//!
//! ```rust,no_run
//! use meteo_csv_ingest::Location;
//! use meteo_csv_ingest::app::services::layout_resolver::{FileOptions, resolve_layout};
//!
//! # fn example() -> meteo_csv_ingest::Result<()> {
//! let mut options = FileOptions::new("data/WFJ2.csv");
//! options.metadata.location = Location::from_lat_lon(46.83, 9.81, Some(2540.0));
//! let layout = resolve_layout(&options)?;
//! println!("{} fields: {:?}", layout.column_count(), layout.field_names());
//! # Ok(())
//! # }
//! ```

pub mod columns;
pub mod date_columns;
pub mod descriptor;
pub mod options;
pub mod resolver;
pub mod units;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use columns::{ColumnRole, assign_roles, canonical_column_name, role_for_name};
pub use date_columns::build_date_representation;
pub use descriptor::{LayoutDescriptor, StationFilter};
pub use options::{DateOptions, FileOptions, parse_delimiter, parse_line_ranges};
pub use resolver::resolve_layout;
pub use units::{UnitConversion, conversion_for_unit, parse_units};
