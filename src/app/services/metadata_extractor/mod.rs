//! Station metadata extraction
//!
//! Station identity and geolocation can come from several places. Each
//! strategy fills a [`MetadataLayer`]; the layers are then merged by priority:
//! explicit configuration, header coordinates, the file name, and finally
//! fallbacks derived from the file name.
//!
//! ## Architecture
//!
//! - [`fields`] - Metadata field types, per-strategy layers and parameter names
//! - [`header`] - `fieldtype:line:column` extraction from header lines
//! - [`filename`] - `{FIELDTYPE}` placeholder matching on file names
//! - [`resolver`] - Priority merge into a [`StationIdentity`](crate::StationIdentity)
//!
//! ## Usage
//!
//! ```rust
//! use std::path::Path;
//! use meteo_csv_ingest::app::services::metadata_extractor::FilenamePattern;
//!
//! # fn example() -> meteo_csv_ingest::Result<()> {
//! let pattern = FilenamePattern::compile("{ID}_{NAME}-{SKIP}_-_{PARAM}")?;
//! let layer = pattern.extract(Path::new("H0118_Generoso-Calmasino_-_Precipitation.csv"))?;
//! assert_eq!(layer.id.as_deref(), Some("H0118"));
//! assert_eq!(layer.param.as_deref(), Some("PSUM"));
//! # Ok(())
//! # }
//! ```

pub mod fields;
pub mod filename;
pub mod header;
pub mod resolver;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use fields::{MetadataField, MetadataLayer, canonical_parameter};
pub use filename::FilenamePattern;
pub use header::{HeaderCoordinate, HeaderMetadataSpec};
pub use resolver::{ResolvedMetadata, resolve_metadata};
