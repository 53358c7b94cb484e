//! Meteo CSV Ingest Library
//!
//! A Rust library for turning arbitrary delimited meteorological time-series
//! files into canonical, timestamped station records.
//!
//! This library provides tools for:
//! - Compiling date/time patterns such as `DD.MM.YYYY HH24:MI:SS`
//! - Resolving station metadata from configuration, file headers and file names
//! - Building an immutable per-file layout descriptor (delimiters, column roles, units)
//! - Reconstructing timestamps from strings, decimal day counts or split components
//! - Streaming rows with nodata detection, unit conversion and error policies
//! - Seeking into already-scanned files through a shared position index

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod date_resolver;
        pub mod format_spec;
        pub mod ingestor;
        pub mod layout_resolver;
        pub mod metadata_extractor;
        pub mod position_index;
        pub mod row_pipeline;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Location, Record, StationIdentity, Timestamp};
pub use app::services::ingestor::CsvIngestor;
pub use app::services::position_index::PositionIndex;
pub use config::{ConfigStore, KeyValueConfig};

/// Result type alias for the ingestion engine
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for layout resolution and row ingestion
///
/// The first four variants are configuration-time errors and always abort the
/// setup of a file. The last three are row-level and go through the
/// [`ErrorPolicy`](app::services::row_pipeline::ErrorPolicy) of the read.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed layout declaration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Station identity or geolocation could not be resolved
    #[error("Metadata extraction failed for '{file}': {message}")]
    MetadataExtractionFailed { file: String, message: String },

    /// Malformed date/time pattern
    #[error("Invalid date/time format specification '{spec}': {message}")]
    InvalidFormatSpec { spec: String, message: String },

    /// Row does not have the declared number of columns
    #[error(
        "File '{file}' declares {expected} columns but line {line} has {found} fields: '{content}'"
    )]
    FieldCountMismatch {
        file: String,
        line: usize,
        expected: usize,
        found: usize,
        content: String,
    },

    /// Timestamp could not be reconstructed from a row
    #[error("Date or time could not be read in file '{file}' at line {line}: '{content}'")]
    DateParse {
        file: String,
        line: usize,
        content: String,
    },

    /// Measurement token is not a number
    #[error("Could not parse field '{value}' ({field}) in file '{file}' at line {line}")]
    ValueParse {
        file: String,
        line: usize,
        field: String,
        value: String,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a metadata extraction error
    pub fn metadata(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MetadataExtractionFailed {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create an invalid format specification error
    pub fn invalid_format_spec(spec: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFormatSpec {
            spec: spec.into(),
            message: message.into(),
        }
    }

    /// Create a field count mismatch error
    pub fn field_count_mismatch(
        file: impl Into<String>,
        line: usize,
        expected: usize,
        found: usize,
        content: impl Into<String>,
    ) -> Self {
        Self::FieldCountMismatch {
            file: file.into(),
            line,
            expected,
            found,
            content: content.into(),
        }
    }

    /// Create a date parsing error
    pub fn date_parse(file: impl Into<String>, line: usize, content: impl Into<String>) -> Self {
        Self::DateParse {
            file: file.into(),
            line,
            content: content.into(),
        }
    }

    /// Create a value parsing error
    pub fn value_parse(
        file: impl Into<String>,
        line: usize,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::ValueParse {
            file: file.into(),
            line,
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether this error was raised while reading data rows
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            Self::FieldCountMismatch { .. } | Self::DateParse { .. } | Self::ValueParse { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
