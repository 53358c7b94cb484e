//! Per-file layout declarations
//!
//! [`FileOptions`] carries everything the user declared about one file
//! before the file itself is read. The ingestor fills it from configuration
//! keys; library users may build it directly.

use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::app::services::date_resolver::{DecimalDateKind, FixedYear};
use crate::app::services::metadata_extractor::MetadataLayer;
use crate::constants::{DEFAULT_COLUMNS_HEADERS, DEFAULT_DELIMITER, DEFAULT_HEADER_LINES};
use crate::{Error, Result};

/// Declared date/time encoding
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateOptions {
    pub decimal_type: Option<DecimalDateKind>,
    pub datetime_spec: Option<String>,
    pub date_spec: Option<String>,
    pub time_spec: Option<String>,
    pub fixed_year: Option<FixedYear>,
}

impl DateOptions {
    /// True when no date/time key was set
    pub fn is_unset(&self) -> bool {
        self.decimal_type.is_none()
            && self.datetime_spec.is_none()
            && self.date_spec.is_none()
            && self.time_spec.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        let has_strings =
            self.datetime_spec.is_some() || self.date_spec.is_some() || self.time_spec.is_some();
        if self.decimal_type.is_some() && has_strings {
            return Err(Error::configuration(
                "It is not possible to define both DECIMALDATE_TYPE and other date/time specifications",
            ));
        }
        if self.datetime_spec.is_some() && (self.date_spec.is_some() || self.time_spec.is_some()) {
            return Err(Error::configuration(
                "It is not possible to define both DATETIME_SPEC and DATE_SPEC or TIME_SPEC",
            ));
        }
        if self.date_spec.is_some() != self.time_spec.is_some() {
            return Err(Error::configuration(
                "Please define both DATE_SPEC and TIME_SPEC",
            ));
        }
        Ok(())
    }
}

/// Everything declared about one station file
#[derive(Debug, Clone, PartialEq)]
pub struct FileOptions {
    pub path: PathBuf,
    /// Positional station number (`STATION<n>`), used for fallback ids
    pub station_index: Option<usize>,
    /// Field delimiter; a space splits on whitespace runs
    pub delimiter: char,
    /// Delimiter of header lines, the field delimiter when unset
    pub header_delimiter: Option<char>,
    pub header_lines: usize,
    /// Header line holding the column names (1-based)
    pub columns_header: Option<usize>,
    /// Header line holding the units (1-based)
    pub units_header: Option<usize>,
    /// Column names declared by the user, overriding the header
    pub fields: Vec<String>,
    /// Columns to ignore (1-based)
    pub skip_fields: Vec<usize>,
    pub comments_marker: Option<char>,
    /// Characters removed from every data line
    pub purge_chars: Vec<char>,
    pub header_repeat_marker: Option<String>,
    /// Value expected in the station id column, the station id when unset
    pub filter_id: Option<String>,
    /// Column receiving the single measured parameter (1-based)
    pub single_param_index: Option<usize>,
    pub units_offset: Vec<f64>,
    pub units_multiplier: Vec<f64>,
    /// Space-separated units, one per column
    pub units: Option<String>,
    pub date: DateOptions,
    /// Space-separated `fieldtype:line:column` declarations
    pub special_headers: Option<String>,
    pub filename_spec: Option<String>,
    /// Metadata declared in configuration
    pub metadata: MetadataLayer,
    /// Physical line ranges never interpreted as data (1-based, inclusive)
    pub exclude_lines: Vec<RangeInclusive<usize>>,
    /// Timezone of the file's timestamps in hours
    pub time_zone: f64,
}

impl FileOptions {
    /// Options with the default layout: comma-delimited, one header line
    /// holding the column names
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            station_index: None,
            delimiter: DEFAULT_DELIMITER,
            header_delimiter: None,
            header_lines: DEFAULT_HEADER_LINES,
            columns_header: Some(DEFAULT_COLUMNS_HEADERS),
            units_header: None,
            fields: Vec::new(),
            skip_fields: Vec::new(),
            comments_marker: None,
            purge_chars: Vec::new(),
            header_repeat_marker: None,
            filter_id: None,
            single_param_index: None,
            units_offset: Vec::new(),
            units_multiplier: Vec::new(),
            units: None,
            date: DateOptions::default(),
            special_headers: None,
            filename_spec: None,
            metadata: MetadataLayer::default(),
            exclude_lines: Vec::new(),
            time_zone: 0.0,
        }
    }

    pub fn header_delimiter(&self) -> char {
        self.header_delimiter.unwrap_or(self.delimiter)
    }

    /// Column-name header line, ignored when beyond the declared header
    pub fn columns_header_line(&self) -> Option<usize> {
        self.columns_header
            .filter(|line| *line > 0 && *line <= self.header_lines)
    }

    /// Units header line, ignored when explicit offsets or multipliers exist
    pub fn units_header_line(&self) -> Option<usize> {
        if !self.units_offset.is_empty() || !self.units_multiplier.is_empty() {
            return None;
        }
        self.units_header
            .filter(|line| *line > 0 && *line <= self.header_lines)
    }

    /// Check declarations that do not depend on the file content
    pub fn validate(&self) -> Result<()> {
        if self.columns_header_line().is_none() && self.fields.is_empty() {
            return Err(Error::configuration(format!(
                "Please provide either COLUMNS_HEADERS (<= NR_HEADERS) or FIELDS for {}",
                self.path.display()
            )));
        }
        if self.skip_fields.contains(&0) {
            return Err(Error::configuration(
                "Wrong format specification for fields to skip: first field is numbered field 1",
            ));
        }
        if self.single_param_index == Some(0) {
            return Err(Error::configuration(
                "SINGLE_PARAM_INDEX counts from 1",
            ));
        }
        if self.units.is_some() && (!self.units_offset.is_empty() || !self.units_multiplier.is_empty())
        {
            return Err(Error::configuration(
                "It is not possible to define both UNITS and UNITS_OFFSET or UNITS_MULTIPLIER",
            ));
        }
        self.date.validate()
    }
}

/// Parse a delimiter declaration: one character, `SPACE` or `TAB`
pub fn parse_delimiter(spec: &str) -> Result<char> {
    let mut chars = spec.chars();
    match (chars.next(), chars.next()) {
        (Some(delimiter), None) => Ok(delimiter),
        _ if spec.eq_ignore_ascii_case("SPACE") || spec.eq_ignore_ascii_case("TAB") => Ok(' '),
        _ => Err(Error::configuration(format!(
            "The delimiter must be a single character or SPACE or TAB, found '{spec}'"
        ))),
    }
}

/// Parse line ranges such as `1-5 12 30-31` (1-based, inclusive)
pub fn parse_line_ranges(spec: &str) -> Result<Vec<RangeInclusive<usize>>> {
    let invalid = |entry: &str| {
        Error::configuration(format!("Invalid line range '{entry}' in '{spec}'"))
    };

    spec.split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (start, end) = entry.split_once('-').unwrap_or((entry, entry));
            let start: usize = start.trim().parse().map_err(|_| invalid(entry))?;
            let end: usize = end.trim().parse().map_err(|_| invalid(entry))?;
            if start == 0 || end < start {
                return Err(invalid(entry));
            }
            Ok(start..=end)
        })
        .collect()
}
