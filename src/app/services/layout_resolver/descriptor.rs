//! Immutable per-file layout

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::columns::ColumnRole;
use super::units::UnitConversion;
use crate::app::models::StationIdentity;
use crate::app::services::date_resolver::DateRepresentation;
use crate::app::services::position_index::SeekKey;
use crate::app::services::row_pipeline::tokenizer::unquote;
use crate::app::services::row_pipeline::{EolStyle, LineFilter};

/// Station-id column of a multi-station file and the id to keep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationFilter {
    pub column: usize,
    pub value: String,
}

impl StationFilter {
    /// Whether a row belongs to the kept station, `false` when too short
    pub fn matches(&self, tokens: &[&str]) -> bool {
        tokens
            .get(self.column)
            .is_some_and(|token| unquote(token) == self.value)
    }
}

/// Everything needed to turn the rows of one file into records
///
/// Built once by [`resolve_layout`](super::resolve_layout) and never
/// modified afterwards, so it can be shared freely between reads.
#[derive(Debug, Clone)]
pub struct LayoutDescriptor {
    pub(crate) path: PathBuf,
    pub(crate) station: Arc<StationIdentity>,
    pub(crate) delimiter: char,
    pub(crate) header_delimiter: char,
    pub(crate) columns_header: Option<usize>,
    pub(crate) units_header: Option<usize>,
    pub(crate) lines: LineFilter,
    pub(crate) roles: Vec<ColumnRole>,
    pub(crate) conversions: Vec<UnitConversion>,
    pub(crate) nodata_markers: Vec<String>,
    pub(crate) date: DateRepresentation,
    pub(crate) time_zone: f64,
    pub(crate) station_filter: Option<StationFilter>,
    pub(crate) ascending: bool,
    pub(crate) eol: EolStyle,
    pub(crate) data_offset: u64,
    pub(crate) data_line: usize,
}

impl LayoutDescriptor {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn station(&self) -> &Arc<StationIdentity> {
        &self.station
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn header_delimiter(&self) -> char {
        self.header_delimiter
    }

    pub fn header_lines(&self) -> usize {
        self.lines.header_lines
    }

    pub fn columns_header(&self) -> Option<usize> {
        self.columns_header
    }

    pub fn units_header(&self) -> Option<usize> {
        self.units_header
    }

    /// Comment, purge, repeat-marker and exclusion rules
    pub fn line_filter(&self) -> &LineFilter {
        &self.lines
    }

    pub fn roles(&self) -> &[ColumnRole] {
        &self.roles
    }

    /// Number of fields every data row must have
    pub fn column_count(&self) -> usize {
        self.roles.len()
    }

    /// Conversion of a column, identity when none was declared
    pub fn conversion(&self, column: usize) -> UnitConversion {
        self.conversions.get(column).copied().unwrap_or_default()
    }

    pub fn nodata_markers(&self) -> &[String] {
        &self.nodata_markers
    }

    pub fn date(&self) -> &DateRepresentation {
        &self.date
    }

    /// Timezone of the file's timestamps in hours
    pub fn time_zone(&self) -> f64 {
        self.time_zone
    }

    pub fn station_filter(&self) -> Option<&StationFilter> {
        self.station_filter.as_ref()
    }

    /// Position index entry of the rows this layout reads
    pub fn seek_key(&self) -> SeekKey {
        match &self.station_filter {
            Some(filter) => SeekKey::station(&self.path, &filter.value),
            None => SeekKey::file(&self.path),
        }
    }

    /// Whether timestamps grow along the file
    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    pub fn eol(&self) -> EolStyle {
        self.eol
    }

    /// Byte offset of the first line after the header
    pub fn data_offset(&self) -> u64 {
        self.data_offset
    }

    /// Physical number of the last header line
    pub fn data_line(&self) -> usize {
        self.data_line
    }

    /// Measured fields with their column index, in column order
    pub fn value_columns(&self) -> impl Iterator<Item = (usize, &str)> {
        self.roles
            .iter()
            .enumerate()
            .filter_map(|(column, role)| role.field_name().map(|name| (column, name)))
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.value_columns().map(|(_, name)| name).collect()
    }
}
