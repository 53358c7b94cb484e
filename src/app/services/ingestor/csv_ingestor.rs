//! Multi-station ingestion over one shared position index

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use super::station_options::station_options;
use crate::app::models::{DateRange, Record, StationIdentity, Timestamp};
use crate::app::services::layout_resolver::{FileOptions, LayoutDescriptor, resolve_layout};
use crate::app::services::position_index::PositionIndex;
use crate::app::services::row_pipeline::{ErrorPolicy, ParseResult, read_file};
use crate::config::ConfigStore;
use crate::constants::{
    ERRORS_TO_NODATA_KEY, INPUT_SECTION, METEOPATH_KEY, SILENT_ERRORS_KEY, STATION_KEY_PREFIX,
    TIME_ZONE_KEY,
};
use crate::{Error, Result};

/// Configured set of station files
///
/// Layouts are resolved once at construction. Every read goes through the
/// shared [`PositionIndex`], so repeated range reads of the same files skip
/// the rows already scanned.
#[derive(Debug)]
pub struct CsvIngestor {
    meteopath: PathBuf,
    policy: ErrorPolicy,
    layouts: Vec<LayoutDescriptor>,
    index: Arc<PositionIndex>,
}

impl CsvIngestor {
    /// Resolve every `STATION<n>` file declared in the `Input` section
    pub fn from_config<C: ConfigStore>(config: &C) -> Result<Self> {
        let meteopath: PathBuf = config
            .require::<String>(INPUT_SECTION, METEOPATH_KEY)?
            .into();
        let time_zone = config.get_or(INPUT_SECTION, TIME_ZONE_KEY, 0.0)?;
        let policy = ErrorPolicy {
            silent_errors: config.get_or(INPUT_SECTION, SILENT_ERRORS_KEY, false)?,
            errors_to_nodata: config.get_or(INPUT_SECTION, ERRORS_TO_NODATA_KEY, false)?,
        };

        let stations = station_files(config)?;
        info!(
            "Configuring {} stations from {}",
            stations.len(),
            meteopath.display()
        );

        let options = stations
            .iter()
            .map(|(station, file)| station_options(config, &meteopath, station, file, time_zone))
            .collect::<Result<Vec<_>>>()?;

        let mut ingestor = Self::from_options(&options, policy)?;
        ingestor.meteopath = meteopath;
        Ok(ingestor)
    }

    /// Resolve explicitly built file options
    pub fn from_options(options: &[FileOptions], policy: ErrorPolicy) -> Result<Self> {
        let layouts = options
            .iter()
            .map(resolve_layout)
            .collect::<Result<Vec<_>>>()?;

        let meteopath = options
            .first()
            .and_then(|first| first.path.parent())
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(Self {
            meteopath,
            policy,
            layouts,
            index: Arc::new(PositionIndex::new()),
        })
    }

    /// Share an existing position index
    pub fn with_index(mut self, index: Arc<PositionIndex>) -> Self {
        self.index = index;
        self
    }

    pub fn meteopath(&self) -> &Path {
        &self.meteopath
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    pub fn index(&self) -> &Arc<PositionIndex> {
        &self.index
    }

    pub fn layouts(&self) -> &[LayoutDescriptor] {
        &self.layouts
    }

    pub fn station_count(&self) -> usize {
        self.layouts.len()
    }

    /// Identity of every configured station, in configuration order
    pub fn read_stations(&self) -> Vec<Arc<StationIdentity>> {
        self.layouts
            .iter()
            .map(|layout| layout.station().clone())
            .collect()
    }

    /// Records of every station between `start` and `end` (inclusive)
    ///
    /// One vector per station, in configuration order.
    pub fn read_range(&self, start: Timestamp, end: Timestamp) -> Result<Vec<Vec<Record>>> {
        let range = DateRange::new(start, end)?;
        Ok(self
            .read_range_with_stats(range)?
            .into_iter()
            .map(|result| result.records)
            .collect())
    }

    /// Records and read statistics of every station
    pub fn read_range_with_stats(&self, range: DateRange) -> Result<Vec<ParseResult>> {
        (0..self.layouts.len())
            .map(|station| self.read_station(station, range))
            .collect()
    }

    /// Records of one station, by position in configuration order
    pub fn read_station(&self, station: usize, range: DateRange) -> Result<ParseResult> {
        let layout = self.layouts.get(station).ok_or_else(|| {
            Error::configuration(format!(
                "Station {} requested but only {} are configured",
                station + 1,
                self.layouts.len()
            ))
        })?;
        debug!(
            "Reading {} from {} to {}",
            layout.station().id,
            range.start,
            range.end
        );
        read_file(layout, &self.index, range, self.policy)
    }
}

/// `STATION<n>` keys ordered by `n`, with their file names
fn station_files<C: ConfigStore>(config: &C) -> Result<Vec<(String, String)>> {
    let mut stations = config
        .keys(INPUT_SECTION)
        .into_iter()
        .filter_map(|key| {
            let number = key.strip_prefix(STATION_KEY_PREFIX)?.to_string();
            Some((number, key))
        })
        .map(|(number, key)| {
            let order: usize = number.parse().map_err(|_| {
                Error::configuration(format!(
                    "Station keys must be numbered like {STATION_KEY_PREFIX}1, found {key}"
                ))
            })?;
            let file = config.require::<String>(INPUT_SECTION, &key)?;
            Ok((order, number, file))
        })
        .collect::<Result<Vec<_>>>()?;

    if stations.is_empty() {
        return Err(Error::configuration(format!(
            "No {STATION_KEY_PREFIX}<n> keys found in section [{INPUT_SECTION}]"
        )));
    }

    stations.sort_by_key(|(order, _, _)| *order);
    Ok(stations
        .into_iter()
        .map(|(_, number, file)| (number, file))
        .collect())
}
