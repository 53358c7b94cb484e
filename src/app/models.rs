//! Data models for CSV ingestion
//!
//! This module contains the core data structures shared by every ingestion
//! stage: station identity and geolocation, the canonical record produced for
//! each surviving row, and the inclusive date range of a read request.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Absolute instant of a record, always stored in UTC
pub type Timestamp = DateTime<Utc>;

// =============================================================================
// Station Metadata Structures
// =============================================================================

/// Geographic position of a station
///
/// Either geographic coordinates (latitude/longitude in WGS84 decimal degrees)
/// or projected coordinates (easting/northing) may be given, together with an
/// optional altitude in meters.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub easting: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub northing: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

impl Location {
    /// Create a location from geographic coordinates
    pub fn from_lat_lon(latitude: f64, longitude: f64, altitude: Option<f64>) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            altitude,
            ..Self::default()
        }
    }

    /// Create a location from projected coordinates
    pub fn from_easting_northing(easting: f64, northing: f64, altitude: Option<f64>) -> Self {
        Self {
            easting: Some(easting),
            northing: Some(northing),
            altitude,
            ..Self::default()
        }
    }

    /// True when neither geographic nor projected coordinates are known
    pub fn is_unset(&self) -> bool {
        let has_geographic = self.latitude.is_some() && self.longitude.is_some();
        let has_projected = self.easting.is_some() && self.northing.is_some();
        !has_geographic && !has_projected
    }

    /// Fill every unknown coordinate from a lower-priority location
    pub fn merged_with(&self, fallback: &Location) -> Location {
        Location {
            latitude: self.latitude.or(fallback.latitude),
            longitude: self.longitude.or(fallback.longitude),
            easting: self.easting.or(fallback.easting),
            northing: self.northing.or(fallback.northing),
            altitude: self.altitude.or(fallback.altitude),
        }
    }

    /// Validate coordinate ranges for a given file
    pub fn validate(&self, file: &str) -> Result<()> {
        if let Some(latitude) = self.latitude {
            if !(-90.0..=90.0).contains(&latitude) {
                return Err(Error::metadata(
                    file,
                    format!("Inconsistent geographic coordinates: latitude {latitude} is out of range"),
                ));
            }
        }

        if let Some(longitude) = self.longitude {
            if !(-360.0..=360.0).contains(&longitude) {
                return Err(Error::metadata(
                    file,
                    format!(
                        "Inconsistent geographic coordinates: longitude {longitude} is out of range"
                    ),
                ));
            }
        }

        if self.latitude.is_some() != self.longitude.is_some() {
            return Err(Error::metadata(
                file,
                "Inconsistent geographic coordinates: latitude and longitude must be given together",
            ));
        }

        Ok(())
    }
}

/// Identity and geolocation of the station a file belongs to
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StationIdentity {
    /// Station identifier, also the default value of the station-id filter
    pub id: String,

    /// Human-readable station name
    pub name: String,

    /// Station position
    pub location: Location,

    /// Slope angle in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slope: Option<f64>,

    /// Slope azimuth in degrees from North
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azimuth: Option<f64>,
}

// =============================================================================
// Records
// =============================================================================

/// One timestamped row of measurements for a station
///
/// Every field declared by the file layout is present in `values`; `None`
/// is the nodata sentinel and is distinct from a measured zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub timestamp: Timestamp,
    pub station: Arc<StationIdentity>,
    pub values: BTreeMap<String, Option<f64>>,
}

impl Record {
    /// Value of a field, `None` when the field is unknown or nodata
    pub fn get(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied().flatten()
    }

    /// True when the field exists in the layout but holds nodata
    pub fn is_nodata(&self, field: &str) -> bool {
        matches!(self.values.get(field), Some(None))
    }

    /// Names of all fields carried by the record
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Inclusive time window of a read request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl DateRange {
    /// Create a range including both `start` and `end`
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self> {
        if start > end {
            return Err(Error::configuration(format!(
                "Date range start {start} is after its end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Range covering every representable instant
    pub fn all() -> Self {
        Self {
            start: DateTime::<Utc>::MIN_UTC,
            end: DateTime::<Utc>::MAX_UTC,
        }
    }

    pub fn contains(&self, timestamp: &Timestamp) -> bool {
        *timestamp >= self.start && *timestamp <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_location_unset_and_merge() {
        let empty = Location::default();
        assert!(empty.is_unset());

        let partial = Location {
            altitude: Some(1500.0),
            ..Location::default()
        };
        assert!(partial.is_unset());

        let merged = partial.merged_with(&Location::from_lat_lon(46.8, 9.8, Some(2000.0)));
        assert!(!merged.is_unset());
        assert_eq!(merged.altitude, Some(1500.0));
        assert_eq!(merged.latitude, Some(46.8));
    }

    #[test]
    fn test_location_validation() {
        assert!(Location::from_lat_lon(46.8, 9.8, None).validate("f.csv").is_ok());
        assert!(Location::from_lat_lon(91.0, 9.8, None).validate("f.csv").is_err());
        assert!(
            Location::from_easting_northing(780_000.0, 189_000.0, None)
                .validate("f.csv")
                .is_ok()
        );
    }

    #[test]
    fn test_record_nodata_is_not_zero() {
        let mut values = BTreeMap::new();
        values.insert("TA".to_string(), Some(0.0));
        values.insert("RH".to_string(), None);
        let record = Record {
            timestamp: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            station: Arc::new(StationIdentity::default()),
            values,
        };

        assert_eq!(record.get("TA"), Some(0.0));
        assert!(!record.is_nodata("TA"));
        assert!(record.is_nodata("RH"));
        assert!(!record.is_nodata("VW"));
        assert_eq!(record.field_names().count(), 2);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap();
        let range = DateRange::new(start, end).unwrap();

        assert!(range.contains(&start));
        assert!(range.contains(&end));
        assert!(!range.contains(&(end + chrono::Duration::seconds(1))));
        assert!(DateRange::new(end, start).is_err());
    }
}
