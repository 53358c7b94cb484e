//! Metadata field types and per-strategy value layers

use std::fmt;

use crate::app::models::Location;
use crate::constants::{CANONICAL_PARAMETERS, IDENTITY_JOIN_SEPARATOR, PARAMETER_SYNONYMS};
use crate::{Error, Result};

/// Kind of value a header coordinate or filename placeholder carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
    Id,
    Name,
    Altitude,
    Latitude,
    Longitude,
    Easting,
    Northing,
    Slope,
    Azimuth,
    Nodata,
    Param,
    Skip,
}

impl MetadataField {
    /// Look up a field type by its (case-insensitive) keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let field = match keyword.trim().to_uppercase().as_str() {
            "ID" => Self::Id,
            "NAME" => Self::Name,
            "ALT" => Self::Altitude,
            "LAT" => Self::Latitude,
            "LON" => Self::Longitude,
            "EASTING" => Self::Easting,
            "NORTHING" => Self::Northing,
            "SLOPE" => Self::Slope,
            "AZI" => Self::Azimuth,
            "NODATA" => Self::Nodata,
            "PARAM" => Self::Param,
            "SKIP" => Self::Skip,
            _ => return None,
        };
        Some(field)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Name => "NAME",
            Self::Altitude => "ALT",
            Self::Latitude => "LAT",
            Self::Longitude => "LON",
            Self::Easting => "EASTING",
            Self::Northing => "NORTHING",
            Self::Slope => "SLOPE",
            Self::Azimuth => "AZI",
            Self::Nodata => "NODATA",
            Self::Param => "PARAM",
            Self::Skip => "SKIP",
        }
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Metadata gathered by a single extraction strategy
///
/// Every field is optional; the resolver merges layers by priority.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataLayer {
    pub id: Option<String>,
    pub name: Option<String>,
    pub location: Location,
    pub slope: Option<f64>,
    pub azimuth: Option<f64>,
    /// Nodata markers, in addition to the `NAN`/`NULL` literals
    pub nodata: Vec<String>,
    /// Single measured parameter, already canonicalized
    pub param: Option<String>,
}

impl MetadataLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw value extracted for `field`
    ///
    /// ID and NAME accumulate with a `-` separator when seen more than once;
    /// every other field is overwritten.
    pub fn assign(&mut self, field: MetadataField, value: &str, file: &str) -> Result<()> {
        match field {
            MetadataField::Id => append_identity(&mut self.id, value),
            MetadataField::Name => append_identity(&mut self.name, value),
            MetadataField::Nodata => self.nodata = vec![value.trim().to_string()],
            MetadataField::Param => self.param = Some(canonical_parameter(value)),
            MetadataField::Skip => {}
            numeric => {
                let number = value.trim().parse::<f64>().map_err(|_| {
                    Error::metadata(
                        file,
                        format!("Could not extract metadata '{numeric}' from value '{value}'"),
                    )
                })?;
                match numeric {
                    MetadataField::Altitude => self.location.altitude = Some(number),
                    MetadataField::Latitude => self.location.latitude = Some(number),
                    MetadataField::Longitude => self.location.longitude = Some(number),
                    MetadataField::Easting => self.location.easting = Some(number),
                    MetadataField::Northing => self.location.northing = Some(number),
                    MetadataField::Slope => self.slope = Some(number),
                    MetadataField::Azimuth => self.azimuth = Some(number),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Fill every unknown value from a lower-priority layer
    pub fn merged_with(self, fallback: &MetadataLayer) -> MetadataLayer {
        MetadataLayer {
            id: self.id.or_else(|| fallback.id.clone()),
            name: self.name.or_else(|| fallback.name.clone()),
            location: self.location.merged_with(&fallback.location),
            slope: self.slope.or(fallback.slope),
            azimuth: self.azimuth.or(fallback.azimuth),
            nodata: if self.nodata.is_empty() {
                fallback.nodata.clone()
            } else {
                self.nodata
            },
            param: self.param.or_else(|| fallback.param.clone()),
        }
    }
}

fn append_identity(target: &mut Option<String>, value: &str) {
    let value = value.trim();
    match target {
        Some(existing) => {
            existing.push_str(IDENTITY_JOIN_SEPARATOR);
            existing.push_str(value);
        }
        None => *target = Some(value.to_string()),
    }
}

/// Map a free-form parameter name onto the internal parameter names
///
/// Known names pass through; otherwise non-ASCII characters are dropped and
/// the first matching synonym prefix wins. Unknown names are returned
/// upper-cased.
pub fn canonical_parameter(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    if CANONICAL_PARAMETERS.contains(&upper.as_str()) {
        return upper;
    }

    let ascii: String = upper.chars().filter(char::is_ascii).collect();
    PARAMETER_SYNONYMS
        .iter()
        .find(|(prefix, _)| ascii.starts_with(prefix))
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(ascii)
}
