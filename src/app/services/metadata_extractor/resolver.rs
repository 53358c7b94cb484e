//! Priority merge of metadata layers into a station identity

use std::path::Path;

use tracing::debug;

use super::fields::MetadataLayer;
use crate::app::models::StationIdentity;
use crate::{Error, Result};

/// Station identity plus the file-level values carried by metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMetadata {
    pub identity: StationIdentity,
    /// Nodata markers declared by configuration, header or file name
    pub nodata: Vec<String>,
    /// Single measured parameter announced by header or file name
    pub param: Option<String>,
}

/// Merge metadata layers, highest priority first
///
/// Missing names fall back to the file base name; missing ids to the name,
/// or to `ID<n>` when the station index is known.
pub fn resolve_metadata(
    path: &Path,
    configured: &MetadataLayer,
    header: &MetadataLayer,
    filename: &MetadataLayer,
    station_index: Option<usize>,
) -> Result<ResolvedMetadata> {
    let file = path.display().to_string();
    let merged = configured
        .clone()
        .merged_with(header)
        .merged_with(filename);

    if merged.location.is_unset() {
        return Err(Error::metadata(
            &file,
            "Missing geographic coordinates, please consider providing the POSITION key",
        ));
    }
    merged.location.validate(&file)?;

    let name = merged.name.unwrap_or_else(|| {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    let id = merged.id.unwrap_or_else(|| match station_index {
        Some(index) => format!("ID{index}"),
        None => name.clone(),
    });

    // A slope without azimuth only makes sense for flat terrain
    let (slope, azimuth) = match (merged.slope, merged.azimuth) {
        (Some(slope), Some(azimuth)) => (Some(slope), Some(azimuth)),
        (Some(slope), None) if slope == 0.0 => (Some(slope), None),
        _ => (None, None),
    };

    debug!("Resolved station '{}' ({}) for {}", id, name, file);

    Ok(ResolvedMetadata {
        identity: StationIdentity {
            id,
            name,
            location: merged.location,
            slope,
            azimuth,
        },
        nodata: merged.nodata,
        param: merged.param,
    })
}
