//! Tests for station metadata extraction

mod filename_tests;
mod resolver_tests;

use crate::app::models::Location;

use super::fields::MetadataLayer;

/// Layer carrying only a geographic position
pub fn located_layer(latitude: f64, longitude: f64) -> MetadataLayer {
    MetadataLayer {
        location: Location::from_lat_lon(latitude, longitude, None),
        ..MetadataLayer::default()
    }
}
