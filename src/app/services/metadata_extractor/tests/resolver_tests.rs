//! Tests for the metadata priority merge

use std::path::Path;

use super::super::fields::MetadataLayer;
use super::super::resolver::resolve_metadata;
use super::located_layer;
use crate::Error;

#[test]
fn test_configuration_beats_header_and_filename() {
    let configured = MetadataLayer {
        name: Some("Configured".to_string()),
        ..located_layer(46.8, 9.8)
    };
    let header = MetadataLayer {
        id: Some("HDR".to_string()),
        name: Some("Header".to_string()),
        ..MetadataLayer::default()
    };
    let filename = MetadataLayer {
        id: Some("FILE".to_string()),
        param: Some("TA".to_string()),
        ..MetadataLayer::default()
    };

    let resolved =
        resolve_metadata(Path::new("x.csv"), &configured, &header, &filename, Some(1)).unwrap();

    assert_eq!(resolved.identity.name, "Configured");
    assert_eq!(resolved.identity.id, "HDR");
    assert_eq!(resolved.param.as_deref(), Some("TA"));
}

#[test]
fn test_fallback_name_and_id() {
    let empty = MetadataLayer::default();
    let position = located_layer(46.8, 9.8);

    let resolved =
        resolve_metadata(Path::new("/data/davos.csv"), &position, &empty, &empty, None).unwrap();
    assert_eq!(resolved.identity.name, "davos");
    assert_eq!(resolved.identity.id, "davos");

    let numbered =
        resolve_metadata(Path::new("/data/davos.csv"), &position, &empty, &empty, Some(3)).unwrap();
    assert_eq!(numbered.identity.id, "ID3");
}

#[test]
fn test_missing_location_is_fatal() {
    let empty = MetadataLayer::default();
    let error = resolve_metadata(Path::new("a.csv"), &empty, &empty, &empty, None).unwrap_err();

    assert!(matches!(error, Error::MetadataExtractionFailed { .. }));
}

#[test]
fn test_out_of_range_location_is_fatal() {
    let empty = MetadataLayer::default();
    let result = resolve_metadata(Path::new("a.csv"), &located_layer(95.0, 9.8), &empty, &empty, None);

    assert!(result.is_err());
}

#[test]
fn test_slope_attachment() {
    let empty = MetadataLayer::default();

    let both = MetadataLayer {
        slope: Some(30.0),
        azimuth: Some(180.0),
        ..located_layer(46.8, 9.8)
    };
    let resolved = resolve_metadata(Path::new("a.csv"), &both, &empty, &empty, None).unwrap();
    assert_eq!(resolved.identity.slope, Some(30.0));
    assert_eq!(resolved.identity.azimuth, Some(180.0));

    let flat = MetadataLayer {
        slope: Some(0.0),
        ..located_layer(46.8, 9.8)
    };
    let resolved = resolve_metadata(Path::new("a.csv"), &flat, &empty, &empty, None).unwrap();
    assert_eq!(resolved.identity.slope, Some(0.0));

    let dangling = MetadataLayer {
        slope: Some(30.0),
        ..located_layer(46.8, 9.8)
    };
    let resolved = resolve_metadata(Path::new("a.csv"), &dangling, &empty, &empty, None).unwrap();
    assert_eq!(resolved.identity.slope, None);
}
