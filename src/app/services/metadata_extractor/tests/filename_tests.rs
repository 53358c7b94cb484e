//! Tests for filename pattern extraction

use std::path::Path;

use super::super::filename::FilenamePattern;

#[test]
fn test_generoso_file_name() {
    let pattern = FilenamePattern::compile("{ID}_{NAME}-{SKIP}_-_{PARAM}").unwrap();
    let layer = pattern
        .extract(Path::new("/data/H0118_Generoso-Calmasino_-_Precipitation.csv"))
        .unwrap();

    assert_eq!(layer.id.as_deref(), Some("H0118"));
    assert_eq!(layer.name.as_deref(), Some("Generoso"));
    assert_eq!(layer.param.as_deref(), Some("PSUM"));
}

#[test]
fn test_leading_literal_and_coordinates() {
    let pattern = FilenamePattern::compile("station_{ID}_{LAT}_{LON}").unwrap();
    let layer = pattern
        .extract(Path::new("station_WFJ_46.83_9.81.txt"))
        .unwrap();

    assert_eq!(layer.id.as_deref(), Some("WFJ"));
    assert_eq!(layer.location.latitude, Some(46.83));
    assert_eq!(layer.location.longitude, Some(9.81));
}

#[test]
fn test_trailing_literal_must_match() {
    let pattern = FilenamePattern::compile("{NAME}_hourly").unwrap();

    let layer = pattern.extract(Path::new("Davos_hourly.csv")).unwrap();
    assert_eq!(layer.name.as_deref(), Some("Davos"));
    assert!(pattern.extract(Path::new("Davos_daily.csv")).is_err());
}

#[test]
fn test_mismatched_names() {
    let pattern = FilenamePattern::compile("meteo_{ID}-{NAME}").unwrap();

    assert!(pattern.extract(Path::new("other_WFJ-Davos.csv")).is_err());
    assert!(pattern.extract(Path::new("meteo_WFJ_Davos.csv")).is_err());
}

#[test]
fn test_invalid_patterns() {
    assert!(FilenamePattern::compile("no_placeholders").is_err());
    assert!(FilenamePattern::compile("{ID}_{NAME").is_err());
    assert!(FilenamePattern::compile("{ID}_{COLOR}").is_err());
    assert!(FilenamePattern::compile("{ID}}_x").is_err());
}
