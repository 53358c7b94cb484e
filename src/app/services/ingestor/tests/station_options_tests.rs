//! Tests for per-station option building

use std::path::Path;

use super::super::station_options::station_options;
use crate::app::services::date_resolver::{DecimalDateKind, FixedYear};
use crate::config::KeyValueConfig;

fn config() -> KeyValueConfig {
    KeyValueConfig::new()
        .with("Input", "POSITION", "latlon (46.8, 9.8, 1500)")
        .with("Input", "POSITION2", "xy (600000, 200000, 480)")
        .with("Input", "CSV_DELIMITER", ";")
        .with("Input", "CSV2_DELIMITER", "SPACE")
        .with("Input", "CSV_DEQUOTE", "true")
        .with("Input", "CSV_NR_HEADERS", "3")
        .with("Input", "CSV_COLUMNS_HEADERS", "2")
        .with("Input", "CSV_SKIP_FIELDS", "3 4")
        .with("Input", "CSV_EXCLUDE_LINES", "5-7 10")
        .with("Input", "CSV_NODATA", "-999")
        .with("Input", "CSV2_ID", "WFJ")
        .with("Input", "CSV_DATETIME_SPEC", "DD.MM.YYYY HH24:MI")
        .with("Input", "CSV2_DATE_SPEC", "YYYYMMDD")
        .with("Input", "CSV2_TIME_SPEC", "HH24MI")
        .with("Input", "CSV_FALLBACK_YEAR", "2020")
        .with("Input", "CSV2_FALLBACK_AUTO_WRAP", "false")
}

#[test]
fn test_global_keys() {
    let options = station_options(&config(), Path::new("/data"), "1", "a.csv", 1.0).unwrap();

    assert_eq!(options.path, Path::new("/data/a.csv"));
    assert_eq!(options.station_index, Some(1));
    assert_eq!(options.time_zone, 1.0);
    assert_eq!(options.delimiter, ';');
    assert_eq!(options.purge_chars, vec!['"', '\'']);
    assert_eq!(options.header_lines, 3);
    assert_eq!(options.columns_header, Some(2));
    assert_eq!(options.skip_fields, vec![3, 4]);
    assert_eq!(options.exclude_lines, vec![5..=7, 10..=10]);
    assert_eq!(options.metadata.nodata, vec!["-999".to_string()]);
    assert_eq!(options.metadata.location.latitude, Some(46.8));
    assert_eq!(options.metadata.id, None);
    assert_eq!(options.date.datetime_spec.as_deref(), Some("DD.MM.YYYY HH24:MI"));
    assert_eq!(options.date.date_spec, None);
    assert_eq!(
        options.date.fixed_year,
        Some(FixedYear {
            year: 2020,
            auto_wrap: true
        })
    );
}

#[test]
fn test_station_keys_override() {
    let options = station_options(&config(), Path::new("/data"), "2", "b.csv", 0.0).unwrap();

    assert_eq!(options.delimiter, ' ');
    assert_eq!(options.metadata.id.as_deref(), Some("WFJ"));
    assert_eq!(options.metadata.location.easting, Some(600_000.0));
    assert_eq!(options.metadata.location.latitude, None);
    assert_eq!(options.date.datetime_spec, None);
    assert_eq!(options.date.date_spec.as_deref(), Some("YYYYMMDD"));
    assert_eq!(options.date.time_spec.as_deref(), Some("HH24MI"));
    assert_eq!(
        options.date.fixed_year,
        Some(FixedYear {
            year: 2020,
            auto_wrap: false
        })
    );
}

#[test]
fn test_decimal_date_and_units() {
    let config = KeyValueConfig::new()
        .with("Input", "CSV_DECIMALDATE_TYPE", "mjulian")
        .with("Input", "CSV_UNITS_OFFSET", "0 273.15")
        .with("Input", "CSV_UNITS_MULTIPLIER", "1 1")
        .with("Input", "CSV_FIELDS", "TIMESTAMP TA")
        .with("Input", "CSV_PURGE_CHARS", "# |");

    let options = station_options(&config, Path::new("."), "1", "c.csv", 0.0).unwrap();

    assert_eq!(options.date.decimal_type, Some(DecimalDateKind::ModifiedJulian));
    assert_eq!(options.units_offset, vec![0.0, 273.15]);
    assert_eq!(options.units_multiplier, vec![1.0, 1.0]);
    assert_eq!(options.fields, vec!["TIMESTAMP", "TA"]);
    assert_eq!(options.purge_chars, vec!['#', '|']);
    assert!(options.validate().is_ok());
}

#[test]
fn test_invalid_values() {
    let bad_delimiter = KeyValueConfig::new().with("Input", "CSV_DELIMITER", ";;");
    assert!(station_options(&bad_delimiter, Path::new("."), "1", "a.csv", 0.0).is_err());

    let bad_headers = KeyValueConfig::new().with("Input", "CSV1_NR_HEADERS", "two");
    assert!(station_options(&bad_headers, Path::new("."), "1", "a.csv", 0.0).is_err());

    let bad_position = KeyValueConfig::new().with("Input", "POSITION", "somewhere");
    assert!(station_options(&bad_position, Path::new("."), "1", "a.csv", 0.0).is_err());

    let bad_decimal = KeyValueConfig::new().with("Input", "CSV_DECIMALDATE_TYPE", "lunar");
    assert!(station_options(&bad_decimal, Path::new("."), "1", "a.csv", 0.0).is_err());
}
