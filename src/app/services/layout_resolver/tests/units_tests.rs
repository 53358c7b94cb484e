//! Tests for unit conversions

use super::super::units::{
    UnitConversion, conversion_for_unit, conversions_from_vectors, parse_units,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_known_units() {
    assert!(conversion_for_unit("W/m2").unwrap().is_identity());
    assert!(conversion_for_unit("\"m/s\"").unwrap().is_identity());
    assert!(conversion_for_unit("").unwrap().is_identity());
    assert!(conversion_for_unit("0 or 1").unwrap().is_identity());

    assert_close(conversion_for_unit("degC").unwrap().apply(0.0), 273.15);
    assert_close(conversion_for_unit("°C").unwrap().apply(-10.0), 263.15);
    assert_close(conversion_for_unit("hPa").unwrap().apply(850.0), 85_000.0);
    assert_close(conversion_for_unit("%").unwrap().apply(55.0), 0.55);
    assert_close(conversion_for_unit("pc").unwrap().apply(55.0), 0.55);
    assert_close(conversion_for_unit("mm").unwrap().apply(12.0), 0.012);
    assert_close(conversion_for_unit("min").unwrap().apply(2.0), 120.0);
    assert_close(conversion_for_unit("km/h").unwrap().apply(36.0), 10.0);
    assert_close(conversion_for_unit("kt").unwrap().apply(3.6), 1.852);
    assert_close(conversion_for_unit("F").unwrap().apply(212.0), 100.0);
}

#[test]
fn test_unknown_unit() {
    assert!(conversion_for_unit("furlongs").is_none());

    let conversions = parse_units("TS furlongs C", ' ');
    assert_eq!(conversions.len(), 3);
    assert!(conversions[1].is_identity());
    assert_close(conversions[2].offset, 273.15);
}

#[test]
fn test_multiplier_then_offset() {
    let conversion = UnitConversion {
        multiplier: 0.01,
        offset: 273.15,
    };
    assert_close(conversion.apply(20.0), 273.35);
}

#[test]
fn test_conversion_vectors() {
    let conversions = conversions_from_vectors(&[0.0, 273.15], &[], 2).unwrap();
    assert!(conversions[0].is_identity());
    assert_close(conversions[1].apply(1.0), 274.15);

    assert!(conversions_from_vectors(&[0.0], &[], 2).is_err());
    assert!(conversions_from_vectors(&[], &[1.0, 1.0, 1.0], 2).is_err());
    assert_eq!(conversions_from_vectors(&[], &[], 3).unwrap().len(), 3);
}
