//! Tests for pattern tokenization and validation

use super::super::compiler::{DateField, DateTimeFormat, Segment};
use crate::Error;

#[test]
fn test_iso_pattern_field_order() {
    let format = DateTimeFormat::compile("YYYY-MM-DDTHH24:MI:SS").unwrap();

    assert_eq!(
        format.fields(),
        &[
            DateField::Year,
            DateField::Month,
            DateField::Day,
            DateField::Hour,
            DateField::Minute,
            DateField::Second
        ]
    );
    assert!(!format.has_time_zone());
    assert_eq!(format.pattern(), "YYYY-MM-DDTHH24:MI:SS");
}

#[test]
fn test_swiss_pattern_field_order() {
    let format = DateTimeFormat::compile("DD.MM.YYYY HH24:MI").unwrap();

    assert_eq!(
        format.fields(),
        &[
            DateField::Day,
            DateField::Month,
            DateField::Year,
            DateField::Hour,
            DateField::Minute
        ]
    );
    assert!(!format.has_field(DateField::Second));
}

#[test]
fn test_segments_keep_literals() {
    let format = DateTimeFormat::compile("MM/DD/YYYY").unwrap();

    assert_eq!(
        format.segments(),
        &[
            Segment::Field(DateField::Month),
            Segment::Literal("/".to_string()),
            Segment::Field(DateField::Day),
            Segment::Literal("/".to_string()),
            Segment::Field(DateField::Year),
        ]
    );
}

#[test]
fn test_compact_pattern_without_separators() {
    let format = DateTimeFormat::compile("YYYYMMDDHH24MI").unwrap();
    assert_eq!(format.fields().len(), 5);
    assert!(
        format
            .segments()
            .iter()
            .all(|segment| matches!(segment, Segment::Field(_)))
    );
}

#[test]
fn test_trailing_time_zone() {
    let format = DateTimeFormat::compile("YYYY-MM-DD HH24:MI:SS TZ").unwrap();
    assert!(format.has_time_zone());
    assert_eq!(format.segments().last(), Some(&Segment::TimeZone));
}

#[test]
fn test_time_zone_not_at_end_is_rejected() {
    let result = DateTimeFormat::compile("YYYY-MM-DD TZ HH24:MI");
    assert!(matches!(result, Err(Error::InvalidFormatSpec { .. })));
}

#[test]
fn test_duplicate_token_is_rejected() {
    let result = DateTimeFormat::compile("YYYY-MM-DD MM");
    assert!(matches!(result, Err(Error::InvalidFormatSpec { .. })));
}

#[test]
fn test_percent_is_rejected() {
    for pattern in ["YYYY-MM-DD %H", "%%YYYY", "YYYY%MM"] {
        let result = DateTimeFormat::compile(pattern);
        assert!(
            matches!(result, Err(Error::InvalidFormatSpec { .. })),
            "pattern {pattern} should be rejected"
        );
    }
}

#[test]
fn test_pattern_without_tokens_is_rejected() {
    let result = DateTimeFormat::compile("date");
    assert!(matches!(result, Err(Error::InvalidFormatSpec { .. })));
}

#[test]
fn test_time_only_pattern() {
    let format = DateTimeFormat::compile_time("HH24:MI").unwrap();
    assert_eq!(format.fields(), &[DateField::Hour, DateField::Minute]);

    let result = DateTimeFormat::compile_time("YYYY HH24:MI");
    assert!(matches!(result, Err(Error::InvalidFormatSpec { .. })));
}

#[test]
fn test_non_ascii_literals() {
    let format = DateTimeFormat::compile("DD°MM°YYYY").unwrap();
    assert_eq!(format.fields().len(), 3);
    assert_eq!(format.segments()[1], Segment::Literal("°".to_string()));
}
