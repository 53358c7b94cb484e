//! Tests for row-level timestamp resolution

use super::super::representation::{
    ComponentColumns, DateRepresentation, DayChannel, DecimalDateKind, FixedYear, TimeChannel,
    YearSource,
};
use super::super::resolver::DateResolver;
use super::utc;
use crate::app::services::format_spec::DateTimeFormat;

fn fixed_year_doy(year: i32, auto_wrap: bool) -> DateRepresentation {
    DateRepresentation::Components(ComponentColumns {
        year: YearSource {
            column: None,
            fixed: Some(FixedYear { year, auto_wrap }),
        },
        day: DayChannel::DayOfYear(0),
        time: TimeChannel::Split {
            hours: 1,
            minutes: None,
            seconds: None,
        },
    })
}

#[test]
fn test_combined_iso_string() {
    let representation = DateRepresentation::Combined {
        column: 0,
        format: DateTimeFormat::compile("YYYY-MM-DDTHH24:MI:SS").unwrap(),
    };
    let mut resolver = DateResolver::new(&representation, 0.0);

    assert_eq!(
        resolver.resolve(&["2020-01-05T08:30:00", "1.5"]),
        Some(utc(2020, 1, 5, 8, 30, 0))
    );
    assert_eq!(resolver.resolve(&["2020-01-05", "1.5"]), None);
    assert_eq!(resolver.resolve(&[]), None);
}

#[test]
fn test_combined_with_time_zone_token() {
    let representation = DateRepresentation::Combined {
        column: 1,
        format: DateTimeFormat::compile("YYYY-MM-DD HH24:MI TZ").unwrap(),
    };
    let mut resolver = DateResolver::new(&representation, 0.0);

    assert_eq!(
        resolver.resolve(&["x", "2020-01-05 08:30 +01:00"]),
        Some(utc(2020, 1, 5, 7, 30, 0))
    );
    assert_eq!(
        resolver.resolve(&["x", "2020-01-05 08:30 UTC"]),
        Some(utc(2020, 1, 5, 8, 30, 0))
    );
}

#[test]
fn test_configured_time_zone_applies_without_token() {
    let representation = DateRepresentation::Combined {
        column: 0,
        format: DateTimeFormat::compile("DD.MM.YYYY HH24:MI").unwrap(),
    };
    let mut resolver = DateResolver::new(&representation, 2.0);

    assert_eq!(
        resolver.resolve(&["05.01.2020 08:30"]),
        Some(utc(2020, 1, 5, 6, 30, 0))
    );
}

#[test]
fn test_separate_date_and_time() {
    let representation = DateRepresentation::Separate {
        date_column: 0,
        date_format: DateTimeFormat::compile("DD.MM.YYYY").unwrap(),
        time_column: 1,
        time_format: DateTimeFormat::compile_time("HH24:MI").unwrap(),
    };
    let mut resolver = DateResolver::new(&representation, 0.0);

    assert_eq!(
        resolver.resolve(&["05.01.2020", "08:30", "12.0"]),
        Some(utc(2020, 1, 5, 8, 30, 0))
    );
    assert_eq!(resolver.resolve(&["05.01.2020", "late", "12.0"]), None);
}

#[test]
fn test_decimal_column() {
    let representation = DateRepresentation::Decimal {
        column: 2,
        kind: DecimalDateKind::Unix,
    };
    let mut resolver = DateResolver::new(&representation, 5.0);

    assert_eq!(
        resolver.resolve(&["a", "b", "1578213000"]),
        Some(utc(2020, 1, 5, 8, 30, 0))
    );
}

#[test]
fn test_equivalent_representations_agree() {
    let expected = Some(utc(2020, 1, 5, 8, 30, 0));

    let combined = DateRepresentation::Combined {
        column: 0,
        format: DateTimeFormat::compile("YYYY-MM-DD HH24:MI").unwrap(),
    };
    let separate = DateRepresentation::Separate {
        date_column: 0,
        date_format: DateTimeFormat::compile("YYYY-MM-DD").unwrap(),
        time_column: 1,
        time_format: DateTimeFormat::compile_time("HH24:MI").unwrap(),
    };
    let decimal = DateRepresentation::Decimal {
        column: 0,
        kind: DecimalDateKind::Julian,
    };
    let components = DateRepresentation::Components(ComponentColumns {
        year: YearSource {
            column: Some(0),
            fixed: None,
        },
        day: DayChannel::MonthDay { month: 1, day: 2 },
        time: TimeChannel::Numeric(3),
    });

    assert_eq!(DateResolver::new(&combined, 0.0).resolve(&["2020-01-05 08:30"]), expected);
    assert_eq!(DateResolver::new(&separate, 0.0).resolve(&["2020-01-05", "08:30"]), expected);
    assert_eq!(DateResolver::new(&decimal, 0.0).resolve(&["2458853.854166666667"]), expected);
    assert_eq!(
        DateResolver::new(&components, 0.0).resolve(&["2020", "1", "5", "830"]),
        expected
    );
}

#[test]
fn test_fixed_year_auto_wrap() {
    let representation = fixed_year_doy(2020, true);
    let mut resolver = DateResolver::new(&representation, 0.0);
    assert!(resolver.wrap_active());

    // Late-year rows belong to the previous year until a day before October
    assert_eq!(resolver.resolve(&["350", "12"]), Some(utc(2019, 12, 16, 12, 0, 0)));
    assert!(resolver.wrap_active());
    assert_eq!(resolver.resolve(&["10", "12"]), Some(utc(2020, 1, 10, 12, 0, 0)));
    assert!(!resolver.wrap_active());
    assert_eq!(resolver.resolve(&["350", "12"]), Some(utc(2020, 12, 15, 12, 0, 0)));
}

#[test]
fn test_fixed_year_without_wrap() {
    let representation = fixed_year_doy(2020, false);
    let mut resolver = DateResolver::new(&representation, 0.0);

    assert!(!resolver.wrap_active());
    assert_eq!(resolver.resolve(&["350", "0"]), Some(utc(2020, 12, 15, 0, 0, 0)));
}

#[test]
fn test_resume_keeps_wrap_state() {
    let representation = fixed_year_doy(2020, true);

    let mut resumed = DateResolver::resume(&representation, 0.0, false);
    assert_eq!(resumed.resolve(&["350", "12"]), Some(utc(2020, 12, 15, 12, 0, 0)));

    let mut fresh = DateResolver::resume(&representation, 0.0, true);
    assert_eq!(fresh.resolve(&["350", "12"]), Some(utc(2019, 12, 16, 12, 0, 0)));
}

#[test]
fn test_month_based_wrap() {
    let representation = DateRepresentation::Components(ComponentColumns {
        year: YearSource {
            column: None,
            fixed: Some(FixedYear {
                year: 2021,
                auto_wrap: true,
            }),
        },
        day: DayChannel::MonthDay { month: 0, day: 1 },
        time: TimeChannel::Split {
            hours: 2,
            minutes: Some(3),
            seconds: Some(4),
        },
    });
    let mut resolver = DateResolver::new(&representation, 0.0);

    assert_eq!(
        resolver.resolve(&["11", "3", "6", "15", "30.5"]),
        Some(utc(2020, 11, 3, 6, 15, 30) + chrono::Duration::milliseconds(500))
    );
    assert_eq!(
        resolver.resolve(&["2", "1", "0", "0", "0"]),
        Some(utc(2021, 2, 1, 0, 0, 0))
    );
    assert_eq!(
        resolver.resolve(&["11", "3", "0", "0", "0"]),
        Some(utc(2021, 11, 3, 0, 0, 0))
    );
}

#[test]
fn test_year_column_zero_uses_fixed_year() {
    let representation = DateRepresentation::Components(ComponentColumns {
        year: YearSource {
            column: Some(0),
            fixed: Some(FixedYear {
                year: 2018,
                auto_wrap: false,
            }),
        },
        day: DayChannel::DayOfYear(1),
        time: TimeChannel::Numeric(2),
    });
    let mut resolver = DateResolver::new(&representation, 0.0);

    assert_eq!(resolver.resolve(&["0", "32", "952"]), Some(utc(2018, 2, 1, 9, 52, 0)));
    assert_eq!(resolver.resolve(&["2017", "32", "952"]), Some(utc(2017, 2, 1, 9, 52, 0)));
}

#[test]
fn test_fractional_day_with_time_string() {
    let representation = DateRepresentation::Components(ComponentColumns {
        year: YearSource {
            column: Some(0),
            fixed: None,
        },
        day: DayChannel::DayOfYear(1),
        time: TimeChannel::String {
            column: 2,
            format: DateTimeFormat::compile_time("HH24:MI").unwrap(),
        },
    });
    let mut resolver = DateResolver::new(&representation, 0.0);

    assert_eq!(
        resolver.resolve(&["2021", "32.5", "06:00"]),
        Some(utc(2021, 2, 1, 18, 0, 0))
    );
}

#[test]
fn test_hour_24_components() {
    let representation = DateRepresentation::Components(ComponentColumns {
        year: YearSource {
            column: Some(0),
            fixed: None,
        },
        day: DayChannel::MonthDay { month: 1, day: 2 },
        time: TimeChannel::Split {
            hours: 3,
            minutes: Some(4),
            seconds: None,
        },
    });
    let mut resolver = DateResolver::new(&representation, 0.0);

    assert_eq!(
        resolver.resolve(&["2020", "2", "28", "24", "0"]),
        Some(utc(2020, 2, 29, 0, 0, 0))
    );
    assert_eq!(resolver.resolve(&["2020", "2", "28", "24", "30"]), None);
}

#[test]
fn test_numeric_time_rejects_invalid_minutes() {
    let representation = DateRepresentation::Components(ComponentColumns {
        year: YearSource {
            column: Some(0),
            fixed: None,
        },
        day: DayChannel::DayOfYear(1),
        time: TimeChannel::Numeric(2),
    });
    let mut resolver = DateResolver::new(&representation, 0.0);

    assert_eq!(resolver.resolve(&["2020", "1", "975"]), None);
    assert_eq!(resolver.resolve(&["2020", "1", "-5"]), None);
    assert_eq!(resolver.resolve(&["2020", "1.5", "930"]), None);
}

#[test]
fn test_decimal_kind_from_str() {
    assert_eq!("excel".parse::<DecimalDateKind>().unwrap(), DecimalDateKind::Excel);
    assert_eq!(
        " MJULIAN ".parse::<DecimalDateKind>().unwrap(),
        DecimalDateKind::ModifiedJulian
    );
    assert!("GPS".parse::<DecimalDateKind>().is_err());
}

#[test]
fn test_representation_columns() {
    let representation = DateRepresentation::Components(ComponentColumns {
        year: YearSource {
            column: Some(4),
            fixed: None,
        },
        day: DayChannel::MonthDay { month: 0, day: 1 },
        time: TimeChannel::Split {
            hours: 2,
            minutes: Some(3),
            seconds: None,
        },
    });

    assert_eq!(representation.columns(), vec![4, 0, 1, 2, 3]);
    assert_eq!(representation.max_column(), 4);
}
