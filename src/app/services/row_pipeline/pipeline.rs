//! Streaming of one file into records
//!
//! Rows are read line by line from the first data line, or from the latest
//! seek point before the requested range. Each row is filtered, checked,
//! timestamped and converted; row-level errors go through the
//! [`ErrorPolicy`] of the read.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use super::policy::ErrorPolicy;
use super::reader::LineReader;
use super::source::RowSource;
use super::stats::{ParseResult, ParseStats};
use super::tokenizer::{split_fields, unquote};
use crate::app::models::{DateRange, Record};
use crate::app::services::date_resolver::DateResolver;
use crate::app::services::layout_resolver::LayoutDescriptor;
use crate::app::services::position_index::{PositionIndex, SeekPoint};
use crate::constants::{NODATA_LITERALS, SEEK_POINT_EVERY_N_LINES};
use crate::{Error, Result};

/// Interpretation of one measurement token
#[derive(Debug, Clone, Copy, PartialEq)]
enum FieldValue {
    Nodata,
    Number(f64),
    Invalid,
}

/// Read the records of `range` (inclusive at both ends) from one file
///
/// Records come out oldest first, whatever the order of the file. Seek
/// points found while scanning an ascending file are added to `index`.
pub fn read_file(
    layout: &LayoutDescriptor,
    index: &PositionIndex,
    range: DateRange,
    policy: ErrorPolicy,
) -> Result<ParseResult> {
    let path = layout.path();
    let file_name = path.display().to_string();
    let ascending = layout.is_ascending();
    let seek_key = layout.seek_key();
    let mut stats = ParseStats::new();

    let resume_from = if ascending {
        index.seek_before(&seek_key, range.start)
    } else {
        None
    };
    let (offset, line_number) = match resume_from {
        Some(point) => {
            debug!(
                "Resuming {} at line {} ({})",
                file_name, point.line_number, point.timestamp
            );
            stats.resumed = true;
            (point.offset, point.line_number)
        }
        None => (layout.data_offset(), layout.data_line()),
    };

    let reader = LineReader::open_at(path, layout.eol(), offset, line_number)?;
    let mut source = RowSource::new(reader, layout.line_filter());
    let mut resolver = match resume_from {
        Some(point) => DateResolver::resume(layout.date(), layout.time_zone(), point.wrap_active),
        None => DateResolver::new(layout.date(), layout.time_zone()),
    };

    let mut records = Vec::new();
    let mut seek_points = Vec::new();

    while let Some(row) = source
        .next_row()
        .map_err(|e| Error::io(format!("Could not read {file_name}"), e))?
    {
        let tokens = split_fields(&row.content, layout.delimiter());

        if let Some(filter) = layout.station_filter() {
            if tokens.len() <= filter.column {
                let error = Error::field_count_mismatch(
                    &file_name,
                    row.line_number,
                    layout.column_count(),
                    tokens.len(),
                    &row.content,
                );
                reject(error, policy, &mut stats)?;
                continue;
            }
            if !filter.matches(&tokens) {
                stats.rows_filtered += 1;
                continue;
            }
        }

        if tokens.len() != layout.column_count() {
            let error = Error::field_count_mismatch(
                &file_name,
                row.line_number,
                layout.column_count(),
                tokens.len(),
                &row.content,
            );
            reject(error, policy, &mut stats)?;
            continue;
        }

        let Some(timestamp) = resolver.resolve(&tokens) else {
            let error = Error::date_parse(&file_name, row.line_number, &row.content);
            reject(error, policy, &mut stats)?;
            continue;
        };

        if ascending && row.line_number % SEEK_POINT_EVERY_N_LINES == 0 {
            seek_points.push(SeekPoint {
                timestamp,
                offset: source.offset(),
                line_number: row.line_number,
                wrap_active: resolver.wrap_active(),
            });
        }

        if timestamp < range.start {
            stats.rows_out_of_range += 1;
            continue;
        }
        if timestamp > range.end {
            stats.rows_out_of_range += 1;
            if ascending {
                break;
            }
            continue;
        }

        if let Some(values) =
            convert_values(layout, &tokens, row.line_number, &file_name, policy, &mut stats)?
        {
            records.push(Record {
                timestamp,
                station: layout.station().clone(),
                values,
            });
        }
    }

    index.record(&seek_key, seek_points);
    if !ascending {
        records.reverse();
    }

    stats.lines_read = source.lines_read();
    stats.lines_excluded = source.lines_excluded();
    stats.rows_parsed = records.len();

    info!(
        "Read {} records from {} ({} lines)",
        stats.rows_parsed, file_name, stats.lines_read
    );
    if stats.rows_skipped > 0 {
        warn!(
            "Skipped {} malformed rows in {}",
            stats.rows_skipped, file_name
        );
    }

    Ok(ParseResult { records, stats })
}

/// Apply the policy to a row-level error
fn reject(error: Error, policy: ErrorPolicy, stats: &mut ParseStats) -> Result<()> {
    if !policy.silent_errors {
        return Err(error);
    }
    warn!("{}", error);
    stats.rows_skipped += 1;
    stats.errors.push(error.to_string());
    Ok(())
}

/// Convert the measured fields of a row
///
/// Returns `None` when the row is dropped under silent errors.
fn convert_values(
    layout: &LayoutDescriptor,
    tokens: &[&str],
    line_number: usize,
    file_name: &str,
    policy: ErrorPolicy,
    stats: &mut ParseStats,
) -> Result<Option<BTreeMap<String, Option<f64>>>> {
    let mut values = BTreeMap::new();

    for (column, name) in layout.value_columns() {
        let token = tokens.get(column).copied().unwrap_or_default();
        let value = match parse_value(token, layout.nodata_markers()) {
            FieldValue::Nodata => None,
            FieldValue::Number(number) => Some(layout.conversion(column).apply(number)),
            FieldValue::Invalid => {
                let error = Error::value_parse(file_name, line_number, name, token);
                if policy.silent_errors {
                    reject(error, policy, stats)?;
                    return Ok(None);
                }
                if !policy.errors_to_nodata {
                    return Err(error);
                }
                stats.values_to_nodata += 1;
                None
            }
        };
        values.insert(name.to_string(), value);
    }

    Ok(Some(values))
}

/// Classify a measurement token
///
/// Empty tokens, nodata markers (bare or quoted) and the `NAN`/`NULL`
/// literals are nodata. Infinite values are invalid.
fn parse_value(token: &str, nodata_markers: &[String]) -> FieldValue {
    let bare = unquote(token);
    if bare.is_empty()
        || nodata_markers
            .iter()
            .any(|marker| marker == token || marker == bare)
        || NODATA_LITERALS
            .iter()
            .any(|literal| bare.eq_ignore_ascii_case(literal))
    {
        return FieldValue::Nodata;
    }

    match bare.parse::<f64>() {
        Ok(number) if number.is_nan() => FieldValue::Nodata,
        Ok(number) if number.is_finite() => FieldValue::Number(number),
        _ => FieldValue::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        let markers = vec!["-999".to_string()];

        assert_eq!(parse_value("12.5", &markers), FieldValue::Number(12.5));
        assert_eq!(parse_value("0", &markers), FieldValue::Number(0.0));
        assert_eq!(parse_value("-999", &markers), FieldValue::Nodata);
        assert_eq!(parse_value("\"-999\"", &markers), FieldValue::Nodata);
        assert_eq!(parse_value("'-999'", &markers), FieldValue::Nodata);
        assert_eq!(parse_value("", &markers), FieldValue::Nodata);
        assert_eq!(parse_value("NULL", &markers), FieldValue::Nodata);
        assert_eq!(parse_value("nan", &markers), FieldValue::Nodata);
        assert_eq!(parse_value("-999.0", &markers), FieldValue::Number(-999.0));
        assert_eq!(parse_value("abc", &markers), FieldValue::Invalid);
        assert_eq!(parse_value("inf", &markers), FieldValue::Invalid);
    }
}
