//! Layout resolution from declarations and the file itself
//!
//! The header region is read once to collect column names, units and header
//! metadata. The first data rows are then probed to discover whether the
//! timestamps are ascending or descending.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::Arc;

use tracing::{debug, warn};

use super::columns::{ColumnRole, assign_roles, find_role};
use super::date_columns::build_date_representation;
use super::descriptor::{LayoutDescriptor, StationFilter};
use super::options::FileOptions;
use super::units::{UnitConversion, conversions_from_vectors, parse_units};
use crate::app::services::date_resolver::{DateRepresentation, DateResolver};
use crate::app::services::metadata_extractor::{
    FilenamePattern, HeaderMetadataSpec, MetadataLayer, ResolvedMetadata, resolve_metadata,
};
use crate::app::services::row_pipeline::tokenizer::{clean_line, split_fields};
use crate::app::services::row_pipeline::{LineFilter, LineReader, RowSource, detect_eol};
use crate::constants::{PROBE_EXTRA_LINES, PROBE_MIN_TRANSITIONS};
use crate::{Error, Result};

/// What the header region of a file revealed
#[derive(Debug, Default)]
struct HeaderScan {
    column_names: Vec<String>,
    units_line: Option<String>,
    metadata: MetadataLayer,
}

/// Build the layout descriptor of one file
///
/// Fails with a configuration error when the declarations contradict each
/// other or the file, and with a metadata error when the station cannot be
/// located.
pub fn resolve_layout(options: &FileOptions) -> Result<LayoutDescriptor> {
    options.validate()?;
    let path = options.path.as_path();
    let file_name = path.display().to_string();

    let header_spec = HeaderMetadataSpec::parse(options.special_headers.as_deref().unwrap_or(""))?;
    if let Some(last) = header_spec.last_line() {
        if last > options.header_lines {
            warn!(
                "Metadata declared on line {} of {} is beyond the {} header line(s) and will be ignored",
                last, file_name, options.header_lines
            );
        }
    }
    let filename_layer = match &options.filename_spec {
        Some(pattern) => FilenamePattern::compile(pattern)?.extract(path)?,
        None => MetadataLayer::default(),
    };

    let mut file = File::open(path).map_err(|e| {
        Error::io(format!("Error opening file {file_name} for reading"), e)
    })?;
    let eol = detect_eol(&mut file)
        .map_err(|e| Error::io(format!("Could not read {file_name}"), e))?;
    let mut reader = LineReader::new(BufReader::new(file), eol, 0, 0);

    let header = scan_header(&mut reader, options, &header_spec, &file_name)?;
    let data_offset = reader.offset();
    let data_line = reader.line_number();

    let user_fields = !options.fields.is_empty();
    let column_names = if user_fields {
        options.fields.clone()
    } else {
        header.column_names
    };
    if column_names.is_empty() {
        return Err(Error::configuration(format!(
            "No columns names could be found in {file_name}. Please either provide COLUMNS_HEADERS or FIELDS"
        )));
    }

    let metadata = resolve_metadata(
        path,
        &options.metadata,
        &header.metadata,
        &filename_layer,
        options.station_index,
    )?;

    let mut roles = assign_roles(&column_names, &options.skip_fields);
    let date = build_date_representation(&roles, &options.date)?;

    if let Some(param) = &metadata.param {
        if matches!(date, DateRepresentation::Components(_)) {
            return Err(Error::configuration(
                "It is not possible to provide date/time as individual components and declare a single parameter",
            ));
        }
        if !user_fields {
            name_single_parameter(&mut roles, &date, param, options.single_param_index)?;
        }
    }

    let column_count = roles.len();
    if date.max_column() >= column_count {
        return Err(Error::configuration(format!(
            "The date/time columns of {file_name} exceed its {column_count} columns"
        )));
    }

    let conversions = column_conversions(options, header.units_line.as_deref(), column_count)?;
    let station_filter = find_role(&roles, &ColumnRole::StationIdFilter).map(|column| StationFilter {
        column,
        value: options
            .filter_id
            .clone()
            .unwrap_or_else(|| metadata.identity.id.clone()),
    });

    let lines = LineFilter {
        comments_marker: options.comments_marker,
        purge_chars: options.purge_chars.clone(),
        header_repeat_marker: options.header_repeat_marker.clone(),
        header_lines: options.header_lines,
        exclusions: options.exclude_lines.clone(),
    };

    let ascending = probe_order(
        reader,
        &lines,
        options.delimiter,
        &date,
        options.time_zone,
        station_filter.as_ref(),
    )
    .map_err(|e| Error::io(format!("Could not read {file_name}"), e))?;

    let ResolvedMetadata {
        identity, nodata, ..
    } = metadata;

    debug!(
        "Layout of {}: {} columns [{}], {}, {} order, data from line {}",
        file_name,
        column_count,
        roles
            .iter()
            .map(ColumnRole::label)
            .collect::<Vec<_>>()
            .join(", "),
        date.describe(),
        if ascending { "ascending" } else { "descending" },
        data_line + 1
    );

    Ok(LayoutDescriptor {
        path: options.path.clone(),
        station: Arc::new(identity),
        delimiter: options.delimiter,
        header_delimiter: options.header_delimiter(),
        columns_header: options.columns_header_line(),
        units_header: options.units_header_line(),
        lines,
        roles,
        conversions,
        nodata_markers: nodata,
        date,
        time_zone: options.time_zone,
        station_filter,
        ascending,
        eol,
        data_offset,
        data_line,
    })
}

/// Read the header region, leaving the reader on the first data line
///
/// A header-repeat marker line is skipped once and does not count as a
/// header line.
fn scan_header<R: BufRead>(
    reader: &mut LineReader<R>,
    options: &FileOptions,
    header_spec: &HeaderMetadataSpec,
    file_name: &str,
) -> Result<HeaderScan> {
    let mut scan = HeaderScan::default();
    let columns_header = options.columns_header_line();
    let units_header = options.units_header_line();
    let mut marker_seen = false;
    let mut line_number = 0;

    while line_number < options.header_lines {
        let raw = reader
            .next_line()
            .map_err(|e| Error::io(format!("Could not read {file_name}"), e))?
            .ok_or_else(|| {
                Error::configuration(format!(
                    "Declaring {} header line(s) for file {}, but it only contains {} lines",
                    options.header_lines, file_name, line_number
                ))
            })?;

        if let Some(marker) = &options.header_repeat_marker {
            if !marker_seen && raw.contains(marker.as_str()) {
                marker_seen = true;
                continue;
            }
        }
        line_number += 1;

        let line = clean_line(&raw, options.comments_marker, &[]);
        if header_spec.wants_line(line_number) {
            let tokens = split_fields(&line, options.header_delimiter());
            header_spec.extract_line(line_number, &tokens, file_name, &mut scan.metadata)?;
        }
        if columns_header == Some(line_number) {
            scan.column_names = split_fields(&line, options.delimiter)
                .into_iter()
                .map(str::to_string)
                .collect();
        }
        if units_header == Some(line_number) {
            scan.units_line = Some(line);
        }
    }
    Ok(scan)
}

/// Give the single measured parameter a column
///
/// An explicit column index wins and must not name a date or time column.
/// Otherwise the parameter names the only
/// value column of a two-column file, or the column next to a date and a time
/// column in a three-column file.
fn name_single_parameter(
    roles: &mut [ColumnRole],
    date: &DateRepresentation,
    param: &str,
    single_param_index: Option<usize>,
) -> Result<()> {
    if find_role(roles, &ColumnRole::StationIdFilter).is_some() {
        return Err(Error::configuration(
            "It is not possible to name a single parameter when multiple stations are present within one single file with an ID field",
        ));
    }

    if let Some(index) = single_param_index {
        if index >= 1 && date.columns().contains(&(index - 1)) {
            return Err(Error::configuration(format!(
                "SINGLE_PARAM_INDEX {index} points at a date or time column"
            )));
        }
    }

    let column = match (single_param_index, date, roles.len()) {
        (Some(index), _, count) if (1..=count).contains(&index) => Some(index - 1),
        (
            _,
            DateRepresentation::Combined { column, .. } | DateRepresentation::Decimal { column, .. },
            2,
        ) => Some(1 - *column),
        (
            _,
            DateRepresentation::Separate {
                date_column,
                time_column,
                ..
            },
            3,
        ) => (0..3).find(|column| column != date_column && column != time_column),
        _ => None,
    };

    match column {
        Some(column) => {
            debug!("Single parameter {} read from column {}", param, column + 1);
            roles[column] = ColumnRole::Named(param.to_string());
        }
        None => debug!(
            "Single parameter {} could not be assigned to a column, keeping column names",
            param
        ),
    }
    Ok(())
}

/// Per-column conversions from units or explicit vectors
fn column_conversions(
    options: &FileOptions,
    units_line: Option<&str>,
    column_count: usize,
) -> Result<Vec<UnitConversion>> {
    let mut conversions = match (&options.units, units_line) {
        (Some(units), _) => parse_units(units, ' '),
        (None, Some(line)) => parse_units(line, options.delimiter),
        (None, None) => {
            return conversions_from_vectors(
                &options.units_offset,
                &options.units_multiplier,
                column_count,
            );
        }
    };
    if conversions.len() != column_count {
        warn!(
            "{} units declared for {} columns in {}",
            conversions.len(),
            column_count,
            options.path.display()
        );
    }
    conversions.resize(column_count, UnitConversion::IDENTITY);
    Ok(conversions)
}

/// Discover whether timestamps ascend by parsing the first data rows
///
/// Stops after enough timestamp transitions, the probe window or end of
/// file. Equal consecutive timestamps are not counted.
fn probe_order<R: BufRead>(
    reader: LineReader<R>,
    lines: &LineFilter,
    delimiter: char,
    date: &DateRepresentation,
    time_zone: f64,
    station_filter: Option<&StationFilter>,
) -> std::io::Result<bool> {
    let mut source = RowSource::new(reader, lines);
    let mut resolver = DateResolver::new(date, time_zone);
    let min_tokens = date.max_column() + 1;
    let (mut ascending, mut descending) = (0usize, 0usize);
    let mut previous = None;

    while ascending + descending < PROBE_MIN_TRANSITIONS {
        let Some(row) = source.next_row()? else {
            break;
        };
        if source.lines_read() > PROBE_EXTRA_LINES {
            break;
        }

        let tokens = split_fields(&row.content, delimiter);
        if tokens.len() < min_tokens {
            continue;
        }
        if let Some(filter) = station_filter {
            if !filter.matches(&tokens) {
                continue;
            }
        }
        let Some(timestamp) = resolver.resolve(&tokens) else {
            continue;
        };

        if let Some(previous) = previous {
            if timestamp > previous {
                ascending += 1;
            } else if timestamp < previous {
                descending += 1;
            }
        }
        previous = Some(timestamp);
    }

    Ok(descending <= ascending)
}
