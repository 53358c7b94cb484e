//! Per-station file options from configuration keys
//!
//! Every `CSV_KEY` applies to all stations; `CSV<n>_KEY` overrides it for
//! station `n`. The date/time keys are resolved as one group, see
//! [`StationKeys`].

use std::path::Path;

use crate::app::services::date_resolver::{DecimalDateKind, FixedYear};
use crate::app::services::layout_resolver::{
    DateOptions, FileOptions, parse_delimiter, parse_line_ranges,
};
use crate::config::{ConfigStore, StationKeys, parse_position};
use crate::constants::{INPUT_SECTION, POSITION_KEY};
use crate::Result;

/// Characters removed from every line when `DEQUOTE` is set
const QUOTE_CHARS: [char; 2] = ['"', '\''];

/// Build the options of station `station` whose file is `file_name`
///
/// `file_name` is relative to `meteopath`. The timezone applies to every
/// timestamp of the file.
pub fn station_options<C: ConfigStore>(
    config: &C,
    meteopath: &Path,
    station: &str,
    file_name: &str,
    time_zone: f64,
) -> Result<FileOptions> {
    let keys = StationKeys::new(config, INPUT_SECTION, station);
    let mut options = FileOptions::new(meteopath.join(file_name.trim()));
    options.station_index = station.parse().ok();
    options.time_zone = time_zone;

    // Station metadata
    let position = config
        .get_raw(INPUT_SECTION, &format!("{POSITION_KEY}{station}"))
        .or_else(|| config.get_raw(INPUT_SECTION, POSITION_KEY))
        .filter(|spec| !spec.trim().is_empty());
    if let Some(spec) = position {
        options.metadata.location = parse_position(&spec)?;
    }
    options.metadata.name = keys.get_string("NAME")?;
    options.metadata.id = keys.get_string("ID")?;
    options.metadata.slope = keys.get("SLOPE")?;
    options.metadata.azimuth = keys.get("AZIMUTH")?;
    if let Some(nodata) = keys.get_string("NODATA")? {
        options.metadata.nodata = vec![nodata];
    }

    // Line handling
    if let Some(delimiter) = keys.get_string("DELIMITER")? {
        options.delimiter = parse_delimiter(&delimiter)?;
    }
    if let Some(delimiter) = keys.get_string("HEADER_DELIMITER")? {
        options.header_delimiter = Some(parse_delimiter(&delimiter)?);
    }
    if keys.get_or("DEQUOTE", false)? {
        options.purge_chars.extend(QUOTE_CHARS);
    }
    if let Some(purge) = keys.get_string("PURGE_CHARS")? {
        options
            .purge_chars
            .extend(purge.chars().filter(|c| !c.is_whitespace()));
    }
    options.comments_marker = keys.get("COMMENTS_MK")?;
    options.header_repeat_marker = keys.get_string("HEADER_REPEAT_MK")?;
    if let Some(ranges) = keys.get_string("EXCLUDE_LINES")? {
        options.exclude_lines = parse_line_ranges(&ranges)?;
    }

    // Header and columns
    options.header_lines = keys.get_or("NR_HEADERS", options.header_lines)?;
    if let Some(line) = keys.get("COLUMNS_HEADERS")? {
        options.columns_header = Some(line);
    }
    options.units_header = keys.get("UNITS_HEADERS")?;
    options.fields = keys.get_or("FIELDS", Vec::new())?;
    options.skip_fields = keys.get_or("SKIP_FIELDS", Vec::new())?;
    options.filter_id = keys.get_string("FILTER_ID")?;
    options.single_param_index = keys.get("SINGLE_PARAM_INDEX")?;
    options.special_headers = keys.get_string("SPECIAL_HEADERS")?;
    options.filename_spec = keys.get_string("FILENAME_SPEC")?;

    // Units
    options.units_offset = keys.get_or("UNITS_OFFSET", Vec::new())?;
    options.units_multiplier = keys.get_or("UNITS_MULTIPLIER", Vec::new())?;
    options.units = keys.get_string("UNITS")?;

    options.date = date_options(&keys)?;
    Ok(options)
}

fn date_options<C: ConfigStore>(keys: &StationKeys<'_, C>) -> Result<DateOptions> {
    let decimal_type = keys
        .get_string("DECIMALDATE_TYPE")?
        .map(|kind| kind.parse::<DecimalDateKind>())
        .transpose()?;

    let fixed_year = match keys.get::<i32>("FALLBACK_YEAR")? {
        Some(year) => Some(FixedYear {
            year,
            auto_wrap: keys.get_or("FALLBACK_AUTO_WRAP", true)?,
        }),
        None => None,
    };

    Ok(DateOptions {
        decimal_type,
        datetime_spec: keys.get_string("DATETIME_SPEC")?,
        date_spec: keys.get_string("DATE_SPEC")?,
        time_spec: keys.get_string("TIME_SPEC")?,
        fixed_year,
    })
}
