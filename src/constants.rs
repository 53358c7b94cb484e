//! Application constants for the CSV ingestion engine
//!
//! This module contains configuration key names, default values, lookup
//! tables and thresholds used throughout the layout resolution and row
//! ingestion stages.

// =============================================================================
// Configuration Sections and Keys
// =============================================================================

/// Configuration section holding all input keys
pub const INPUT_SECTION: &str = "Input";

/// Prefix of keys applying to every station (`CSV_DELIMITER`, ...)
pub const GLOBAL_KEY_PREFIX: &str = "CSV_";

/// Prefix of station file keys (`STATION1`, `STATION2`, ...)
pub const STATION_KEY_PREFIX: &str = "STATION";

/// Prefix of station position keys (`POSITION1`, ...) and the global fallback key
pub const POSITION_KEY: &str = "POSITION";

/// Directory holding the station files
pub const METEOPATH_KEY: &str = "METEOPATH";

/// Timezone of the timestamps found in the files, in hours
pub const TIME_ZONE_KEY: &str = "TIME_ZONE";

/// Drop unreadable lines with a warning instead of failing
pub const SILENT_ERRORS_KEY: &str = "CSV_SILENT_ERRORS";

/// Store nodata for unparseable values instead of failing
pub const ERRORS_TO_NODATA_KEY: &str = "CSV_ERRORS_TO_NODATA";

// =============================================================================
// Layout Defaults
// =============================================================================

/// Default field delimiter
pub const DEFAULT_DELIMITER: char = ',';

/// Default number of header lines
pub const DEFAULT_HEADER_LINES: usize = 1;

/// Default header line holding the column names (1-based)
pub const DEFAULT_COLUMNS_HEADERS: usize = 1;

/// Default combined date/time pattern (ISO 8601)
pub const DEFAULT_DATETIME_SPEC: &str = "YYYY-MM-DDTHH24:MI:SS";

/// Default pattern of a separate date column
pub const DEFAULT_DATE_SPEC: &str = "YYYY-MM-DD";

/// Default pattern of a separate time column
pub const DEFAULT_TIME_SPEC: &str = "HH24:MI:SS";

/// Literal tokens always interpreted as nodata
pub const NODATA_LITERALS: &[&str] = &["NAN", "NULL"];

/// Separator used when ID or NAME are assembled from several sources
pub const IDENTITY_JOIN_SEPARATOR: &str = "-";

// =============================================================================
// Header Probing
// =============================================================================

/// Lines read past the declared header while discovering the file layout
pub const PROBE_EXTRA_LINES: usize = 1000;

/// Timestamp transitions needed before the file order is decided
pub const PROBE_MIN_TRANSITIONS: usize = 10;

/// Bytes inspected when detecting the end-of-line style
pub const EOL_DETECTION_WINDOW: usize = 64 * 1024;

// =============================================================================
// Position Index
// =============================================================================

/// A seek point is recorded every this many physical lines
pub const SEEK_POINT_EVERY_N_LINES: usize = 2000;

// =============================================================================
// Fallback Year Wrapping
// =============================================================================

/// Day of year (1 October in a common year) below which wrapping stops
pub const AUTO_WRAP_DAY_OF_YEAR: f64 = 273.0;

/// Month below which wrapping stops
pub const AUTO_WRAP_MONTH: u32 = 10;

// =============================================================================
// Decimal Date Epochs
// =============================================================================

/// Julian date of 1970-01-01T00:00 UTC
pub const JULIAN_DATE_UNIX_EPOCH: f64 = 2_440_587.5;

/// Offset between julian and modified julian dates
pub const MODIFIED_JULIAN_OFFSET: f64 = 2_400_000.5;

/// Excel serial day of 1970-01-01 (1900 date system)
pub const EXCEL_DATE_UNIX_EPOCH: f64 = 25_569.0;

/// Matlab datenum of 1970-01-01
pub const MATLAB_DATE_UNIX_EPOCH: f64 = 719_529.0;

/// Days between 1900-01-01 and 1970-01-01
pub const RFC868_DATE_UNIX_EPOCH: f64 = 25_567.0;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

// =============================================================================
// Units
// =============================================================================

/// Freezing point of water in Kelvin
pub const WATER_FREEZING_POINT_K: f64 = 273.15;

/// Units that are already SI and never converted
pub const SI_UNITS: &[&str] = &[
    "TS", "RN", "W/M2", "M/S", "K", "M", "N", "V", "VOLT", "DEG", "°", "KG/M2",
];

/// Unit markers meaning "dimensionless" or "unknown" that are never converted
pub const EMPTY_UNITS: &[&str] = &["", "1", "-", "0 OR 1", "0/1", "??"];

// =============================================================================
// Parameter Names
// =============================================================================

/// Canonical parameter names that pass through canonicalization unchanged
pub const CANONICAL_PARAMETERS: &[&str] = &[
    "P", "TA", "RH", "TSG", "TSS", "HS", "VW", "DW", "VW_MAX", "RSWR", "ISWR", "ILWR", "TAU_CLD",
    "PSUM", "PSUM_PH", "PSUM_L", "PSUM_S",
];

/// Prefix synonyms for canonical parameter names, checked in order
pub const PARAMETER_SYNONYMS: &[(&str, &str)] = &[
    ("TEMPERATURE_AIR", "TA"),
    ("AIRTEMP", "TA"),
    ("TEMPERATURA_ARIA", "TA"),
    ("SOIL_TEMPERATURE", "TSG"),
    ("SOILTEMP", "TSG"),
    ("PRECIPITATION", "PSUM"),
    ("PRECIPITAZIONE", "PSUM"),
    ("PREC", "PSUM"),
    ("REFLECTED_RADIATION", "RSWR"),
    ("RADIAZIONE_SOLARE_RIFLESSA", "RSWR"),
    ("INCOMING_RADIATION", "ISWR"),
    ("INCOMINGSHORTWAVERADIATION", "ISWR"),
    ("RADIAZIONE_SOLARE_INCIDENTE", "ISWR"),
    ("WIND_DIRECTION", "DW"),
    ("DIREZIONE_VENTO", "DW"),
    ("WD", "DW"),
    ("RELATIVE_HUMIDITY", "RH"),
    ("RELATIVEHUMIDITY", "RH"),
    ("UMIDIT_RELATIVA", "RH"),
    ("WS_MAX", "VW_MAX"),
    ("WIND_VELOCITY", "VW"),
    ("VELOCIT_VENTO", "VW"),
    ("WS", "VW"),
    ("PRESSURE", "P"),
    ("STATIONPRESSURE", "P"),
    ("INCOMING_LONGWAVE", "ILWR"),
    ("INCOMINGLONGWAVERADIATION", "ILWR"),
    ("SNOWSURFACETEMPERATURE", "TSS"),
];
