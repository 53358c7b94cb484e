//! Configuration access and per-station key resolution.
//!
//! The engine reads its settings through the [`ConfigStore`] trait: raw
//! string values addressed by section and key, with typed accessors on top.
//! [`KeyValueConfig`] is the in-memory implementation, buildable in code or
//! loaded from a TOML document whose tables are sections.
//!
//! Station keys follow a two-level lookup: `CSV<n>_KEY` for station `n`
//! overrides `CSV_KEY` for every station. [`StationKeys`] implements it.

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info};

use crate::app::models::Location;
use crate::constants::GLOBAL_KEY_PREFIX;
use crate::{Error, Result};

/// Conversion from a raw configuration string
pub trait FromConfigValue: Sized {
    fn from_config_value(raw: &str) -> Option<Self>;
}

impl FromConfigValue for String {
    fn from_config_value(raw: &str) -> Option<Self> {
        Some(raw.trim().to_string())
    }
}

impl FromConfigValue for f64 {
    fn from_config_value(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FromConfigValue for i32 {
    fn from_config_value(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FromConfigValue for usize {
    fn from_config_value(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FromConfigValue for bool {
    fn from_config_value(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

impl FromConfigValue for char {
    fn from_config_value(raw: &str) -> Option<Self> {
        let mut chars = raw.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

/// Whitespace-separated lists
impl<T: FromConfigValue> FromConfigValue for Vec<T> {
    fn from_config_value(raw: &str) -> Option<Self> {
        raw.split_whitespace().map(T::from_config_value).collect()
    }
}

/// Read access to sectioned key/value configuration
///
/// Implementations provide raw lookups and key listing; the typed accessors
/// are derived from them. Section and key matching rules are up to the
/// implementation.
pub trait ConfigStore {
    /// Raw value of a key, `None` when absent
    fn get_raw(&self, section: &str, key: &str) -> Option<String>;

    /// Every key of a section
    fn keys(&self, section: &str) -> Vec<String>;

    fn key_exists(&self, section: &str, key: &str) -> bool {
        self.get_raw(section, key).is_some()
    }

    /// Typed value of a key, `None` when absent, an error when malformed
    fn get<T: FromConfigValue>(&self, section: &str, key: &str) -> Result<Option<T>>
    where
        Self: Sized,
    {
        match self.get_raw(section, key) {
            None => Ok(None),
            Some(raw) => T::from_config_value(&raw).map(Some).ok_or_else(|| {
                Error::configuration(format!(
                    "Invalid value '{raw}' for key {key} in section [{section}]"
                ))
            }),
        }
    }

    /// Typed value of a key, or `default` when absent
    fn get_or<T: FromConfigValue>(&self, section: &str, key: &str, default: T) -> Result<T>
    where
        Self: Sized,
    {
        Ok(self.get(section, key)?.unwrap_or(default))
    }

    /// Typed value of a mandatory key
    fn require<T: FromConfigValue>(&self, section: &str, key: &str) -> Result<T>
    where
        Self: Sized,
    {
        self.get(section, key)?.ok_or_else(|| {
            Error::configuration(format!("Missing key {key} in section [{section}]"))
        })
    }
}

/// TOML document: tables are sections, scalars and arrays are values
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct ConfigFile {
    sections: HashMap<String, HashMap<String, toml::Value>>,
}

/// In-memory configuration with case-insensitive sections and keys
#[derive(Debug, Clone, Default)]
pub struct KeyValueConfig {
    sections: HashMap<String, HashMap<String, String>>,
}

impl KeyValueConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any previous one
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        self.sections
            .entry(section.to_uppercase())
            .or_default()
            .insert(key.to_uppercase(), value.into());
    }

    /// Builder form of [`set`](Self::set)
    pub fn with(mut self, section: &str, key: &str, value: impl Into<String>) -> Self {
        self.set(section, key, value);
        self
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Failed to parse configuration: {e}")))?;

        let mut config = Self::new();
        for (section, values) in file.sections {
            for (key, value) in values {
                let raw = toml_value_to_string(&value).ok_or_else(|| {
                    Error::configuration(format!(
                        "Unsupported value for key {key} in section [{section}]"
                    ))
                })?;
                config.set(&section, &key, raw);
            }
        }
        Ok(config)
    }

    /// Load a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }
}

impl ConfigStore for KeyValueConfig {
    fn get_raw(&self, section: &str, key: &str) -> Option<String> {
        self.sections
            .get(&section.to_uppercase())?
            .get(&key.to_uppercase())
            .cloned()
    }

    fn keys(&self, section: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .sections
            .get(&section.to_uppercase())
            .map(|values| values.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

fn toml_value_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(text) => Some(text.clone()),
        toml::Value::Integer(number) => Some(number.to_string()),
        toml::Value::Float(number) => Some(number.to_string()),
        toml::Value::Boolean(flag) => Some(flag.to_string()),
        toml::Value::Datetime(datetime) => Some(datetime.to_string()),
        toml::Value::Array(items) => items
            .iter()
            .map(toml_value_to_string)
            .collect::<Option<Vec<_>>>()
            .map(|items| items.join(" ")),
        toml::Value::Table(_) => None,
    }
}

/// Keys that select the date/time representation; resolved as one group
pub const DATE_TIME_KEYS: &[&str] = &["DECIMALDATE_TYPE", "DATETIME_SPEC", "DATE_SPEC", "TIME_SPEC"];

/// Per-station view of the `CSV_` keys of a section
#[derive(Debug)]
pub struct StationKeys<'a, C> {
    config: &'a C,
    section: &'a str,
    station_prefix: String,
    date_prefix: String,
}

impl<'a, C: ConfigStore> StationKeys<'a, C> {
    /// View for station number `station` (as in `STATION<n>`)
    ///
    /// The date/time keys come from the station prefix when any of them is
    /// set for the station, otherwise from the global prefix.
    pub fn new(config: &'a C, section: &'a str, station: &str) -> Self {
        let station_prefix = format!("CSV{station}_");
        let has_station_dates = DATE_TIME_KEYS
            .iter()
            .any(|key| config.key_exists(section, &format!("{station_prefix}{key}")));
        let date_prefix = if has_station_dates {
            station_prefix.clone()
        } else {
            GLOBAL_KEY_PREFIX.to_string()
        };
        debug!(
            "Station {} reads date/time keys from {}*",
            station, date_prefix
        );

        Self {
            config,
            section,
            station_prefix,
            date_prefix,
        }
    }

    /// Full key name holding `key` for this station, if any
    fn resolve(&self, key: &str) -> Option<String> {
        let exists = |prefix: &str| {
            let full = format!("{prefix}{key}");
            self.config.key_exists(self.section, &full).then_some(full)
        };
        if DATE_TIME_KEYS.contains(&key) {
            return exists(&self.date_prefix);
        }
        exists(&self.station_prefix).or_else(|| exists(GLOBAL_KEY_PREFIX))
    }

    pub fn exists(&self, key: &str) -> bool {
        self.resolve(key).is_some()
    }

    pub fn get<T: FromConfigValue>(&self, key: &str) -> Result<Option<T>> {
        match self.resolve(key) {
            Some(full) => self.config.get(self.section, &full),
            None => Ok(None),
        }
    }

    pub fn get_or<T: FromConfigValue>(&self, key: &str, default: T) -> Result<T> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Non-empty string value
    pub fn get_string(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .get::<String>(key)?
            .filter(|value| !value.is_empty()))
    }
}

/// Parse a position declaration: `latlon (lat, lon[, alt])` or
/// `xy (easting, northing[, alt])`
pub fn parse_position(spec: &str) -> Result<Location> {
    let pattern = Regex::new(
        r"(?i)^\s*(latlon|xy)\s*\(\s*([^,()]+?)\s*,\s*([^,()]+?)\s*(?:,\s*([^,()]+?)\s*)?\)\s*$",
    )
    .map_err(|e| Error::configuration(format!("Invalid position pattern: {e}")))?;

    let invalid = || Error::configuration(format!("Invalid position specification '{spec}'"));
    let captures = pattern.captures(spec).ok_or_else(invalid)?;

    let number = |index: usize| -> Result<Option<f64>> {
        captures
            .get(index)
            .map(|value| value.as_str().parse::<f64>().map_err(|_| invalid()))
            .transpose()
    };
    let first = number(2)?.ok_or_else(invalid)?;
    let second = number(3)?.ok_or_else(invalid)?;
    let altitude = number(4)?;

    if captures[1].eq_ignore_ascii_case("latlon") {
        Ok(Location::from_lat_lon(first, second, altitude))
    } else {
        Ok(Location::from_easting_northing(first, second, altitude))
    }
}
