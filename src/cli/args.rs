//! Command-line argument definitions for the meteo CSV ingester
//!
//! This module defines the CLI interface using the clap derive API.

use crate::app::models::Timestamp;
use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the meteo CSV ingester
///
/// Reads the station files declared in a TOML configuration and turns their
/// rows into timestamped station records.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "meteo-csv",
    version,
    about = "Ingest delimited meteorological time series into station records",
    long_about = "Reads arbitrary delimited meteorological time-series files as declared in a \
                  TOML configuration (column names, units, date formats, station metadata) and \
                  reports the timestamped records of every station over a time window."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Read the records of every configured station
    Ingest(IngestArgs),
    /// List the configured stations and their file layouts
    Stations(StationsArgs),
}

/// Arguments for the ingest command
#[derive(Debug, Clone, Parser)]
pub struct IngestArgs {
    /// Path to configuration file
    ///
    /// TOML file whose `[Input]` table holds METEOPATH, STATION<n> and the
    /// CSV_* layout keys.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: PathBuf,

    /// First instant to read (UTC), inclusive
    ///
    /// Either a date (YYYY-MM-DD) or a date and time (YYYY-MM-DDTHH:MM:SS).
    /// Defaults to the beginning of every file.
    #[arg(
        short = 's',
        long = "start",
        value_name = "TIME",
        value_parser = parse_start,
        help = "First instant to read (UTC, inclusive)"
    )]
    pub start: Option<Timestamp>,

    /// Last instant to read (UTC), inclusive
    ///
    /// A bare date stands for the last second of that day. Defaults to the
    /// end of every file.
    #[arg(
        short = 'e',
        long = "end",
        value_name = "TIME",
        value_parser = parse_end,
        help = "Last instant to read (UTC, inclusive)"
    )]
    pub end: Option<Timestamp>,

    /// Number of records to print per station
    #[arg(
        short = 'n',
        long = "show",
        value_name = "COUNT",
        default_value_t = 0,
        help = "Print the first COUNT records of each station"
    )]
    pub show: usize,

    /// Number of stations read concurrently
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        help = "Number of stations read concurrently (default: CPU count)"
    )]
    pub workers: Option<usize>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the stations command
#[derive(Debug, Clone, Parser)]
pub struct StationsArgs {
    /// Path to configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: PathBuf,

    /// Include the resolved column layout of every file
    #[arg(long = "detailed", help = "Show the column layout of every station file")]
    pub detailed: bool,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

impl IngestArgs {
    /// Validate the ingest command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.config_file.exists() {
            return Err(Error::configuration(format!(
                "Config file does not exist: {}",
                self.config_file.display()
            )));
        }

        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(Error::configuration(
                    "Start time must not be after end time".to_string(),
                ));
            }
        }

        if self.workers == Some(0) {
            return Err(Error::configuration(
                "Number of workers must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Number of stations read concurrently
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            log_level(self.verbose)
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl StationsArgs {
    /// Validate the stations command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.config_file.exists() {
            return Err(Error::configuration(format!(
                "Config file does not exist: {}",
                self.config_file.display()
            )));
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose)
    }
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Parse a start bound; a bare date means midnight
pub fn parse_start(value: &str) -> Result<Timestamp> {
    parse_time_bound(value, NaiveTime::MIN)
}

/// Parse an end bound; a bare date means the last second of the day
pub fn parse_end(value: &str) -> Result<Timestamp> {
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59)
        .ok_or_else(|| Error::configuration("Invalid end of day".to_string()))?;
    parse_time_bound(value, end_of_day)
}

fn parse_time_bound(value: &str, date_only_time: NaiveTime) -> Result<Timestamp> {
    let value = value.trim();
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(datetime.and_utc());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(datetime.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(date_only_time).and_utc())
        .map_err(|_| {
            Error::configuration(format!(
                "Invalid time '{value}', expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS"
            ))
        })
}
