//! Shared components for CLI commands
//!
//! Summary statistics, logging setup and configuration loading used by
//! every command.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use tracing::debug;

use crate::app::services::row_pipeline::ParseStats;
use crate::config::KeyValueConfig;
use crate::CsvIngestor;

/// Statistics reported at the end of a command
#[derive(Debug, Clone, Default)]
pub struct IngestSummary {
    /// Stations read successfully
    pub stations_read: usize,
    /// Stations whose read failed
    pub stations_failed: usize,
    /// Records produced over all stations
    pub records: usize,
    /// Physical lines read over all stations
    pub lines_read: usize,
    /// Rows dropped because of row-level errors
    pub rows_skipped: usize,
    /// Values replaced by nodata
    pub values_to_nodata: usize,
    /// Stations whose read started from a seek point
    pub resumed_reads: usize,
    /// Total processing time
    pub processing_time: Duration,
}

impl IngestSummary {
    /// Add the statistics of one station read
    pub fn add_station(&mut self, stats: &ParseStats) {
        self.stations_read += 1;
        self.records += stats.rows_parsed;
        self.lines_read += stats.lines_read;
        self.rows_skipped += stats.rows_skipped;
        self.values_to_nodata += stats.values_to_nodata;
        if stats.resumed {
            self.resumed_reads += 1;
        }
    }

    /// Share of stations read successfully, as a percentage
    pub fn success_rate(&self) -> f64 {
        let total = self.stations_read + self.stations_failed;
        if total == 0 {
            0.0
        } else {
            (self.stations_read as f64 / total as f64) * 100.0
        }
    }
}

/// Set up structured logging to stderr
pub fn setup_logging(log_level: &str, quiet: bool) -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("meteo_csv_ingest={}", log_level)));

    if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load a TOML configuration and resolve the layout of every station file
pub fn load_ingestor(config_file: &Path) -> anyhow::Result<CsvIngestor> {
    let config = KeyValueConfig::load(config_file)
        .with_context(|| format!("Failed to load configuration {}", config_file.display()))?;
    CsvIngestor::from_config(&config).with_context(|| {
        format!(
            "Failed to configure stations from {}",
            config_file.display()
        )
    })
}
