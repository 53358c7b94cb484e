//! Ingest command implementation
//!
//! Stations are read concurrently on the blocking thread pool, all through
//! the ingestor's shared position index.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, bail};
use colored::*;
use futures::stream::{self, StreamExt};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use tokio::task;
use tracing::{debug, error, info};

use super::shared::{IngestSummary, load_ingestor, setup_logging};
use crate::app::models::{DateRange, Record};
use crate::app::services::row_pipeline::ParseResult;
use crate::cli::args::IngestArgs;

/// Ingest command runner
///
/// Resolves every configured station, reads the requested window and prints
/// a summary. Fails when any station could not be read.
pub async fn run_ingest(args: IngestArgs) -> anyhow::Result<IngestSummary> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), args.quiet)?;
    debug!("Ingest arguments: {:?}", args);
    args.validate()?;

    let config_file = args.config_file.clone();
    let ingestor = task::spawn_blocking(move || load_ingestor(&config_file))
        .await
        .context("Station configuration task failed")??;
    let ingestor = Arc::new(ingestor);

    let range = DateRange::new(
        args.start.unwrap_or(DateRange::all().start),
        args.end.unwrap_or(DateRange::all().end),
    )?;
    let station_count = ingestor.station_count();
    let workers = args.worker_count().min(station_count.max(1));
    info!(
        "Reading {} stations with {} workers",
        station_count, workers
    );

    let progress_bar = if args.show_progress() {
        let pb = ProgressBar::new(station_count as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        pb.set_message("Reading stations...");
        Some(pb)
    } else {
        None
    };

    let mut results = stream::iter(0..station_count)
        .map(|station| {
            let ingestor = Arc::clone(&ingestor);
            async move {
                let result =
                    task::spawn_blocking(move || ingestor.read_station(station, range)).await;
                (station, result)
            }
        })
        .buffer_unordered(workers)
        .inspect(|_| {
            if let Some(pb) = &progress_bar {
                pb.inc(1);
            }
        })
        .collect::<Vec<_>>()
        .await;
    results.sort_by_key(|(station, _)| *station);

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Done");
    }

    let stations = ingestor.read_stations();
    let mut summary = IngestSummary::default();
    let mut failures = Vec::new();

    for (station, result) in results {
        let id = &stations[station].id;
        match result {
            Ok(Ok(parsed)) => {
                summary.add_station(&parsed.stats);
                if args.show > 0 && !args.quiet {
                    print_records(id, &parsed, args.show);
                }
            }
            Ok(Err(e)) => {
                error!("Failed to read station {}: {}", id, e);
                summary.stations_failed += 1;
                failures.push(format!("{id}: {e}"));
            }
            Err(e) => {
                error!("Reader task for station {} failed: {}", id, e);
                summary.stations_failed += 1;
                failures.push(format!("{id}: {e}"));
            }
        }
    }

    summary.processing_time = start_time.elapsed();
    if !args.quiet {
        print_summary(&summary);
    }

    if !failures.is_empty() {
        bail!(
            "{} of {} stations could not be read:\n  {}",
            failures.len(),
            station_count,
            failures.join("\n  ")
        );
    }
    Ok(summary)
}

/// Print the first `count` records of a station
fn print_records(id: &str, parsed: &ParseResult, count: usize) {
    println!(
        "\n{} {} ({} records)",
        "Station".bright_cyan(),
        id.bright_white().bold(),
        parsed.records.len()
    );
    for record in parsed.records.iter().take(count) {
        println!("  {}", format_record(record));
    }
    if parsed.records.len() > count {
        println!("  ...");
    }
}

/// One line per record: timestamp then `FIELD=value` pairs
pub fn format_record(record: &Record) -> String {
    let values: Vec<String> = record
        .values
        .iter()
        .map(|(field, value)| match value {
            Some(value) => format!("{field}={value}"),
            None => format!("{field}=nodata"),
        })
        .collect();
    format!(
        "{} {}",
        record.timestamp.format("%Y-%m-%dT%H:%M:%SZ"),
        values.join(" ")
    )
}

fn print_summary(summary: &IngestSummary) {
    println!("\n{}", "Ingestion Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Stations read:".bright_cyan(),
        summary.stations_read.to_string().bright_white().bold()
    );
    if summary.stations_failed > 0 {
        println!(
            "  {} {}",
            "Stations failed:".bright_red(),
            summary.stations_failed.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {}",
        "Records:".bright_cyan(),
        summary.records.to_string().bright_white().bold()
    );
    println!("  {} {}", "Lines read:".bright_cyan(), summary.lines_read);
    if summary.rows_skipped > 0 {
        println!(
            "  {} {}",
            "Rows skipped:".bright_yellow(),
            summary.rows_skipped
        );
    }
    if summary.values_to_nodata > 0 {
        println!(
            "  {} {}",
            "Values set to nodata:".bright_yellow(),
            summary.values_to_nodata
        );
    }
    println!(
        "  {} {}",
        "Processing time:".bright_cyan(),
        HumanDuration(summary.processing_time)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StationIdentity;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    #[test]
    fn test_format_record() {
        let mut values = BTreeMap::new();
        values.insert("RH".to_string(), None);
        values.insert("TA".to_string(), Some(273.35));
        let record = Record {
            timestamp: Utc.with_ymd_and_hms(2020, 1, 5, 8, 30, 0).unwrap(),
            station: Arc::new(StationIdentity::default()),
            values,
        };

        assert_eq!(
            format_record(&record),
            "2020-01-05T08:30:00Z RH=nodata TA=273.35"
        );
    }
}
