//! Stations command implementation
//!
//! Lists the identity and position of every configured station and,
//! optionally, the resolved layout of its file.

use std::time::Instant;

use colored::*;
use tokio::task;
use tracing::{debug, info};

use super::shared::{IngestSummary, load_ingestor, setup_logging};
use crate::app::models::{Location, StationIdentity};
use crate::app::services::layout_resolver::LayoutDescriptor;
use crate::cli::args::StationsArgs;

/// Stations command runner
pub async fn run_stations(args: StationsArgs) -> anyhow::Result<IngestSummary> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), false)?;
    debug!("Stations arguments: {:?}", args);
    args.validate()?;

    let config_file = args.config_file.clone();
    let ingestor = task::spawn_blocking(move || load_ingestor(&config_file)).await??;
    info!("Resolved {} station layouts", ingestor.station_count());

    println!(
        "{} {}",
        "Configured stations:".bright_green().bold(),
        ingestor.station_count().to_string().bright_white().bold()
    );
    for layout in ingestor.layouts() {
        print_station(layout.station(), layout);
        if args.detailed {
            print_layout(layout);
        }
    }

    Ok(IngestSummary {
        stations_read: ingestor.station_count(),
        processing_time: start_time.elapsed(),
        ..Default::default()
    })
}

fn print_station(station: &StationIdentity, layout: &LayoutDescriptor) {
    println!(
        "\n  {} {} ({})",
        station.id.bright_white().bold(),
        station.name,
        layout.path().display()
    );
    println!("    {} {}", "Position:".bright_cyan(), describe_location(&station.location));
    if let (Some(slope), Some(azimuth)) = (station.slope, station.azimuth) {
        println!("    {} {slope}° towards {azimuth}°", "Slope:".bright_cyan());
    }
    println!(
        "    {} {}",
        "Fields:".bright_cyan(),
        layout.field_names().join(", ")
    );
}

fn print_layout(layout: &LayoutDescriptor) {
    println!("    {} {}", "Dates:".bright_cyan(), layout.date().describe());
    println!(
        "    {} {}",
        "Order:".bright_cyan(),
        if layout.is_ascending() {
            "ascending"
        } else {
            "descending"
        }
    );
    println!(
        "    {} '{}' ({} header lines, data from line {})",
        "Delimiter:".bright_cyan(),
        layout.delimiter(),
        layout.header_lines(),
        layout.data_line() + 1
    );
    for (column, role) in layout.roles().iter().enumerate() {
        let conversion = layout.conversion(column);
        if conversion.is_identity() {
            println!("      {:>3}: {}", column + 1, role.label());
        } else {
            println!(
                "      {:>3}: {} (x{} + {})",
                column + 1,
                role.label(),
                conversion.multiplier,
                conversion.offset
            );
        }
    }
    if let Some(filter) = layout.station_filter() {
        println!(
            "    {} column {} = '{}'",
            "Station filter:".bright_cyan(),
            filter.column + 1,
            filter.value
        );
    }
}

/// Human-readable position
pub fn describe_location(location: &Location) -> String {
    let altitude = location
        .altitude
        .map(|altitude| format!(", {altitude} m"))
        .unwrap_or_default();
    match (
        location.latitude,
        location.longitude,
        location.easting,
        location.northing,
    ) {
        (Some(latitude), Some(longitude), _, _) => {
            format!("lat {latitude}, lon {longitude}{altitude}")
        }
        (_, _, Some(easting), Some(northing)) => format!("x {easting}, y {northing}{altitude}"),
        _ => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_location() {
        assert_eq!(
            describe_location(&Location::from_lat_lon(46.83, 9.81, Some(2540.0))),
            "lat 46.83, lon 9.81, 2540 m"
        );
        assert_eq!(
            describe_location(&Location::from_easting_northing(780000.0, 189000.0, None)),
            "x 780000, y 189000"
        );
        assert_eq!(describe_location(&Location::default()), "unknown");
    }
}
