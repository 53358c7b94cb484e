//! Command implementations for the meteo CSV ingester CLI
//!
//! Each command lives in its own module:
//! - `ingest`: parallel range reads with progress reporting
//! - `stations`: station identities and resolved file layouts

pub mod ingest;
pub mod shared;
pub mod stations;

pub use shared::IngestSummary;

use crate::cli::args::Commands;

/// Dispatch to the handler of the selected subcommand
pub async fn run(command: Commands) -> anyhow::Result<IngestSummary> {
    match command {
        Commands::Ingest(ingest_args) => ingest::run_ingest(ingest_args).await,
        Commands::Stations(stations_args) => stations::run_stations(stations_args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_re_export() {
        let summary = IngestSummary::default();
        assert_eq!(summary.stations_read, 0);
        assert_eq!(summary.records, 0);
    }
}
