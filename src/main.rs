use clap::Parser;
use meteo_csv_ingest::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result: anyhow::Result<_> = runtime.block_on(async {
        tokio::select! {
            result = commands::run(command) => result,
            signal = tokio::signal::ctrl_c() => {
                signal?;
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(anyhow::anyhow!("Ingestion interrupted by user"))
            }
        }
    });

    match result {
        Ok(_summary) => {
            // Summary has already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Meteo CSV Ingest - Delimited Meteorological Time Series Reader");
    println!("===============================================================");
    println!();
    println!("Read station files of arbitrary delimited layout, as declared in a TOML");
    println!("configuration, into timestamped station records.");
    println!();
    println!("USAGE:");
    println!("    meteo-csv <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    ingest      Read the records of every configured station");
    println!("    stations    List the configured stations and their file layouts");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Read January 2020 and print the first records of each station:");
    println!("    meteo-csv ingest --config io.toml --start 2020-01-01 --end 2020-01-31 --show 5");
    println!();
    println!("    # Show how every station file was interpreted:");
    println!("    meteo-csv stations --config io.toml --detailed");
    println!();
    println!("For detailed help on any command, use:");
    println!("    meteo-csv <COMMAND> --help");
}
