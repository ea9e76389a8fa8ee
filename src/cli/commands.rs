use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::processors::StationProcessor;
use crate::utils::constants::OUTPUT_FILE;
use std::path::Path;

pub fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.verbose);

    match cli.command {
        Some(Commands::ToCsv { station, data_dir }) => to_csv(&station, &data_dir),
        None => {
            println!("metar-processor CLI");
            Ok(())
        }
    }
}

fn to_csv(station: &str, data_dir: &Path) -> Result<()> {
    println!("Processing data for {}...", station.to_uppercase());

    let station_dir = data_dir.join(station.to_lowercase());
    let processor = StationProcessor::new();
    let summary = processor.process(&station_dir)?;

    println!("{}", summary.summary());
    println!(
        "Data processed successfully, you can find the CSV file at {}.",
        station_dir.join(OUTPUT_FILE).display()
    );

    Ok(())
}

/// Set up structured logging on stderr, keeping stdout for the progress
/// bars and summaries.
fn setup_logging(verbose: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("metar_processor={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
