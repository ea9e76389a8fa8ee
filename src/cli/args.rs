use crate::utils::constants::{DEFAULT_DATA_DIR, DEFAULT_STATION};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "metar-processor")]
#[command(about = "Converter for raw METAR archives into per-station CSV datasets")]
#[command(version, disable_version_flag = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(
        short = 'v',
        long = "version",
        action = ArgAction::Version,
        help = "Show module version and exit"
    )]
    pub version: Option<bool>,

    #[arg(long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a station's raw report files into metars.csv
    ToCsv {
        /// ICAO code of the station data to process
        #[arg(default_value = DEFAULT_STATION)]
        station: String,

        #[arg(
            long,
            default_value = DEFAULT_DATA_DIR,
            help = "Root directory holding per-station data"
        )]
        data_dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_csv_defaults() {
        let cli = Cli::try_parse_from(["metar-processor", "to-csv"]).unwrap();
        match cli.command {
            Some(Commands::ToCsv { station, data_dir }) => {
                assert_eq!(station, "mroc");
                assert_eq!(data_dir, PathBuf::from("data"));
            }
            _ => panic!("expected to-csv command"),
        }
    }

    #[test]
    fn test_to_csv_station_argument() {
        let cli =
            Cli::try_parse_from(["metar-processor", "to-csv", "mrlb", "--data-dir", "/tmp/d"])
                .unwrap();
        match cli.command {
            Some(Commands::ToCsv { station, data_dir }) => {
                assert_eq!(station, "mrlb");
                assert_eq!(data_dir, PathBuf::from("/tmp/d"));
            }
            _ => panic!("expected to-csv command"),
        }
    }

    #[test]
    fn test_version_flag_exits() {
        let err = Cli::try_parse_from(["metar-processor", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
