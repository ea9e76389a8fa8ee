use clap::Parser;
use metar_processor::cli::{run, Cli};
use metar_processor::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
