//! Typus command-line interface

use clap::Parser;
use typus_cli::commands::Commands;
use typus_cli::CliResult;

/// Typographic cleanup for Russian and English text
#[derive(Debug, Parser)]
#[command(name = "typus", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
