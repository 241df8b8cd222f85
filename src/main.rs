//! `s2match` CLI entry point.

use anyhow::Result;
use clap::Parser;

use s2match_core::cli::{commands::compare, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compare(args) => compare::run(args),
    }
}
