//! Silica CLI - shapefile packaging and Earth Engine upload tool
//!
//! Usage: silica <COMMAND>
//!
//! Commands:
//!   pack       Zip loose shapefile components, one archive per shapefile
//!   upload     Upload zipped shapefiles to Earth Engine
//!   normalize  Normalize site names into canonical join identifiers

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use silica::config::Config;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve();

    match cli.command {
        Commands::Pack { input, output } => commands::cmd_pack(
            &config,
            input.as_deref(),
            output.as_deref(),
            cli.json,
            cli.verbose,
        ),
        Commands::Upload { source, bucket } => {
            commands::cmd_upload(&config, source.as_deref(), bucket, cli.json)
        }
        Commands::Normalize { names } => commands::cmd_normalize(&names, cli.json),
    }
}
