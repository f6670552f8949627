use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Silica - shapefile packaging and Earth Engine upload tool
#[derive(Parser, Debug)]
#[command(name = "silica")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Zip loose shapefile components, one archive per shapefile
    Pack {
        /// Directory of loose shapefile components
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory to write the zip archives into
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Upload zipped shapefiles to Earth Engine, skipping existing assets
    Upload {
        /// Directory of zip archives to upload
        #[arg(short, long, conflicts_with = "bucket")]
        source: Option<PathBuf>,

        /// Ingest staged objects from a Cloud Storage bucket instead;
        /// pass --bucket=gs://... to override the configured bucket
        #[arg(long)]
        bucket: Option<Option<String>>,
    },

    /// Normalize site names into canonical join identifiers
    Normalize {
        /// Names to normalize (read from stdin when omitted)
        names: Vec<String>,
    },
}
