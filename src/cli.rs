use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "idforged")]
#[command(author, version, about = "Identify catalog videos and resolve their metadata")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract identifiers from filenames without resolving them
    Identify {
        /// Files or bare filenames to identify
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Print one JSON object per path
        #[arg(long)]
        json: bool,
    },

    /// Resolve metadata for a single file and print it as JSON
    Resolve {
        /// File to resolve
        #[arg(required = true)]
        file: PathBuf,
    },

    /// Resolve every video under a directory
    Scan {
        /// Directory to scan
        #[arg(required = true)]
        dir: PathBuf,

        /// Show what would be moved without touching files
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// List registered providers and their hooks
    Providers,
}
