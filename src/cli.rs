use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "classcarve")]
#[command(author, version, about = "Carve embedded class files out of binary dumps")]
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
    /// Extract class fragments from a binary file into a JAR
    Extract {
        /// Binary file to scan
        #[arg(required = true, env = "INPUT_PATH")]
        input: PathBuf,

        /// Archive to write (default: extracted_classes.jar)
        #[arg(short, long, env = "OUTPUT_PATH")]
        output: Option<PathBuf>,

        /// Show what would be extracted without writing the archive
        #[arg(long)]
        dry_run: bool,

        /// Store entries without compression
        #[arg(long)]
        stored: bool,
    },

    /// Scan a binary file and list marker occurrences and fragments
    Scan {
        /// Binary file to scan
        #[arg(required = true, env = "INPUT_PATH")]
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
