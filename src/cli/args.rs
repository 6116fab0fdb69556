use std::path::PathBuf;

use clap::Parser;

use crate::Commands;

/// Main CLI application arguments and command structure
#[derive(Parser, Debug)]
#[clap(
    name = "livingnotes",
    version,
    about = "Manage the LivingNotes applet's stored notes"
)]
pub struct Cli {
    /// Path to the configuration file
    #[clap(short = 'c', long, value_parser)]
    pub config: Option<PathBuf>,

    /// Path to the stored notes list, overrides the configuration
    #[clap(long, value_parser)]
    pub notes_file: Option<PathBuf>,

    /// Path to the stored notification state, overrides the configuration
    #[clap(long, value_parser)]
    pub state_file: Option<PathBuf>,

    /// Verbose output mode
    #[clap(short, long)]
    pub verbose: bool,

    /// Subcommands for the livingnotes binary
    #[clap(subcommand)]
    pub command: Commands,
}
