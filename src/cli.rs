//! CLI argument parsing with clap.

use clap::Parser;
use std::path::PathBuf;

use crate::input::STDIN_PATH;

#[derive(Parser, Debug)]
#[command(name = "aggregate-prefixes")]
#[command(author, version, about = "Aggregates IPv4 or IPv6 prefixes from file or STDIN")]
pub struct Cli {
    /// Unsorted list of IPv4 or IPv6 prefixes. Use '-' for STDIN.
    #[arg(default_value = STDIN_PATH)]
    pub prefixes: PathBuf,

    /// Discard longer prefixes prior to processing [default: 128]
    #[arg(short, long, value_name = "LENGTH", allow_negative_numbers = true)]
    pub max_length: Option<i64>,

    /// Display verbose information about the optimisations
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only report errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Optional YAML config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
