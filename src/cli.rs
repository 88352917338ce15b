// Author: Dustin Pilgrim
// License: MIT

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pausy",
    version = env!("CARGO_PKG_VERSION"),
    about = "Pausable countdown timer",
    after_help = "While running, type pause, resume, stop, status or help and press Enter."
)]
pub struct Args {
    /// Countdown length, e.g. 90s, 5m, 1h 30m, 250ms
    #[arg(value_name = "DURATION", num_args = 1.., required = true)]
    pub duration: Vec<String>,

    #[arg(short, long, action)]
    pub verbose: bool,

    /// Print command results as JSON
    #[arg(long, action)]
    pub json: bool,

    #[arg(long, value_name = "FILE", conflicts_with = "no_log_file")]
    pub log_file: Option<PathBuf>,

    #[arg(long, action)]
    pub no_log_file: bool,
}
