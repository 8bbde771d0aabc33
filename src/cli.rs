use std::path::PathBuf;

use clap::Parser;

use crate::docker_controller::DEFAULT_TAIL_LINES;

/// Terminal dashboard for the Docker containers on this host.
#[derive(Debug, Parser)]
#[command(name = "dockboard", version, about)]
pub struct Cli {
    /// Number of log lines fetched for an open log pane.
    #[arg(long, value_name = "LINES", default_value_t = DEFAULT_TAIL_LINES)]
    pub tail: usize,

    /// Print the grouped container listing once and exit.
    #[arg(long)]
    pub once: bool,

    /// Print the listing as JSON (with --once).
    #[arg(long, requires = "once")]
    pub json: bool,

    /// Append diagnostic logs to this file. The filter is read from RUST_LOG.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
