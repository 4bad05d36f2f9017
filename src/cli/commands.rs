use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::tui::RunOptions;

#[derive(Parser, Debug)]
#[command(
    name = "conductor-tui",
    about = concat!("Conductor TUI v", env!("CARGO_PKG_VERSION"), " - browse Conductor tracks, phases and tasks"),
    version
)]
pub struct Cli {
    /// Run against a different project directory (the one containing `conductor/`)
    #[arg(short = 'C', long = "project-dir")]
    pub project_dir: Option<PathBuf>,

    /// List archived tracks on startup
    #[arg(long)]
    pub archived: bool,

    /// Background refresh interval in milliseconds
    #[arg(long = "interval-ms", value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: Option<u64>,

    /// Write logs to this file (stdout belongs to the UI)
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn into_run_options(self) -> RunOptions {
        RunOptions {
            project_dir: self.project_dir,
            show_archived: self.archived,
            interval: self.interval_ms.map(Duration::from_millis),
            log_file: self.log_file,
        }
    }
}
