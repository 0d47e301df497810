//! Command-line argument surface.
//!
//! # Responsibility
//! - Declare the flags the reorganizer accepts and their defaults.
//!
//! # Invariants
//! - Patient identifiers may come from `--roster`, repeated `--patient`
//!   flags, or both; validation happens in the roster module.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "edfbids",
    about = "Reorganize raw EEG device exports into a standardized dataset layout"
)]
pub struct Cli {
    /// Directory holding the raw device exports.
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Root directory under which per-patient dataset trees are created.
    #[arg(long)]
    pub output_root: PathBuf,

    /// Roster file with one patient identifier per line.
    #[arg(long)]
    pub roster: Option<PathBuf>,

    /// Single patient identifier; repeatable, combined with --roster.
    #[arg(long = "patient")]
    pub patients: Vec<String>,

    /// Overwrite an existing dataset root instead of refusing the re-run.
    #[arg(long)]
    pub force: bool,

    /// Worker threads for independent patients (defaults to available cores).
    #[arg(long)]
    pub jobs: Option<usize>,

    /// Log directory; relative paths resolve against the working directory.
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long)]
    pub log_level: Option<String>,
}
