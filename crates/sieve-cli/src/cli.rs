//! CLI argument definitions using clap.

use clap::{ArgAction, Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Sieve: column type inference and data quality checks
#[derive(Parser)]
#[command(name = "sieve")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the quality checks on a data file
    Check(CheckArgs),

    /// Infer the type of every column and list outliers
    Infer {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args)]
pub struct CheckArgs {
    /// Path to the data file (CSV/TSV)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// JSON file mapping columns to int, float, str, bool or datetime
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// JSON file mapping columns to {min, max, allowed} rules
    #[arg(short, long)]
    pub rules: Option<PathBuf>,

    /// JSON configuration file ({"parser": {...}, "checks": {...}})
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Minimum number of data rows
    #[arg(long)]
    pub min_rows: Option<NonZeroUsize>,

    /// Cell value to treat as missing (repeatable)
    #[arg(long = "na-value", value_name = "VALUE")]
    pub na_values: Vec<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Also save the JSON report to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
