//! Command-line parsing for the radiocarbon resolution calculator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! calibration engine. Numeric parsing errors are reported by clap before any
//! computation starts.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "res14c", version, about = "Calculate Radiocarbon Dating Resolution")]
pub struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute mean and 5th/95th percentile resolution for every half year of a calendar span.
    Calc(CalcArgs),
    /// Calibrate a single radiocarbon age and print its 95.4% range.
    Range(RangeArgs),
}

/// Options for a full resolution run.
#[derive(Debug, Parser, Clone)]
pub struct CalcArgs {
    /// Start of the time range, calendar years BP.
    #[arg(long)]
    pub from: i64,

    /// End of the time range, calendar years BP.
    #[arg(long)]
    pub to: i64,

    /// Dating uncertainty (1 sigma), 14C years.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub uncert: u32,

    /// Calibration curve file (`cal BP,14C BP,sigma` lines, `#` comments).
    #[arg(short, long, env = "RES14C_CURVE")]
    pub curve: PathBuf,

    /// Output CSV; a `.csv` extension is enforced. Defaults to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also export the table with run parameters as JSON.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Worker threads (0 = one less than available CPUs, at most 8).
    #[arg(long, env = "RES14C_WORKERS", default_value_t = 0)]
    pub workers: usize,

    /// Log progress instead of drawing a progress bar.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Options for calibrating one raw age.
#[derive(Debug, Parser, Clone)]
pub struct RangeArgs {
    /// Conventional radiocarbon age, 14C years BP.
    #[arg(long)]
    pub age: i64,

    /// Dating uncertainty (1 sigma), 14C years.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub uncert: u32,

    /// Calibration curve file.
    #[arg(short, long, env = "RES14C_CURVE")]
    pub curve: PathBuf,
}
