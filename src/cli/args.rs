//! Command-line argument definitions for hinode processor
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::constants::{DEFAULT_PARALLEL_WORKERS, DEFAULT_UTC_OFFSET_HOURS, MAX_PARALLEL_WORKERS};
use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the hinode processor
///
/// Generates daily sunrise/sunset datasets and downloads tide prediction
/// tables for JMA coastal observation stations.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hinode-processor",
    version,
    about = "Generate sunrise/sunset datasets and download tide predictions for JMA stations",
    long_about = "A production-ready tool that turns a tab-separated station registry into one \
                  year of daily sunrise/sunset times per station, computed with the NREL SPA \
                  algorithm and written as compact fixed-format text files, and downloads the \
                  matching tide prediction tables from the JMA data service."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the hinode processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Generate sunrise/sunset files and download tide data (default workflow)
    Generate(GenerateArgs),
    /// Generate sunrise/sunset files only
    Sunrise(SunriseArgs),
    /// Download tide prediction tables only
    Tide(TideArgs),
}

/// Arguments for the generate command (full yearly data tree)
#[derive(Debug, Clone, Parser)]
pub struct GenerateArgs {
    /// Target calendar year
    ///
    /// When omitted, the year is requested interactively with the current
    /// year offered as the default.
    #[arg(value_name = "YEAR", help = "Target calendar year")]
    pub year: Option<i32>,

    /// Path to the tab-separated station registry
    ///
    /// First row is a header and is discarded. Defaults to keisai.tsv in
    /// the working directory.
    #[arg(
        short = 's',
        long = "stations",
        value_name = "FILE",
        help = "Path to the tab-separated station registry"
    )]
    pub stations: Option<PathBuf>,

    /// Output root directory for the year's data tree
    ///
    /// The hinode/ and tide/ subdirectories are created beneath it.
    /// Defaults to data_<year> in the working directory.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output root directory for the year's data tree"
    )]
    pub output: Option<PathBuf>,

    /// Number of parallel station workers
    ///
    /// Stations are independent, so more workers can speed up the solar
    /// computation at the cost of CPU.
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        default_value_t = DEFAULT_PARALLEL_WORKERS,
        help = "Number of parallel station workers"
    )]
    pub workers: usize,

    /// Regional UTC offset in hours applied to solar event times
    #[arg(
        long = "utc-offset",
        value_name = "HOURS",
        default_value_t = DEFAULT_UTC_OFFSET_HOURS,
        allow_negative_numbers = true,
        help = "Regional UTC offset in hours for local event times"
    )]
    pub utc_offset: i32,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the sunrise command (solar files only)
#[derive(Debug, Clone, Parser)]
pub struct SunriseArgs {
    /// Target calendar year
    #[arg(value_name = "YEAR", help = "Target calendar year")]
    pub year: Option<i32>,

    /// Path to the tab-separated station registry
    #[arg(
        short = 's',
        long = "stations",
        value_name = "FILE",
        help = "Path to the tab-separated station registry"
    )]
    pub stations: Option<PathBuf>,

    /// Output root directory; sunrise files land in its hinode/ subdirectory
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output root directory"
    )]
    pub output: Option<PathBuf>,

    /// Number of parallel station workers
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        default_value_t = DEFAULT_PARALLEL_WORKERS,
        help = "Number of parallel station workers"
    )]
    pub workers: usize,

    /// Regional UTC offset in hours applied to solar event times
    #[arg(
        long = "utc-offset",
        value_name = "HOURS",
        default_value_t = DEFAULT_UTC_OFFSET_HOURS,
        allow_negative_numbers = true,
        help = "Regional UTC offset in hours for local event times"
    )]
    pub utc_offset: i32,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the tide command (downloads only)
#[derive(Debug, Clone, Parser)]
pub struct TideArgs {
    /// Target calendar year
    #[arg(value_name = "YEAR", help = "Target calendar year")]
    pub year: Option<i32>,

    /// Path to the tab-separated station registry
    #[arg(
        short = 's',
        long = "stations",
        value_name = "FILE",
        help = "Path to the tab-separated station registry"
    )]
    pub stations: Option<PathBuf>,

    /// Output root directory; tide files land in its tide/ subdirectory
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output root directory"
    )]
    pub output: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl GenerateArgs {
    /// Validate the generate command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        validate_workers(self.workers)?;
        validate_stations_path(self.stations.as_ref())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl SunriseArgs {
    /// Validate the sunrise command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        validate_workers(self.workers)?;
        validate_stations_path(self.stations.as_ref())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl TideArgs {
    /// Validate the tide command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        validate_stations_path(self.stations.as_ref())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn validate_workers(workers: usize) -> Result<()> {
    if workers == 0 {
        return Err(Error::configuration(
            "Number of workers must be greater than 0".to_string(),
        ));
    }

    if workers > MAX_PARALLEL_WORKERS {
        return Err(Error::configuration(format!(
            "Number of workers cannot exceed {}",
            MAX_PARALLEL_WORKERS
        )));
    }

    Ok(())
}

fn validate_stations_path(path: Option<&PathBuf>) -> Result<()> {
    if let Some(path) = path {
        if !path.exists() {
            return Err(Error::configuration(format!(
                "Station registry does not exist: {}",
                path.display()
            )));
        }
    }

    Ok(())
}
