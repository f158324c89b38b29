//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! multiple CLI command implementations.

use crate::Result;
use crate::app::services::tide_fetcher::FetchStats;
use crate::config::Config;
use chrono::Datelike;
use colored::Colorize;
use indicatif::HumanDuration;
use std::path::PathBuf;
use tracing::debug;

/// Processing statistics for reporting across all commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Stations loaded from the registry
    pub stations_loaded: usize,
    /// Registry rows skipped (blank code or malformed coordinates)
    pub rows_skipped: usize,
    /// Sunrise/sunset files written
    pub files_written: usize,
    /// Stations whose sunrise/sunset file could not be written
    pub stations_failed: usize,
    /// Dates across all stations with at least one absent event
    pub absent_dates: usize,
    /// Tide download counters, when tide data was requested
    pub tide: Option<FetchStats>,
    /// Total processing time
    pub processing_time: std::time::Duration,
}

/// Set up structured logging for a command
pub fn setup_logging(log_level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hinode_processor={}", log_level)));

    // Standard logging with timestamps, kept off stdout so data and
    // progress output stay clean
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Resolve the target year from the CLI or the interactive prompt
pub fn resolve_year(year: Option<i32>) -> Result<i32> {
    match year {
        Some(year) => Ok(year),
        None => crate::cli::input::prompt_year(chrono::Local::now().year()),
    }
}

/// Assemble the run configuration from command arguments
pub fn build_config(
    year: i32,
    stations: Option<PathBuf>,
    output: Option<PathBuf>,
    workers: Option<usize>,
    utc_offset: Option<i32>,
) -> Config {
    let mut config = Config::new(year);

    if let Some(path) = stations {
        config = config.with_stations_file(path);
    }
    if let Some(path) = output {
        config = config.with_output_dir(path);
    }
    if let Some(workers) = workers {
        config = config.with_workers(workers);
    }
    if let Some(hours) = utc_offset {
        config = config.with_utc_offset_hours(hours);
    }

    config
}

/// Print the final human-readable run summary
pub fn print_summary(stats: &RunStats) {
    println!();
    println!("{}", "Processing complete".green().bold());
    println!("  Stations loaded:       {}", stats.stations_loaded);

    if stats.rows_skipped > 0 {
        println!(
            "  Registry rows skipped: {}",
            stats.rows_skipped.to_string().yellow()
        );
    }

    if stats.files_written > 0 || stats.stations_failed > 0 {
        println!("  Sunrise files written: {}", stats.files_written);
    }

    if stats.stations_failed > 0 {
        println!(
            "  Stations failed:       {}",
            stats.stations_failed.to_string().red()
        );
    }

    if stats.absent_dates > 0 {
        println!("  Dates without events:  {}", stats.absent_dates);
    }

    if let Some(tide) = stats.tide {
        println!("  Tide files downloaded: {}", tide.succeeded);
        if tide.failed > 0 {
            println!(
                "  Tide downloads failed: {}",
                tide.failed.to_string().yellow()
            );
        }
    }

    println!("  Total time: {}", HumanDuration(stats.processing_time));
}
