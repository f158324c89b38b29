//! Tide command implementation for hinode processor CLI
//!
//! Downloads the per-station tide prediction tables without computing any
//! solar data.

use super::shared::{RunStats, build_config, print_summary, resolve_year, setup_logging};
use crate::app::services::station_registry::StationRegistry;
use crate::app::services::tide_fetcher::TideFetcher;
use crate::cli::args::TideArgs;
use crate::{Error, Result};
use std::time::Instant;
use tracing::{debug, info};

/// Tide command runner
pub async fn run_tide(args: TideArgs) -> Result<RunStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level())?;

    info!("Starting tide download");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let year = resolve_year(args.year)?;
    let config = build_config(year, args.stations.clone(), args.output.clone(), None, None);
    config.validate()?;

    let registry = StationRegistry::load(&config.stations_file)?;
    if registry.is_empty() {
        return Err(Error::registry(format!(
            "No stations loaded from {}",
            config.stations_file.display()
        )));
    }
    let load_stats = registry.stats();

    let tide_stats = TideFetcher::new()
        .download_all(
            year,
            &registry.station_codes(),
            &config.tide_dir(),
            args.show_progress(),
        )
        .await?;

    let stats = RunStats {
        stations_loaded: load_stats.stations_loaded,
        rows_skipped: load_stats.rows_skipped,
        files_written: 0,
        stations_failed: 0,
        absent_dates: 0,
        tide: Some(tide_stats),
        processing_time: start_time.elapsed(),
    };

    if !args.quiet {
        print_summary(&stats);
    }

    Ok(stats)
}
