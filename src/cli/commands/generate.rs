//! Generate command implementation for hinode processor CLI
//!
//! Builds the full yearly data tree: sunrise/sunset files for every
//! registry station followed by the matching tide downloads.

use super::shared::{RunStats, build_config, print_summary, resolve_year, setup_logging};
use crate::app::services::solar_calculator::SolarCalculator;
use crate::app::services::station_registry::StationRegistry;
use crate::app::services::tide_fetcher::TideFetcher;
use crate::app::services::year_sequencer::YearSequencer;
use crate::cli::args::GenerateArgs;
use crate::{Error, Result};
use std::time::Instant;
use tracing::{debug, info};

/// Generate command runner
///
/// Orchestrates the whole workflow:
/// 1. Set up logging and resolve the target year
/// 2. Load and validate the station registry
/// 3. Compute and write the sunrise/sunset files
/// 4. Download the tide prediction tables
/// 5. Report summary statistics
pub async fn run_generate(args: GenerateArgs) -> Result<RunStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level())?;

    info!("Starting hinode processor");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let year = resolve_year(args.year)?;
    let config = build_config(
        year,
        args.stations.clone(),
        args.output.clone(),
        Some(args.workers),
        Some(args.utc_offset),
    );
    config.validate()?;

    info!(
        "Creating data for year {} in {}",
        year,
        config.output_dir.display()
    );

    let registry = StationRegistry::load(&config.stations_file)?;
    if registry.is_empty() {
        return Err(Error::registry(format!(
            "No stations loaded from {}",
            config.stations_file.display()
        )));
    }
    let load_stats = registry.stats();

    let calculator = SolarCalculator::new(config.utc_offset_hours)?;
    let sequencer = YearSequencer::new(calculator, config.workers);
    let sequencer_stats = sequencer
        .run_all(
            registry.stations(),
            year,
            &config.hinode_dir(),
            args.show_progress(),
        )
        .await?;

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
        files_written: sequencer_stats.stations_completed,
        stations_failed: sequencer_stats.stations_failed,
        absent_dates: sequencer_stats.absent_dates,
        tide: Some(tide_stats),
        processing_time: start_time.elapsed(),
    };

    if !args.quiet {
        print_summary(&stats);
    }

    Ok(stats)
}
