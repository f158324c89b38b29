//! Command implementations for hinode processor CLI
//!
//! This module contains the main command execution logic, progress
//! reporting, and error handling for the CLI interface. Each command is
//! implemented in its own module.

pub mod generate;
pub mod shared;
pub mod sunrise;
pub mod tide;

// Re-export the main types and functions for convenience
pub use shared::RunStats;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner for hinode processor
///
/// Dispatches to the appropriate subcommand handler:
/// - `generate`: sunrise/sunset files plus tide downloads (full data tree)
/// - `sunrise`: sunrise/sunset files only
/// - `tide`: tide downloads only
pub async fn run(args: Args) -> Result<RunStats> {
    match args.get_command() {
        Commands::Generate(generate_args) => generate::run_generate(generate_args).await,
        Commands::Sunrise(sunrise_args) => sunrise::run_sunrise(sunrise_args).await,
        Commands::Tide(tide_args) => tide::run_tide(tide_args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_stats_re_export() {
        // Verify that RunStats is properly re-exported
        let stats = RunStats::default();
        assert_eq!(stats.files_written, 0);
        assert_eq!(stats.tide, None);
    }
}
