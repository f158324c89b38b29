//! Station registry service for loading the JMA observation point list
//!
//! This module loads the tab-separated station registry (`keisai.tsv` by
//! convention), decodes degree/minute coordinate text into decimal degrees
//! and tolerates malformed rows: a single bad row is skipped with a warning,
//! never aborting the whole load.

use crate::app::models::Station;
use crate::{Error, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub mod parser;

#[cfg(test)]
mod tests;

/// Statistics from one registry load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Data rows seen (header excluded)
    pub rows_total: usize,

    /// Stations successfully parsed and kept
    pub stations_loaded: usize,

    /// Rows dropped: blank station code or unparsable coordinates
    pub rows_skipped: usize,
}

/// Station registry holding every successfully parsed observation point
///
/// Stations keep the order of the source file. The registry is built once
/// per run and is immutable afterwards.
#[derive(Debug, Clone)]
pub struct StationRegistry {
    stations: Vec<Station>,
    stats: LoadStats,
    source_path: PathBuf,
}

impl StationRegistry {
    /// Load the registry from a tab-separated file with one header row
    ///
    /// Column positions are fixed by convention (see `constants`): the
    /// station code is lowercased, latitude and longitude are decoded from
    /// `<degrees>゜<minutes>'` text. Rows with a blank code are skipped
    /// silently; rows with malformed coordinates are skipped with a warning
    /// and counted in [`LoadStats::rows_skipped`].
    ///
    /// # Errors
    /// Returns `Error::Registry` when the file itself cannot be opened or
    /// read; per-row problems never abort the load.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading station registry from {}", path.display());

        let file = File::open(path).map_err(|e| {
            Error::registry(format!(
                "Cannot open station registry '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let mut stations = Vec::new();
        let mut stats = LoadStats::default();

        for (index, record) in reader.records().enumerate() {
            let record = record?;
            stats.rows_total += 1;

            match parser::parse_station_row(&record, index) {
                Ok(Some(station)) => {
                    stations.push(station);
                    stats.stations_loaded += 1;
                }
                Ok(None) => {
                    // Blank station code
                    stats.rows_skipped += 1;
                }
                Err(e) => {
                    warn!("Skipping registry row: {}", e);
                    stats.rows_skipped += 1;
                }
            }
        }

        info!(
            "Station registry loaded: {} stations from {} rows ({} skipped)",
            stats.stations_loaded, stats.rows_total, stats.rows_skipped
        );

        Ok(Self {
            stations,
            stats,
            source_path: path.to_path_buf(),
        })
    }

    /// Stations in source-file order
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Station codes in source-file order, duplicates preserved
    pub fn station_codes(&self) -> Vec<String> {
        self.stations.iter().map(|s| s.code.clone()).collect()
    }

    /// Number of loaded stations
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// True when no station was loaded
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Statistics from the load
    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    /// Path the registry was loaded from
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }
}
