//! Configuration management and validation.
//!
//! Provides the run configuration assembled from CLI arguments: registry
//! location, output layout, target year, worker bound and the regional UTC
//! offset applied to solar event instants.

use crate::constants::{
    DEFAULT_PARALLEL_WORKERS, DEFAULT_STATIONS_FILE, DEFAULT_UTC_OFFSET_HOURS, HINODE_DIR_NAME,
    MAX_PARALLEL_WORKERS, MAX_YEAR, MIN_YEAR, TIDE_DIR_NAME, data_dir_name,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Run configuration for one processing invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Target calendar year
    pub year: i32,

    /// Path to the tab-separated station registry
    pub stations_file: PathBuf,

    /// Root output directory for the year's data tree
    pub output_dir: PathBuf,

    /// Number of parallel station workers
    pub workers: usize,

    /// Regional UTC offset in hours applied to solar event instants
    pub utc_offset_hours: i32,
}

impl Config {
    /// Create a configuration with defaults for the given year
    pub fn new(year: i32) -> Self {
        Self {
            year,
            stations_file: PathBuf::from(DEFAULT_STATIONS_FILE),
            output_dir: PathBuf::from(data_dir_name(year)),
            workers: DEFAULT_PARALLEL_WORKERS.min(num_cpus::get().max(1)),
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
        }
    }

    /// Override the station registry path
    pub fn with_stations_file(mut self, path: PathBuf) -> Self {
        self.stations_file = path;
        self
    }

    /// Override the output root directory
    pub fn with_output_dir(mut self, path: PathBuf) -> Self {
        self.output_dir = path;
        self
    }

    /// Override the worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Override the regional UTC offset
    pub fn with_utc_offset_hours(mut self, hours: i32) -> Self {
        self.utc_offset_hours = hours;
        self
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(Error::configuration(format!(
                "Year {} is out of range ({}-{})",
                self.year, MIN_YEAR, MAX_YEAR
            )));
        }

        if self.workers == 0 {
            return Err(Error::configuration(
                "Number of workers must be greater than 0".to_string(),
            ));
        }

        if self.workers > MAX_PARALLEL_WORKERS {
            return Err(Error::configuration(format!(
                "Number of workers cannot exceed {}",
                MAX_PARALLEL_WORKERS
            )));
        }

        if !(-14..=14).contains(&self.utc_offset_hours) {
            return Err(Error::configuration(format!(
                "UTC offset {} hours is out of range (-14 to 14)",
                self.utc_offset_hours
            )));
        }

        if !self.stations_file.exists() {
            return Err(Error::configuration(format!(
                "Station registry does not exist: {}",
                self.stations_file.display()
            )));
        }

        Ok(())
    }

    /// Directory receiving the sunrise/sunset files
    pub fn hinode_dir(&self) -> PathBuf {
        self.output_dir.join(HINODE_DIR_NAME)
    }

    /// Directory receiving the tide files
    pub fn tide_dir(&self) -> PathBuf {
        self.output_dir.join(TIDE_DIR_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_with_registry(file: &NamedTempFile) -> Config {
        Config::new(2024).with_stations_file(file.path().to_path_buf())
    }

    fn registry_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "header").unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::new(2024);

        assert_eq!(config.year, 2024);
        assert_eq!(config.stations_file, PathBuf::from("keisai.tsv"));
        assert_eq!(config.output_dir, PathBuf::from("data_2024"));
        assert_eq!(config.utc_offset_hours, 9);
        assert!(config.workers >= 1);
    }

    #[test]
    fn test_output_subdirectories() {
        let config = Config::new(2024).with_output_dir(PathBuf::from("/tmp/out"));

        assert_eq!(config.hinode_dir(), PathBuf::from("/tmp/out/hinode"));
        assert_eq!(config.tide_dir(), PathBuf::from("/tmp/out/tide"));
    }

    #[test]
    fn test_validation_bounds() {
        let file = registry_file();

        assert!(config_with_registry(&file).validate().is_ok());

        let mut bad = config_with_registry(&file);
        bad.year = 150;
        assert!(bad.validate().is_err());

        let mut bad = config_with_registry(&file);
        bad.workers = 0;
        assert!(bad.validate().is_err());

        let mut bad = config_with_registry(&file);
        bad.workers = 101;
        assert!(bad.validate().is_err());

        let mut bad = config_with_registry(&file);
        bad.utc_offset_hours = 20;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_validation_requires_registry_file() {
        let config = Config::new(2024).with_stations_file(PathBuf::from("/nonexistent/keisai.tsv"));
        assert!(config.validate().is_err());
    }
}
