//! Hinode Processor Library
//!
//! A Rust library for generating daily sunrise/sunset datasets and downloading
//! tide predictions for JMA coastal observation stations.
//!
//! This library provides tools for:
//! - Parsing tab-separated station registries with degree/minute coordinates
//! - Computing apparent sunrise and sunset times with the NREL SPA algorithm
//! - Iterating a full calendar year per station with per-date failure tolerance
//! - Writing compact fixed-format per-station data files atomically
//! - Downloading raw tide prediction tables from the JMA data service
//! - Comprehensive error handling and recovery

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod dataset_writer;
        pub mod solar_calculator;
        pub mod station_registry;
        pub mod tide_fetcher;
        pub mod year_sequencer;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod input;
}

// Re-export commonly used types
pub use app::models::{SolarEvent, Station, StationYearDataset};
pub use config::Config;

/// Result type alias for the hinode processor
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for hinode processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Station registry cannot be loaded at all
    #[error("Station registry error: {message}")]
    Registry { message: String },

    /// A single registry row carries a coordinate field that cannot be
    /// decomposed into degrees and minutes
    #[error("Registry row {row}: unparsable coordinate field '{field}'")]
    RegistryRow { row: usize, field: String },

    /// Unexpected failure from the solar-position computation for one date
    #[error("Solar computation failed for station '{station}' on {date}: {message}")]
    Computation {
        station: String,
        date: chrono::NaiveDate,
        message: String,
    },

    /// Output file or directory cannot be created or written
    #[error("Write error for '{path}': {message}")]
    Write {
        path: String,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Tide download failed for one station
    #[error("Tide fetch failed for station '{station}', year {year}: {message}")]
    Fetch {
        station: String,
        year: i32,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    Interrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a station registry error
    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }

    /// Create a registry row error for an unparsable coordinate field
    pub fn registry_row(row: usize, field: impl Into<String>) -> Self {
        Self::RegistryRow {
            row,
            field: field.into(),
        }
    }

    /// Create a solar computation error
    pub fn computation(
        station: impl Into<String>,
        date: chrono::NaiveDate,
        message: impl Into<String>,
    ) -> Self {
        Self::Computation {
            station: station.into(),
            date,
            message: message.into(),
        }
    }

    /// Create a write error with an I/O source
    pub fn write(path: impl Into<String>, source: std::io::Error) -> Self {
        let source_message = source.to_string();
        Self::Write {
            path: path.into(),
            message: source_message,
            source: Some(source),
        }
    }

    /// Create a write error with a plain message
    pub fn write_message(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Write {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a tide fetch error
    pub fn fetch(station: impl Into<String>, year: i32, message: impl Into<String>) -> Self {
        Self::Fetch {
            station: station.into(),
            year,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }

    /// True when the failure is resource-level and must abort the whole run
    /// rather than a single row, date, or station
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Io { .. } | Self::Registry { .. } | Self::Configuration { .. } | Self::Interrupted { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::Registry {
            message: format!("TSV parsing failed: {}", error),
        }
    }
}
