//! Application constants for hinode processor
//!
//! This module contains all configuration constants, default values,
//! and naming conventions used throughout the hinode processor application.

// =============================================================================
// Station Registry Layout
// =============================================================================

/// Zero-based column index of the station code in the registry TSV
pub const STATION_CODE_COLUMN: usize = 1;

/// Zero-based column index of the latitude field in the registry TSV
pub const LATITUDE_COLUMN: usize = 3;

/// Zero-based column index of the longitude field in the registry TSV
pub const LONGITUDE_COLUMN: usize = 4;

/// Accepted degree marks in coordinate fields. JMA registry files use the
/// Japanese mark `゜`; the conventional `°` is accepted as an alias.
pub const DEGREE_MARKS: &[char] = &['゜', '°'];

/// Minute mark terminating the minutes part of a coordinate field
pub const MINUTE_MARK: char = '\'';

/// Default station registry file name
pub const DEFAULT_STATIONS_FILE: &str = "keisai.tsv";

// =============================================================================
// Solar Computation
// =============================================================================

/// Horizon depression for apparent sunrise/sunset, in arc-minutes below the
/// astronomical horizon. Accounts for the solar disk radius and average
/// refraction; atmospheric refraction modelling itself stays disabled.
pub const HORIZON_DEPRESSION_ARCMIN: f64 = 34.0;

/// Regional UTC offset applied to event instants, in hours (JST)
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

/// Sentinel written in place of a clock time when a date has no sunrise or
/// no sunset (polar day / polar night)
pub const ABSENT_EVENT_SENTINEL: &str = "----";

// =============================================================================
// Output Naming
// =============================================================================

/// Subdirectory for sunrise/sunset files within the year's data directory
pub const HINODE_DIR_NAME: &str = "hinode";

/// Subdirectory for tide files within the year's data directory
pub const TIDE_DIR_NAME: &str = "tide";

/// Build the per-year data directory name, e.g. `data_2024`
pub fn data_dir_name(year: i32) -> String {
    format!("data_{}", year)
}

/// Build the per-station sunrise/sunset file name,
/// e.g. `hinode_2024_mx_hinode.txt`
pub fn hinode_file_name(year: i32, station_code: &str) -> String {
    format!("hinode_{}_{}_hinode.txt", year, station_code)
}

/// Build the per-station tide file name, e.g. `tide_2024_mx.txt`
pub fn tide_file_name(year: i32, station_code: &str) -> String {
    format!("tide_{}_{}.txt", year, station_code)
}

// =============================================================================
// Tide Data Service
// =============================================================================

/// Base URL of the JMA tide prediction text service
pub const TIDE_URL_BASE: &str = "https://www.data.jma.go.jp/kaiyou/data/db/tide/suisan/txt";

// =============================================================================
// Processing Defaults
// =============================================================================

/// Default number of parallel station workers
pub const DEFAULT_PARALLEL_WORKERS: usize = 8;

/// Upper bound on the configurable worker count
pub const MAX_PARALLEL_WORKERS: usize = 100;

/// Years accepted by the CLI. The SPA implementation is valid far beyond
/// this range; the bounds guard against obvious typos.
pub const MIN_YEAR: i32 = 1000;
pub const MAX_YEAR: i32 = 9999;
