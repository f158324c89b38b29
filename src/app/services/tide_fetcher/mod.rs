//! Tide data acquisition from the JMA prediction text service
//!
//! For each station code the fetcher issues one HTTP GET against the fixed
//! URL template (uppercase code in the URL, lowercase in the file name) and
//! persists a successful response body verbatim. A non-200 status or a
//! transport failure is logged and counted; it never aborts the batch and
//! never affects the sunrise/sunset output.

use crate::constants::{TIDE_URL_BASE, tide_file_name};
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Batch-level download counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Stations whose tide file was written
    pub succeeded: usize,

    /// Stations that returned a non-200 status or failed in transport
    pub failed: usize,
}

/// Client for downloading per-station tide prediction tables
#[derive(Debug, Clone)]
pub struct TideFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl TideFetcher {
    /// Create a fetcher against the JMA data service
    pub fn new() -> Self {
        Self::with_base_url(TIDE_URL_BASE)
    }

    /// Create a fetcher against an alternate service root
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Download tide tables for every station code into `output_dir`
    ///
    /// Duplicate codes are fetched once. Per-station failures are contained
    /// and counted in [`FetchStats::failed`].
    ///
    /// # Errors
    /// Returns `Error::Write` only when the output directory itself cannot
    /// be created.
    pub async fn download_all(
        &self,
        year: i32,
        station_codes: &[String],
        output_dir: &Path,
        show_progress: bool,
    ) -> Result<FetchStats> {
        fs::create_dir_all(output_dir)
            .map_err(|e| Error::write(output_dir.display().to_string(), e))?;

        let codes = unique_codes(station_codes);
        info!(
            "Downloading tide data for {} stations, year {}",
            codes.len(),
            year
        );

        let progress = if show_progress && !codes.is_empty() {
            let pb = ProgressBar::new(codes.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                    )
                    .unwrap()
                    .progress_chars("#>-"),
            );
            pb.set_message("Downloading tide data...");
            Some(pb)
        } else {
            None
        };

        let mut stats = FetchStats::default();

        for code in &codes {
            match self.download_station(year, code, output_dir).await {
                Ok(()) => stats.succeeded += 1,
                Err(e) => {
                    warn!("{}", e);
                    stats.failed += 1;
                }
            }

            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message(format!(
                "{} downloaded, {} failed",
                stats.succeeded, stats.failed
            ));
        }

        info!(
            "Tide download complete: {} succeeded, {} failed",
            stats.succeeded, stats.failed
        );

        Ok(stats)
    }

    async fn download_station(&self, year: i32, code: &str, output_dir: &Path) -> Result<()> {
        let url = self.station_url(year, code);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::fetch(code, year, e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::fetch(
                code,
                year,
                format!("HTTP status {}", response.status()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::fetch(code, year, e.to_string()))?;

        let path = output_dir.join(tide_file_name(year, &code.to_lowercase()));
        fs::write(&path, body).map_err(|e| Error::write(path.display().to_string(), e))?;

        Ok(())
    }

    /// Build the service URL for one station-year; codes are uppercased
    fn station_url(&self, year: i32, code: &str) -> String {
        format!("{}/{}/{}.txt", self.base_url, year, code.to_uppercase())
    }
}

impl Default for TideFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Deduplicate station codes preserving first-seen order
fn unique_codes(codes: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    codes
        .iter()
        .filter(|code| seen.insert(code.to_lowercase()))
        .cloned()
        .collect()
}
