//! Year sequencer driving the solar calculator across a full calendar year
//!
//! For each station the sequencer folds every date from January 1 to
//! December 31 inclusive into a [`StationYearDataset`], tolerating per-date
//! computation failures: a failed date is logged and recorded as an
//! absent-event entry, never aborting the year. The full dataset is
//! accumulated before the writer sees it, so a failure mid-year leaves no
//! output file rather than a truncated one.
//!
//! Stations are independent, so the sequencer fans them out over a bounded
//! worker pool; each worker owns its station's output file exclusively.
//! Progress is reported per station, not per date.

use crate::app::models::{SolarEvent, Station, StationYearDataset};
use crate::app::services::dataset_writer;
use crate::app::services::solar_calculator::{SolarCalculator, SpaStrategy, SunriseStrategy};
use crate::{Error, Result};
use chrono::{Datelike, NaiveDate};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// Statistics from one sequencer run across all stations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequencerStats {
    /// Stations handed to the sequencer
    pub stations_total: usize,

    /// Stations whose file was written successfully
    pub stations_completed: usize,

    /// Stations whose file could not be written
    pub stations_failed: usize,

    /// Dates across all stations with at least one absent event
    pub absent_dates: usize,
}

/// Sequencer for per-station full-year solar event generation
#[derive(Debug, Clone)]
pub struct YearSequencer<S: SunriseStrategy = SpaStrategy> {
    calculator: Arc<SolarCalculator<S>>,
    workers: usize,
}

impl<S: SunriseStrategy + 'static> YearSequencer<S> {
    /// Create a sequencer over the given calculator with a worker bound
    pub fn new(calculator: SolarCalculator<S>, workers: usize) -> Self {
        Self {
            calculator: Arc::new(calculator),
            workers: workers.max(1),
        }
    }

    /// Compute the full-year dataset for one station without writing it
    ///
    /// Individual date failures are logged and recorded as absent entries;
    /// the returned dataset always carries one record per date of the year.
    pub fn run(&self, station: &Station, year: i32) -> Result<StationYearDataset> {
        compute_station_year(&self.calculator, station, year)
    }

    /// Generate and write datasets for every station, bounded-parallel
    ///
    /// A station whose file cannot be written is counted in
    /// [`SequencerStats::stations_failed`] and logged; the remaining
    /// stations are unaffected.
    pub async fn run_all(
        &self,
        stations: &[Station],
        year: i32,
        output_dir: &Path,
        show_progress: bool,
    ) -> Result<SequencerStats> {
        // Reject an unrepresentable year before spawning any worker
        first_day_of_year(year)?;

        let total = stations.len();
        info!(
            "Generating sunrise/sunset data for {} stations, year {} ({} workers)",
            total, year, self.workers
        );

        let progress = if show_progress && total > 0 {
            let pb = ProgressBar::new(total as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                    )
                    .unwrap()
                    .progress_chars("#>-"),
            );
            pb.set_message("Computing sunrise/sunset files...");
            Some(pb)
        } else {
            None
        };

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut handles = Vec::with_capacity(total);

        for station in stations.iter().cloned() {
            let calculator = Arc::clone(&self.calculator);
            let semaphore = Arc::clone(&semaphore);
            let progress = progress.clone();
            let output_dir = output_dir.to_path_buf();

            handles.push(tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|_| Error::interrupted("worker pool closed"))?;

                let result = process_station(&calculator, &station, year, &output_dir);
                if let Some(pb) = &progress {
                    pb.inc(1);
                }
                result
            }));
        }

        let mut stats = SequencerStats {
            stations_total: total,
            ..Default::default()
        };

        for outcome in join_all(handles).await {
            match outcome {
                Ok(Ok(absent_dates)) => {
                    stats.stations_completed += 1;
                    stats.absent_dates += absent_dates;
                }
                Ok(Err(e)) => {
                    warn!("Station processing failed: {}", e);
                    stats.stations_failed += 1;
                }
                Err(e) => {
                    warn!("Worker task panicked: {}", e);
                    stats.stations_failed += 1;
                }
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message(format!(
                "{}/{} stations processed",
                stats.stations_completed, stats.stations_total
            ));
        }

        info!(
            "Sunrise/sunset generation complete: {}/{} stations, {} absent dates",
            stats.stations_completed, stats.stations_total, stats.absent_dates
        );

        Ok(stats)
    }
}

/// Compute and write one station's year; returns its absent-date count
fn process_station<S: SunriseStrategy>(
    calculator: &SolarCalculator<S>,
    station: &Station,
    year: i32,
    output_dir: &Path,
) -> Result<usize> {
    let dataset = compute_station_year(calculator, station, year)?;
    let absent_dates = dataset.absent_count();

    dataset_writer::write(&dataset, station, year, output_dir)?;
    Ok(absent_dates)
}

/// Fold every date of the year into a dataset, containing per-date failures
fn compute_station_year<S: SunriseStrategy>(
    calculator: &SolarCalculator<S>,
    station: &Station,
    year: i32,
) -> Result<StationYearDataset> {
    let start = first_day_of_year(year)?;

    let mut events = Vec::with_capacity(366);
    for date in start.iter_days().take_while(|d| d.year() == year) {
        let event = match calculator.compute(station, date) {
            Ok(event) => event,
            Err(e) => {
                warn!("{}", e);
                SolarEvent::absent(date)
            }
        };
        events.push(event);
    }

    Ok(StationYearDataset::new(events))
}

fn first_day_of_year(year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| Error::configuration(format!("Year {} is out of range", year)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::solar_calculator::{HorizonCrossings, StrategyError};
    use chrono::{FixedOffset, NaiveTime};
    use std::fs;
    use tempfile::TempDir;

    /// Strategy with fixed clock times, optionally failing on one date
    struct FixedStrategy {
        failing_date: Option<NaiveDate>,
    }

    impl SunriseStrategy for FixedStrategy {
        fn day_events(
            &self,
            _latitude: f64,
            _longitude: f64,
            date: NaiveDate,
            utc_offset: FixedOffset,
        ) -> std::result::Result<HorizonCrossings, StrategyError> {
            if self.failing_date == Some(date) {
                return Err("synthetic failure".into());
            }

            let at = |h, m| {
                date.and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
                    .and_local_timezone(utc_offset)
                    .unwrap()
            };
            Ok(HorizonCrossings::Regular {
                sunrise: at(6, 0),
                sunset: at(18, 0),
            })
        }
    }

    fn sequencer(failing_date: Option<NaiveDate>, workers: usize) -> YearSequencer<FixedStrategy> {
        let calculator = SolarCalculator::with_strategy(FixedStrategy { failing_date }, 9).unwrap();
        YearSequencer::new(calculator, workers)
    }

    fn station(code: &str) -> Station {
        Station::new(code, 35.6667, 139.75).unwrap()
    }

    #[test]
    fn test_leap_year_has_366_records() {
        let dataset = sequencer(None, 1).run(&station("mx"), 2024).unwrap();
        assert_eq!(dataset.len(), 366);
    }

    #[test]
    fn test_common_year_has_365_records() {
        let dataset = sequencer(None, 1).run(&station("mx"), 2023).unwrap();
        assert_eq!(dataset.len(), 365);
    }

    #[test]
    fn test_records_are_date_ordered_without_gaps() {
        let dataset = sequencer(None, 1).run(&station("mx"), 2024).unwrap();
        let events = dataset.events();

        assert_eq!(events[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(
            events[events.len() - 1].date,
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
        for pair in events.windows(2) {
            assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
        }
    }

    #[test]
    fn test_per_date_failure_is_contained() {
        let bad_date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let dataset = sequencer(Some(bad_date), 1).run(&station("mx"), 2024).unwrap();

        assert_eq!(dataset.len(), 366);
        assert_eq!(dataset.absent_count(), 1);

        let failed = dataset.events().iter().find(|e| e.date == bad_date).unwrap();
        assert!(!failed.is_complete());
    }

    #[tokio::test]
    async fn test_run_all_writes_one_file_per_station() {
        let temp_dir = TempDir::new().unwrap();
        let stations = vec![station("mx"), station("os")];

        let stats = sequencer(None, 2)
            .run_all(&stations, 2024, temp_dir.path(), false)
            .await
            .unwrap();

        assert_eq!(stats.stations_total, 2);
        assert_eq!(stats.stations_completed, 2);
        assert_eq!(stats.stations_failed, 0);

        for code in ["mx", "os"] {
            let path = temp_dir
                .path()
                .join(format!("hinode_2024_{}_hinode.txt", code));
            let contents = fs::read_to_string(path).unwrap();
            assert_eq!(contents.lines().count(), 366);
            assert!(contents.starts_with("0101 0600 1800\n"));
        }
    }
}
