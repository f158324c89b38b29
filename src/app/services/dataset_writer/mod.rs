//! Dataset writer for per-station sunrise/sunset files
//!
//! Serializes one station-year of solar events into the compact fixed
//! format, one line per date: `MMDD HHMM HHMM` (sunrise then sunset,
//! zero-padded, no separator inside a clock field). A date without a rising
//! or setting keeps its line with the `----` sentinel in place of the
//! missing clock time, so every file carries exactly one line per date of
//! the year.
//!
//! Files are published atomically: the content is written to a temporary
//! file in the target directory and renamed into place, so a failed write
//! never leaves a partial file under the final name.

use crate::app::models::{SolarEvent, Station, StationYearDataset};
use crate::constants::{ABSENT_EVENT_SENTINEL, hinode_file_name};
use crate::{Error, Result};
use chrono::{Datelike, NaiveTime, Timelike};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Write one station-year dataset into `output_dir`
///
/// Creates the directory when missing and returns the path of the
/// published file.
///
/// # Errors
/// Returns `Error::Write` when the directory or file cannot be created or
/// the rename into the final name fails. The failure is fatal for this
/// station only.
pub fn write(
    dataset: &StationYearDataset,
    station: &Station,
    year: i32,
    output_dir: &Path,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .map_err(|e| Error::write(output_dir.display().to_string(), e))?;

    let final_path = output_dir.join(hinode_file_name(year, &station.code));

    let mut contents = String::with_capacity(dataset.len() * 16);
    for event in dataset.events() {
        contents.push_str(&format_line(event));
    }

    let mut temp_file = NamedTempFile::new_in(output_dir)
        .map_err(|e| Error::write(final_path.display().to_string(), e))?;
    temp_file
        .write_all(contents.as_bytes())
        .map_err(|e| Error::write(final_path.display().to_string(), e))?;
    temp_file
        .persist(&final_path)
        .map_err(|e| Error::write(final_path.display().to_string(), e.error))?;

    debug!(
        "Wrote {} lines for station '{}' to {}",
        dataset.len(),
        station.code,
        final_path.display()
    );

    Ok(final_path)
}

/// Format one daily record as `MMDD HHMM HHMM\n`
fn format_line(event: &SolarEvent) -> String {
    format!(
        "{:02}{:02} {} {}\n",
        event.date.month(),
        event.date.day(),
        format_clock(event.sunrise),
        format_clock(event.sunset)
    )
}

/// Format a clock time as zero-padded `HHMM`, or the absent sentinel
fn format_clock(time: Option<NaiveTime>) -> String {
    match time {
        Some(t) => format!("{:02}{:02}", t.hour(), t.minute()),
        None => ABSENT_EVENT_SENTINEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn summer_event() -> SolarEvent {
        SolarEvent::new(date(2024, 6, 21), time(4, 25), time(19, 0))
    }

    #[test]
    fn test_format_line_layout() {
        assert_eq!(format_line(&summer_event()), "0621 0425 1900\n");
    }

    #[test]
    fn test_format_line_zero_padding() {
        let event = SolarEvent::new(date(2024, 1, 5), time(6, 7), time(16, 4));
        assert_eq!(format_line(&event), "0105 0607 1604\n");
    }

    #[test]
    fn test_format_line_absent_sentinel() {
        let event = SolarEvent::absent(date(2024, 12, 21));
        assert_eq!(format_line(&event), "1221 ---- ----\n");

        let sunset_only = SolarEvent {
            date: date(2024, 12, 21),
            sunrise: None,
            sunset: Some(time(14, 30)),
        };
        assert_eq!(format_line(&sunset_only), "1221 ---- 1430\n");
    }

    #[test]
    fn test_write_creates_directory_and_file() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("hinode");

        let station = Station::new("mx", 35.6667, 139.75).unwrap();
        let dataset = StationYearDataset::new(vec![summer_event()]);

        let path = write(&dataset, &station, 2024, &output_dir).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            "hinode_2024_mx_hinode.txt"
        );
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "0621 0425 1900\n");
    }

    #[test]
    fn test_write_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let station = Station::new("mx", 35.6667, 139.75).unwrap();
        let dataset = StationYearDataset::new(vec![
            summer_event(),
            SolarEvent::absent(date(2024, 6, 22)),
        ]);

        let path = write(&dataset, &station, 2024, temp_dir.path()).unwrap();
        let first = fs::read(&path).unwrap();

        write(&dataset, &station, 2024, temp_dir.path()).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_write_leaves_no_temporary_files() {
        let temp_dir = TempDir::new().unwrap();
        let station = Station::new("os", 34.65, 135.4333).unwrap();
        let dataset = StationYearDataset::new(vec![summer_event()]);

        write(&dataset, &station, 2024, temp_dir.path()).unwrap();

        let entries: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec!["hinode_2024_os_hinode.txt"]);
    }
}
