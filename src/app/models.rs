//! Data models for hinode processing
//!
//! This module contains the core data structures for representing coastal
//! observation stations and their daily sunrise/sunset records.

use crate::{Error, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

// =============================================================================
// Station Structure
// =============================================================================

/// A fixed geographic observation point from the JMA station registry
///
/// Coordinates are held in WGS84 decimal degrees, converted from the
/// degree/minute text encoding of the registry file. A station whose
/// coordinates cannot be decoded is rejected at parse time, never
/// constructed with zeroed values.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Station {
    /// Short station identifier, normalized to lowercase (e.g. "mx")
    pub code: String,

    /// Latitude in decimal degrees
    pub latitude: f64,

    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Station {
    /// Create a new Station with validation
    pub fn new(code: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self> {
        let station = Self {
            code: code.into().to_lowercase(),
            latitude,
            longitude,
        };

        station.validate()?;
        Ok(station)
    }

    /// Validate station data for consistency and valid ranges
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(Error::registry("Station code cannot be empty".to_string()));
        }

        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::registry(format!(
                "Invalid latitude {} for station '{}': must be between -90 and 90 degrees",
                self.latitude, self.code
            )));
        }

        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::registry(format!(
                "Invalid longitude {} for station '{}': must be between -180 and 180 degrees",
                self.longitude, self.code
            )));
        }

        Ok(())
    }

    /// Get station location as (latitude, longitude) tuple
    pub fn location(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

// =============================================================================
// Solar Event Record
// =============================================================================

/// Sunrise and sunset clock times for one station on one civil date
///
/// A `None` field records a date on which the corresponding event does not
/// occur (polar day or polar night) or on which the computation failed; the
/// record is still emitted so every date of the year appears exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolarEvent {
    /// Civil date in the station's local calendar
    pub date: NaiveDate,

    /// Local sunrise clock time, absent when the sun does not rise
    pub sunrise: Option<NaiveTime>,

    /// Local sunset clock time, absent when the sun does not set
    pub sunset: Option<NaiveTime>,
}

impl SolarEvent {
    /// Create a record with both events present
    pub fn new(date: NaiveDate, sunrise: NaiveTime, sunset: NaiveTime) -> Self {
        Self {
            date,
            sunrise: Some(sunrise),
            sunset: Some(sunset),
        }
    }

    /// Create a record for a date without a rising or setting
    pub fn absent(date: NaiveDate) -> Self {
        Self {
            date,
            sunrise: None,
            sunset: None,
        }
    }

    /// True when both sunrise and sunset were computed
    pub fn is_complete(&self) -> bool {
        self.sunrise.is_some() && self.sunset.is_some()
    }
}

// =============================================================================
// Station-Year Dataset
// =============================================================================

/// The complete ordered set of daily solar-event records for one station
/// across one calendar year
///
/// Owned by the dataset writer until flushed; the sequencer hands over the
/// full year at once so a failure mid-computation never produces a
/// truncated file.
#[derive(Debug, Clone, PartialEq)]
pub struct StationYearDataset {
    events: Vec<SolarEvent>,
}

impl StationYearDataset {
    /// Wrap a date-ordered event sequence
    pub fn new(events: Vec<SolarEvent>) -> Self {
        Self { events }
    }

    /// Events in date order, one per date of the year
    pub fn events(&self) -> &[SolarEvent] {
        &self.events
    }

    /// Number of daily records
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when the dataset holds no records
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Count of dates with at least one absent event
    pub fn absent_count(&self) -> usize {
        self.events.iter().filter(|e| !e.is_complete()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_station_creation_valid() {
        let station = Station::new("MX", 35.6667, 139.75).unwrap();
        assert_eq!(station.code, "mx");
        assert_eq!(station.location(), (35.6667, 139.75));
    }

    #[test]
    fn test_station_coordinate_validation() {
        assert!(Station::new("mx", 95.0, 139.75).is_err());
        assert!(Station::new("mx", -95.0, 139.75).is_err());
        assert!(Station::new("mx", 35.6667, 185.0).is_err());
        assert!(Station::new("mx", 35.6667, -185.0).is_err());
    }

    #[test]
    fn test_station_empty_code_rejected() {
        assert!(Station::new("", 35.6667, 139.75).is_err());
        assert!(Station::new("   ", 35.6667, 139.75).is_err());
    }

    #[test]
    fn test_solar_event_completeness() {
        let complete = SolarEvent::new(
            date(2024, 6, 21),
            NaiveTime::from_hms_opt(4, 25, 0).unwrap(),
            NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        );
        assert!(complete.is_complete());

        let absent = SolarEvent::absent(date(2024, 6, 21));
        assert!(!absent.is_complete());
        assert_eq!(absent.sunrise, None);
        assert_eq!(absent.sunset, None);
    }

    #[test]
    fn test_dataset_absent_count() {
        let dataset = StationYearDataset::new(vec![
            SolarEvent::new(
                date(2024, 1, 1),
                NaiveTime::from_hms_opt(6, 51, 0).unwrap(),
                NaiveTime::from_hms_opt(16, 38, 0).unwrap(),
            ),
            SolarEvent::absent(date(2024, 1, 2)),
        ]);

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.absent_count(), 1);
    }
}
