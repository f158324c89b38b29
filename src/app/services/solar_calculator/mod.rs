//! Solar event calculator service
//!
//! Computes locally-adjusted apparent sunrise and sunset clock times for one
//! station and one civil date. The observer sits at the station coordinates
//! at sea level with atmospheric refraction disabled; apparent rise and set
//! are defined by a fixed horizon depression of 34 arc-minutes, covering the
//! solar disk radius and average refraction in one constant.
//!
//! The numerical method lives behind the [`SunriseStrategy`] seam so it can
//! be swapped without touching the year sequencer or the dataset writer. The
//! shipped strategy is the NREL SPA implementation from the
//! `solar-positioning` crate.

use crate::app::models::{SolarEvent, Station};
use crate::constants::HORIZON_DEPRESSION_ARCMIN;
use crate::{Error, Result};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime};
use solar_positioning::{Horizon, SunriseResult, spa, time::DeltaT};

/// Error type produced by a sunrise strategy
pub type StrategyError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of one day's horizon-crossing computation
///
/// Circumpolar conditions are values, not errors: they are an expected
/// outcome for high-latitude stations and must stay distinguishable from a
/// genuine computation failure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HorizonCrossings {
    /// The sun crosses the apparent horizon twice on this date
    Regular {
        /// Instant of the rising, in the observer's fixed offset
        sunrise: DateTime<FixedOffset>,
        /// Instant of the setting, in the observer's fixed offset
        sunset: DateTime<FixedOffset>,
    },
    /// The sun stays above the apparent horizon all day
    PolarDay,
    /// The sun stays below the apparent horizon all day
    PolarNight,
}

/// Numerical strategy for one day's sunrise/sunset computation
pub trait SunriseStrategy: Send + Sync {
    /// Compute the horizon crossings for the civil date at the given
    /// coordinates, with instants expressed in `utc_offset`
    fn day_events(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
        utc_offset: FixedOffset,
    ) -> std::result::Result<HorizonCrossings, StrategyError>;
}

/// SPA-based sunrise strategy with the apparent-horizon depression applied
#[derive(Debug, Clone, Copy)]
pub struct SpaStrategy {
    horizon: Horizon,
}

impl SpaStrategy {
    /// Create the strategy with the standard 34 arc-minute depression
    pub fn new() -> Self {
        Self {
            horizon: Horizon::Custom(-HORIZON_DEPRESSION_ARCMIN / 60.0),
        }
    }
}

impl Default for SpaStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl SunriseStrategy for SpaStrategy {
    fn day_events(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
        utc_offset: FixedOffset,
    ) -> std::result::Result<HorizonCrossings, StrategyError> {
        // Anchor the computation at local civil midnight so the events
        // belong to the station's calendar date, not the UTC one
        let midnight = date
            .and_time(NaiveTime::MIN)
            .and_local_timezone(utc_offset)
            .single()
            .ok_or("local midnight is not representable in the fixed offset")?;

        let delta_t = DeltaT::estimate_from_date(date.year(), date.month())?;

        let result =
            spa::sunrise_sunset_for_horizon(midnight, latitude, longitude, delta_t, self.horizon)?;

        Ok(match result {
            SunriseResult::RegularDay {
                sunrise, sunset, ..
            } => HorizonCrossings::Regular { sunrise, sunset },
            SunriseResult::AllDay { .. } => HorizonCrossings::PolarDay,
            SunriseResult::AllNight { .. } => HorizonCrossings::PolarNight,
        })
    }
}

/// Solar event calculator for a fixed regional UTC offset
///
/// The offset is explicit configuration rather than a hidden constant so
/// coverage can expand beyond a single region without touching the
/// computation.
#[derive(Debug, Clone)]
pub struct SolarCalculator<S: SunriseStrategy = SpaStrategy> {
    strategy: S,
    utc_offset: FixedOffset,
}

impl SolarCalculator {
    /// Create a calculator with the shipped SPA strategy
    pub fn new(utc_offset_hours: i32) -> Result<Self> {
        Self::with_strategy(SpaStrategy::new(), utc_offset_hours)
    }
}

impl<S: SunriseStrategy> SolarCalculator<S> {
    /// Create a calculator with a caller-supplied strategy
    pub fn with_strategy(strategy: S, utc_offset_hours: i32) -> Result<Self> {
        if !(-14..=14).contains(&utc_offset_hours) {
            return Err(Error::configuration(format!(
                "Invalid UTC offset {} hours: must be between -14 and 14",
                utc_offset_hours
            )));
        }

        let utc_offset = FixedOffset::east_opt(utc_offset_hours * 3600).ok_or_else(|| {
            Error::configuration(format!("Invalid UTC offset: {} hours", utc_offset_hours))
        })?;

        Ok(Self {
            strategy,
            utc_offset,
        })
    }

    /// The fixed offset applied to event instants
    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    /// Compute the solar event record for one station and date
    ///
    /// Circumpolar dates yield a record with absent fields. Any other
    /// strategy failure becomes `Error::Computation` carrying the station
    /// code and date.
    pub fn compute(&self, station: &Station, date: NaiveDate) -> Result<SolarEvent> {
        let crossings = self
            .strategy
            .day_events(station.latitude, station.longitude, date, self.utc_offset)
            .map_err(|e| Error::computation(station.code.as_str(), date, e.to_string()))?;

        Ok(match crossings {
            HorizonCrossings::Regular { sunrise, sunset } => {
                SolarEvent::new(date, sunrise.time(), sunset.time())
            }
            HorizonCrossings::PolarDay | HorizonCrossings::PolarNight => SolarEvent::absent(date),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn tokyo() -> Station {
        Station::new("mx", 35.0 + 40.0 / 60.0, 139.0 + 45.0 / 60.0).unwrap()
    }

    fn longyearbyen() -> Station {
        Station::new("ly", 78.22, 15.65).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assert_close(actual: NaiveTime, hour: u32, minute: u32, tolerance_minutes: i64) {
        let actual_minutes = i64::from(actual.hour()) * 60 + i64::from(actual.minute());
        let expected_minutes = i64::from(hour) * 60 + i64::from(minute);
        assert!(
            (actual_minutes - expected_minutes).abs() <= tolerance_minutes,
            "time {} not within {} minutes of {:02}:{:02}",
            actual,
            tolerance_minutes,
            hour,
            minute
        );
    }

    #[test]
    fn test_tokyo_summer_solstice() {
        let calculator = SolarCalculator::new(9).unwrap();
        let event = calculator.compute(&tokyo(), date(2024, 6, 21)).unwrap();

        assert_close(event.sunrise.unwrap(), 4, 26, 7);
        assert_close(event.sunset.unwrap(), 18, 59, 7);
    }

    #[test]
    fn test_tokyo_new_year() {
        let calculator = SolarCalculator::new(9).unwrap();
        let event = calculator.compute(&tokyo(), date(2024, 1, 1)).unwrap();

        assert_close(event.sunrise.unwrap(), 6, 52, 7);
        assert_close(event.sunset.unwrap(), 16, 37, 7);
    }

    #[test]
    fn test_polar_day_yields_absent_events() {
        let calculator = SolarCalculator::new(1).unwrap();
        let event = calculator
            .compute(&longyearbyen(), date(2024, 6, 21))
            .unwrap();

        assert_eq!(event.sunrise, None);
        assert_eq!(event.sunset, None);
    }

    #[test]
    fn test_polar_night_yields_absent_events() {
        let calculator = SolarCalculator::new(1).unwrap();
        let event = calculator
            .compute(&longyearbyen(), date(2024, 12, 21))
            .unwrap();

        assert!(!event.is_complete());
    }

    #[test]
    fn test_invalid_utc_offset_rejected() {
        assert!(SolarCalculator::new(15).is_err());
        assert!(SolarCalculator::new(-15).is_err());
        assert!(SolarCalculator::new(9).is_ok());
    }

    #[test]
    fn test_strategy_failure_becomes_computation_error() {
        struct FailingStrategy;

        impl SunriseStrategy for FailingStrategy {
            fn day_events(
                &self,
                _latitude: f64,
                _longitude: f64,
                _date: NaiveDate,
                _utc_offset: FixedOffset,
            ) -> std::result::Result<HorizonCrossings, StrategyError> {
                Err("ephemeris unavailable".into())
            }
        }

        let calculator = SolarCalculator::with_strategy(FailingStrategy, 9).unwrap();
        let error = calculator.compute(&tokyo(), date(2024, 3, 15)).unwrap_err();

        match error {
            Error::Computation { station, date, .. } => {
                assert_eq!(station, "mx");
                assert_eq!(date.to_string(), "2024-03-15");
            }
            other => panic!("Expected Computation error, got {:?}", other),
        }
        assert!(!calculator
            .compute(&tokyo(), date(2024, 3, 15))
            .unwrap_err()
            .is_fatal());
    }
}
