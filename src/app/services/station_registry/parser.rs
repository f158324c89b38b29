//! Station row parsing from registry TSV records
//!
//! This module decodes one registry row into a [`Station`]: the code field
//! is lowercased, the coordinate fields are converted from degree/minute
//! text (`35゜40'` style) into decimal degrees.

use crate::app::models::Station;
use crate::constants::{
    DEGREE_MARKS, LATITUDE_COLUMN, LONGITUDE_COLUMN, MINUTE_MARK, STATION_CODE_COLUMN,
};
use crate::{Error, Result};
use csv::StringRecord;

/// Parse one data row into a station, filtering rows without a code
///
/// Returns `Ok(None)` for rows whose station-code field is missing or
/// blank; these are legitimate registry entries (section separators,
/// unassigned points) rather than errors.
///
/// # Errors
/// Returns `Error::RegistryRow` with the zero-based row index and the raw
/// field text when a coordinate field cannot be decomposed into degrees
/// and minutes.
pub fn parse_station_row(record: &StringRecord, row: usize) -> Result<Option<Station>> {
    let code = match record.get(STATION_CODE_COLUMN) {
        Some(value) if !value.trim().is_empty() => value.trim().to_lowercase(),
        _ => return Ok(None),
    };

    let latitude = parse_field(record, row, LATITUDE_COLUMN)?;
    let longitude = parse_field(record, row, LONGITUDE_COLUMN)?;

    Station::new(code, latitude, longitude).map(Some)
}

fn parse_field(record: &StringRecord, row: usize, column: usize) -> Result<f64> {
    let raw = record
        .get(column)
        .ok_or_else(|| Error::registry_row(row, format!("<missing column {}>", column)))?;

    parse_coordinate(raw).ok_or_else(|| Error::registry_row(row, raw))
}

/// Convert degree/minute coordinate text to decimal degrees
///
/// The expected shape is `<degrees>゜<minutes>'` with optional trailing
/// text after the minute mark (hemisphere letters, seconds); `°` is
/// accepted in place of `゜`. The sign of the degrees part applies to the
/// whole value. Returns `None` when either separator is missing or a
/// numeric part does not parse, or when minutes fall outside `0..60`.
pub fn parse_coordinate(text: &str) -> Option<f64> {
    let text = text.trim();
    let (degrees_part, rest) = text.split_once(DEGREE_MARKS)?;
    let (minutes_part, _) = rest.split_once(MINUTE_MARK)?;

    let degrees: f64 = degrees_part.trim().parse().ok()?;
    let minutes: f64 = minutes_part.trim().parse().ok()?;

    if !(0.0..60.0).contains(&minutes) {
        return None;
    }

    let magnitude = degrees.abs() + minutes / 60.0;
    Some(if degrees_part.trim().starts_with('-') {
        -magnitude
    } else {
        magnitude
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_parse_coordinate_japanese_mark() {
        let value = parse_coordinate("35゜40'").unwrap();
        assert!((value - 35.6667).abs() < 0.0001);
    }

    #[test]
    fn test_parse_coordinate_degree_sign() {
        let value = parse_coordinate("139°45'").unwrap();
        assert!((value - 139.75).abs() < 0.0001);
    }

    #[test]
    fn test_parse_coordinate_trailing_text() {
        // Hemisphere suffixes and seconds after the minute mark are ignored
        let value = parse_coordinate("35゜40'N").unwrap();
        assert!((value - 35.6667).abs() < 0.0001);
    }

    #[test]
    fn test_parse_coordinate_negative_degrees() {
        let value = parse_coordinate("-15゜48'").unwrap();
        assert!((value + 15.8).abs() < 0.0001);
    }

    #[test]
    fn test_parse_coordinate_rejects_malformed() {
        // Missing minute mark
        assert_eq!(parse_coordinate("35゜40"), None);
        // Missing degree mark
        assert_eq!(parse_coordinate("35 40'"), None);
        // Non-numeric degrees
        assert_eq!(parse_coordinate("abc゜40'"), None);
        // Minutes out of range
        assert_eq!(parse_coordinate("35゜75'"), None);
        assert_eq!(parse_coordinate(""), None);
    }

    #[test]
    fn test_parse_station_row_valid() {
        let row = record(&["1", "MX", "東京", "35゜40'", "139゜45'"]);
        let station = parse_station_row(&row, 0).unwrap().unwrap();

        assert_eq!(station.code, "mx");
        assert!((station.latitude - 35.6667).abs() < 0.0001);
        assert!((station.longitude - 139.75).abs() < 0.0001);
    }

    #[test]
    fn test_parse_station_row_blank_code_filtered() {
        let row = record(&["1", "", "東京", "35゜40'", "139゜45'"]);
        assert!(parse_station_row(&row, 0).unwrap().is_none());

        let short = record(&["1"]);
        assert!(parse_station_row(&short, 0).unwrap().is_none());
    }

    #[test]
    fn test_parse_station_row_malformed_coordinate() {
        let row = record(&["1", "MX", "東京", "35゜40", "139゜45'"]);
        let result = parse_station_row(&row, 7);

        match result.unwrap_err() {
            Error::RegistryRow { row, field } => {
                assert_eq!(row, 7);
                assert_eq!(field, "35゜40");
            }
            other => panic!("Expected RegistryRow error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_station_row_missing_coordinate_column() {
        let row = record(&["1", "MX", "東京"]);
        assert!(parse_station_row(&row, 0).is_err());
    }
}
