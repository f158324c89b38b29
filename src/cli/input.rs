//! User input utilities for interactive CLI prompts
//!
//! This module provides the interactive year prompt used when no year is
//! supplied on the command line.

use crate::constants::{MAX_YEAR, MIN_YEAR};
use crate::{Error, Result};
use std::io::{self, Write};

/// Prompt for the target year, offering the current year as default
///
/// An empty input selects `current_year`; anything else must parse as a
/// year within the accepted range.
pub fn prompt_year(current_year: i32) -> Result<i32> {
    print!("Enter year (current year is {}): ", current_year);
    io::stdout()
        .flush()
        .map_err(|e| Error::io("Failed to flush stdout".to_string(), e))?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| Error::io("Failed to read user input".to_string(), e))?;

    parse_year_input(&input, current_year)
}

/// Parse one line of year input, falling back to `default` on empty input
pub fn parse_year_input(input: &str, default: i32) -> Result<i32> {
    let input = input.trim();

    if input.is_empty() {
        return Ok(default);
    }

    let year: i32 = input
        .parse()
        .map_err(|_| Error::configuration(format!("Invalid year '{}': must be a number", input)))?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(Error::configuration(format!(
            "Year {} is out of range ({}-{})",
            year, MIN_YEAR, MAX_YEAR
        )));
    }

    Ok(year)
}
