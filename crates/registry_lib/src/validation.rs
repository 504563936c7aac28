//! The validation rules of the submitted categories and events.
//!
//! These rules are checked before writing anything to the database.

use std::ops::RangeInclusive;

use chrono::{DateTime, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// The allowed range of the capacity of an event.
pub const CAPACITY_RANGE: RangeInclusive<i64> = 10..=2000;

/// The capacity given to the events created without one.
pub const DEFAULT_CAPACITY: i32 = 1000;

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new("^[a-zA-Z0-9 ]+$").unwrap());

/// The reason why the submitted fields of a category or an event were rejected.
///
/// The message of each variant is sent back as is to the client.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The name contains other characters than letters, digits and spaces, or is empty.
    #[error("Invalid name format. Name must be alphanumeric.")]
    InvalidName,
    /// The capacity isn't an integer between 10 and 2000.
    #[error("Invalid capacity. Capacity must be a number between 10 and 2000 inclusive.")]
    InvalidCapacity,
    /// The amount of available tickets is negative or too large.
    #[error("Invalid tickets available. It must be a positive number.")]
    InvalidTicketsAvailable,
    /// The duration is negative, or the end date can't be represented.
    #[error("Invalid duration. Duration must be a positive number of minutes.")]
    InvalidDuration,
    /// The start date can't be parsed.
    #[error("Invalid start date time `{0}`.")]
    InvalidStartDateTime(String),
    /// A required field is missing.
    #[error("Missing field `{0}`.")]
    MissingField(&'static str),
}

/// Checks that the provided name of a category or an event only contains letters, digits
/// and spaces.
pub fn check_name(name: &str) -> Result<(), ValidationError> {
    if NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(ValidationError::InvalidName)
    }
}

/// Checks that the provided capacity is in the [`CAPACITY_RANGE`], and returns it.
pub fn check_capacity(capacity: i64) -> Result<i32, ValidationError> {
    if CAPACITY_RANGE.contains(&capacity) {
        Ok(capacity as _)
    } else {
        Err(ValidationError::InvalidCapacity)
    }
}

/// Parses the provided date time, submitted by a client.
///
/// The date can either be in the RFC 3339 format, in which case it is converted to UTC,
/// or a local date time like `2023-10-08T14:15`, as sent by HTML forms, which is considered UTC.
pub fn parse_date_time(input: &str) -> Result<NaiveDateTime, ValidationError> {
    let input = input.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(input) {
        return Ok(date.naive_utc());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .into_iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .ok_or_else(|| ValidationError::InvalidStartDateTime(input.to_owned()))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn name_pattern() {
        assert_eq!(check_name("Music Festival 2024"), Ok(()));
        assert_eq!(check_name("a"), Ok(()));
        assert_eq!(check_name("Bad!Name"), Err(ValidationError::InvalidName));
        assert_eq!(check_name(""), Err(ValidationError::InvalidName));
        assert_eq!(check_name("tab\tname"), Err(ValidationError::InvalidName));
        assert_eq!(check_name("Café"), Err(ValidationError::InvalidName));
    }

    #[test]
    fn capacity_bounds() {
        assert_eq!(check_capacity(10), Ok(10));
        assert_eq!(check_capacity(2000), Ok(2000));
        assert_eq!(check_capacity(9), Err(ValidationError::InvalidCapacity));
        assert_eq!(check_capacity(5), Err(ValidationError::InvalidCapacity));
        assert_eq!(check_capacity(2001), Err(ValidationError::InvalidCapacity));
        assert_eq!(check_capacity(-1), Err(ValidationError::InvalidCapacity));
    }

    #[test]
    fn date_time_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 10, 8)
            .and_then(|d| d.and_hms_opt(14, 15, 0))
            .unwrap();

        assert_eq!(parse_date_time("2023-10-08T14:15"), Ok(expected));
        assert_eq!(parse_date_time("2023-10-08T14:15:00"), Ok(expected));
        assert_eq!(parse_date_time("2023-10-08T14:15:00Z"), Ok(expected));
        assert_eq!(parse_date_time("2023-10-08T16:15:00+02:00"), Ok(expected));
        assert_eq!(parse_date_time(" 2023-10-08 14:15 "), Ok(expected));
        assert!(matches!(
            parse_date_time("tomorrow"),
            Err(ValidationError::InvalidStartDateTime(_))
        ));
    }
}
