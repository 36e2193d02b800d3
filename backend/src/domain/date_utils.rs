//! Date helpers for birthday display and recurrence.
//!
//! All computations work on UTC calendar components. Inputs written as RFC
//! 3339 timestamps are converted to UTC before their year/month/day are
//! taken, so the displayed day never shifts with the zone they were written
//! in.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DateError {
    #[error("No date provided")]
    Empty,
    #[error("Invalid date: {0}")]
    Invalid(String),
}

/// Parse a date string into a calendar date
///
/// Accepts plain ISO 8601 dates (YYYY-MM-DD) and RFC 3339 timestamps.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DateError::Empty);
    }

    if trimmed.contains('T') {
        let timestamp = DateTime::parse_from_rfc3339(trimmed)
            .map_err(|_| DateError::Invalid(trimmed.to_string()))?;
        return Ok(timestamp.with_timezone(&Utc).date_naive());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| DateError::Invalid(trimmed.to_string()))
}

/// Format a date string for display, e.g. "May 15, 1990"
pub fn format_date(input: &str) -> Result<String, DateError> {
    let date = parse_date(input)?;
    Ok(format!(
        "{} {}, {}",
        month_name(date.month()),
        date.day(),
        date.year()
    ))
}

/// Get the human-readable name for a month number
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "Invalid Month",
    }
}

/// Next occurrence of the birth date's month/day, relative to today (UTC)
pub fn next_birthday(birth_date: &str) -> Result<NaiveDate, DateError> {
    next_birthday_from(birth_date, Utc::now().date_naive())
}

/// Next occurrence of the birth date's month/day, relative to a fixed `today`
///
/// The candidate is built at (today's year, birth month, birth day); when it
/// falls strictly before `today` the year advances by one. A date equal to
/// `today` counts as this year's occurrence.
pub fn next_birthday_from(birth_date: &str, today: NaiveDate) -> Result<NaiveDate, DateError> {
    let birth = parse_date(birth_date)?;
    Ok(next_occurrence(birth, today))
}

/// Pure next-occurrence computation on already-parsed dates
pub fn next_occurrence(birth: NaiveDate, today: NaiveDate) -> NaiveDate {
    let candidate = occurrence_in_year(birth, today.year());
    if candidate < today {
        occurrence_in_year(birth, today.year() + 1)
    } else {
        candidate
    }
}

/// The birth date's occurrence within `year`
fn occurrence_in_year(birth: NaiveDate, year: i32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, birth.month(), birth.day()) {
        Some(date) => date,
        // Feb 29 in a year without a leap day rolls over to Mar 1
        None => NaiveDate::from_ymd_opt(year, 3, 1).expect("March 1 exists in every year"),
    }
}
