//! date.rs
//!
//! Turns day/month/year integers into a `ValidatedDate`: a real calendar
//! date, no earlier than 1900-01-01 and no later than `today`.
//!
//! Checks run in a fixed order so the user always hears about the first
//! problem: year range, month range, day validity, then the future check.
//! The day check builds the candidate and reads its components back; a
//! 30 February that rolls over into March is rejected.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use thiserror::Error;

/// Earliest accepted year of birth.
pub const MIN_YEAR: i64 = 1900;

/// One of the three form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Day,
    Month,
    Year,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Day => "day",
            Field::Month => "month",
            Field::Year => "year",
        }
    }
}

/// Day/month/year as parsed from the form, not yet checked against the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateComponents {
    pub day: i64,
    pub month: i64,
    pub year: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("Please enter numeric values for day, month and year.")]
    NotNumeric,
    #[error("Year must be between 1900 and {current_year}.")]
    YearOutOfRange { year: i64, current_year: i32 },
    #[error("Month must be between 1 and 12.")]
    MonthOutOfRange { month: i64 },
    #[error("Invalid day for the selected month/year. For example, February 30 is invalid.")]
    InvalidDayForMonth { day: i64, month: i64, year: i64 },
    #[error("Date of birth cannot be in the future.")]
    FutureDate,
}

impl ValidationFailure {
    /// Stable identifier used in machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationFailure::NotNumeric => "not_numeric",
            ValidationFailure::YearOutOfRange { .. } => "year_out_of_range",
            ValidationFailure::MonthOutOfRange { .. } => "month_out_of_range",
            ValidationFailure::InvalidDayForMonth { .. } => "invalid_day_for_month",
            ValidationFailure::FutureDate => "future_date",
        }
    }

    /// Inputs to mark as invalid. A future date flags all three.
    pub fn flagged_fields(&self) -> &'static [Field] {
        match self {
            ValidationFailure::NotNumeric => &[],
            ValidationFailure::YearOutOfRange { .. } => &[Field::Year],
            ValidationFailure::MonthOutOfRange { .. } => &[Field::Month],
            ValidationFailure::InvalidDayForMonth { .. } => &[Field::Day],
            ValidationFailure::FutureDate => &[Field::Day, Field::Month, Field::Year],
        }
    }
}

/// A date of birth that is real, in range and not in the future.
///
/// Only [`validate`] can construct one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ValidatedDate(NaiveDate);

impl ValidatedDate {
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

/// Validates a day/month/year triple against `today`.
pub fn validate(
    day: i64,
    month: i64,
    year: i64,
    today: NaiveDate,
) -> Result<ValidatedDate, ValidationFailure> {
    let current_year = today.year();
    if year < MIN_YEAR || year > i64::from(current_year) {
        return Err(ValidationFailure::YearOutOfRange { year, current_year });
    }

    if !(1..=12).contains(&month) {
        return Err(ValidationFailure::MonthOutOfRange { month });
    }

    let candidate = build_candidate(day, month, year)
        .ok_or(ValidationFailure::InvalidDayForMonth { day, month, year })?;

    // Only the calendar date takes part in the comparison.
    let date = candidate.date();
    if date > today {
        return Err(ValidationFailure::FutureDate);
    }

    Ok(ValidatedDate(date))
}

/// Same as [`validate`], for components that came out of the form parser.
pub fn validate_components(
    components: DateComponents,
    today: NaiveDate,
) -> Result<ValidatedDate, ValidationFailure> {
    validate(components.day, components.month, components.year, today)
}

/// Builds the candidate at midday and keeps it only if its components read
/// back exactly as given.
fn build_candidate(day: i64, month: i64, year: i64) -> Option<NaiveDateTime> {
    let y = i32::try_from(year).ok()?;
    let m = u32::try_from(month).ok()?;
    let d = u32::try_from(day).ok()?;

    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .filter(|c| {
            i64::from(c.year()) == year && i64::from(c.month()) == month && i64::from(c.day()) == day
        })
}
