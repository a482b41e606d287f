//! age.rs
//!
//! This module computes a human-readable age in the format:
//!     "X years, Y months, Z days"
//!
//! Chrono does not provide a built-in year/month/day diff (unlike Python’s
//! relativedelta), so we implement the calendar-aware borrowing rules manually.
//!
//! This logic correctly handles:
//!   • month underflow (borrowing from years)
//!   • day underflow (borrowing from the month before `today`'s month)
//!   • leap years
//!   • varying month lengths

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::date::ValidatedDate;

/// Elapsed calendar time between a date of birth and today.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeResult {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl fmt::Display for AgeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} year{}, {} month{}, {} day{}",
            self.years,
            plural(self.years),
            self.months,
            plural(self.months),
            self.days,
            plural(self.days)
        )
    }
}

/// Returns the age of `birth` as of `today`.
///
/// A `today` earlier than the birth date yields the zero age.
pub fn compute_age(birth: &ValidatedDate, today: NaiveDate) -> AgeResult {
    let birthdate = birth.date();
    if today < birthdate {
        return AgeResult::default();
    }

    let mut years = today.year() - birthdate.year();
    let mut months = today.month() as i32 - birthdate.month() as i32;
    let mut days = today.day() as i32 - birthdate.day() as i32;

    // Fix day underflow. Borrowing starts at the month before `today`'s
    // month; a short month (e.g. February after a 31st) may need a second.
    let (mut year, mut month) = (today.year(), today.month());
    while days < 0 {
        months -= 1;
        (year, month) = previous_month(year, month);

        // Add days from that month (28–31 depending on month & leap year)
        days += days_in_month(year, month) as i32;
    }

    // Fix month underflow
    if months < 0 {
        years -= 1;
        months += 12;
    }

    AgeResult {
        years: years as u32,
        months: months as u32,
        days: days as u32,
    }
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

fn plural(n: u32) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Returns number of days in a given year/month (handles leap years)
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30, // should never occur but keeps function total
    }
}

/// Leap-year rule (Gregorian):
///   - divisible by 4 → leap year
///   - except divisible by 100 → not leap year
///   - except divisible by 400 → leap year
fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
