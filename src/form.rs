//! form.rs
//!
//! The date-of-birth form: three raw text fields in, an age or a
//! user-correctable error out. Each step of a submission is logged as a
//! status line.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::age::{AgeResult, compute_age};
use crate::clock::Clock;
use crate::date::{DateComponents, Field, ValidationFailure, validate_components};

/// Largest integer an `f64` field value can carry exactly (2^53).
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill all fields (day, month, year).")]
    EmptyField,
    #[error(transparent)]
    Invalid(#[from] ValidationFailure),
}

impl FormError {
    pub fn kind(&self) -> &'static str {
        match self {
            FormError::EmptyField => "empty_field",
            FormError::Invalid(failure) => failure.kind(),
        }
    }

    pub fn flagged_fields(&self) -> &'static [Field] {
        match self {
            FormError::EmptyField => &[],
            FormError::Invalid(failure) => failure.flagged_fields(),
        }
    }
}

/// Raw field text as typed by the user.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AgeForm {
    pub day: String,
    pub month: String,
    pub year: String,
}

impl AgeForm {
    pub fn new(day: impl Into<String>, month: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            month: month.into(),
            year: year.into(),
        }
    }

    /// Submits the form, reading `clock` exactly once.
    pub fn submit(&self, clock: &impl Clock) -> Result<AgeResult, FormError> {
        self.submit_at(clock.today())
    }

    /// Submits the form against a fixed `today`.
    pub fn submit_at(&self, today: NaiveDate) -> Result<AgeResult, FormError> {
        info!("submit pressed");

        let result = self.evaluate(today);
        match &result {
            Ok(age) => info!(%age, "calculation successful"),
            Err(err) => warn!(kind = err.kind(), "error → {err}"),
        }
        result
    }

    fn evaluate(&self, today: NaiveDate) -> Result<AgeResult, FormError> {
        let components = parse_components(&self.day, &self.month, &self.year)?;
        info!(
            "parsed inputs -> day:{} month:{} year:{}",
            components.day, components.month, components.year
        );

        let birth = validate_components(components, today)?;
        info!("valid date -> calculating age");

        Ok(compute_age(&birth, today))
    }
}

/// Parses the three fields, reporting blanks before anything else.
pub fn parse_components(day: &str, month: &str, year: &str) -> Result<DateComponents, FormError> {
    if [day, month, year].iter().any(|s| s.trim().is_empty()) {
        return Err(FormError::EmptyField);
    }

    match (parse_integer(day), parse_integer(month), parse_integer(year)) {
        (Some(day), Some(month), Some(year)) => Ok(DateComponents { day, month, year }),
        _ => Err(ValidationFailure::NotNumeric.into()),
    }
}

/// Reads a field as an integer. Values such as `"12.0"` or `"1e1"` count as
/// integers; anything with a fractional part does not.
pub fn parse_integer(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(n) = text.parse::<i64>() {
        return Some(n);
    }

    let value = text.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_FLOAT {
        debug!(text, value, "accepted integral float");
        Some(value as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_floats_are_integers() {
        assert_eq!(parse_integer("12"), Some(12));
        assert_eq!(parse_integer(" 7 "), Some(7));
        assert_eq!(parse_integer("12.0"), Some(12));
        assert_eq!(parse_integer("1e1"), Some(10));
        assert_eq!(parse_integer("-3"), Some(-3));
    }

    #[test]
    fn non_integers_are_rejected() {
        assert_eq!(parse_integer("12.5"), None);
        assert_eq!(parse_integer("abc"), None);
        assert_eq!(parse_integer("NaN"), None);
        assert_eq!(parse_integer("inf"), None);
        assert_eq!(parse_integer("1e300"), None);
        assert_eq!(parse_integer("0x1F"), None);
    }

    #[test]
    fn blank_field_wins_over_bad_number() {
        assert_eq!(
            parse_components("x", "  ", "2000"),
            Err(FormError::EmptyField)
        );
    }

    #[test]
    fn whitespace_and_hex_fields() {
        assert_eq!(
            parse_components("  ", "3", "2000"),
            Err(FormError::EmptyField)
        );
        assert_eq!(
            parse_components("0x1F", "3", "2000"),
            Err(FormError::Invalid(ValidationFailure::NotNumeric))
        );
    }

    #[test]
    fn non_numeric_flags_nothing() {
        let err = parse_components("1", "one", "2000").unwrap_err();
        assert_eq!(err, FormError::Invalid(ValidationFailure::NotNumeric));
        assert!(err.flagged_fields().is_empty());
        assert_eq!(err.kind(), "not_numeric");
    }
}
