//! Date-of-birth validation and calendar age calculation.
//!
//! [`date::validate`] turns day/month/year into a [`date::ValidatedDate`];
//! [`age::compute_age`] subtracts it from today field by field, borrowing a
//! month's worth of days when needed.

pub mod age;
pub mod cli;
pub mod clock;
pub mod date;
pub mod form;
pub mod render;

pub use age::{AgeResult, compute_age};
pub use clock::{Clock, FixedClock, SystemClock};
pub use date::{DateComponents, Field, ValidatedDate, ValidationFailure, validate};
pub use form::{AgeForm, FormError};
