//! render.rs
//!
//! Turns a form outcome into the text printed on stdout: aligned
//! `Key: .....value` rows like the stats card, or a single JSON object.

use clap::ValueEnum;
use serde_json::json;

use crate::age::AgeResult;
use crate::form::FormError;

const ALIGN_WIDTH: usize = 24;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Renders the outcome of a form submission.
pub fn outcome(result: &Result<AgeResult, FormError>, format: Format) -> String {
    match (result, format) {
        (Ok(age), Format::Text) => age_text(age),
        (Err(err), Format::Text) => error_text(err),
        (Ok(age), Format::Json) => json!({ "status": "ok", "age": age }).to_string(),
        (Err(err), Format::Json) => json!({
            "status": "error",
            "kind": err.kind(),
            "message": err.to_string(),
            "fields": err.flagged_fields(),
        })
        .to_string(),
    }
}

/// Message shown when something other than user input went wrong.
pub fn unexpected(format: Format) -> String {
    const MESSAGE: &str = "Unexpected error. See log for details.";
    match format {
        Format::Text => MESSAGE.to_string(),
        Format::Json => json!({ "status": "error", "kind": "unexpected", "message": MESSAGE })
            .to_string(),
    }
}

fn age_text(age: &AgeResult) -> String {
    let mut out = String::new();
    for (key, value) in [
        ("Years", age.years),
        ("Months", age.months),
        ("Days", age.days),
    ] {
        let (key_part, dots, value) = build_stat_row(key, &value.to_string(), ALIGN_WIDTH);
        out.push_str(&format!("{key_part}{dots}{value}\n"));
    }
    out.push_str(&format!("Age: {age}"));
    out
}

fn error_text(err: &FormError) -> String {
    let fields = err.flagged_fields();
    if fields.is_empty() {
        return err.to_string();
    }

    let names: Vec<&str> = fields.iter().map(|f| f.name()).collect();
    format!("{err}\nInvalid fields: {}", names.join(", "))
}

/// Splits a row into key, dot leader and value so the values line up.
pub fn build_stat_row(key: &str, value: &str, align_width: usize) -> (String, String, String) {
    let key_part = format!("{key}: ");
    let base_len = key_part.len() + value.len();
    let available = align_width.saturating_sub(base_len);

    let dots = match available {
        0 => "".to_string(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => ".".repeat(n),
    };

    (key_part, dots, value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::ValidationFailure;

    #[test]
    fn rows_are_padded_to_width() {
        let (k, d, v) = build_stat_row("Days", "5", 12);
        assert_eq!(format!("{k}{d}{v}"), "Days: .....5");

        let (_, d, _) = build_stat_row("Years", "123456", 12);
        assert_eq!(d, "");
    }

    #[test]
    fn text_result_lists_each_unit() {
        let age = AgeResult {
            years: 24,
            months: 0,
            days: 1,
        };
        let text = outcome(&Ok(age), Format::Text);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Years: ") && lines[0].ends_with("24"));
        assert_eq!(lines[0].len(), ALIGN_WIDTH);
        assert_eq!(lines[3], "Age: 24 years, 0 months, 1 day");
    }

    #[test]
    fn text_error_names_flagged_fields() {
        let text = outcome(&Err(ValidationFailure::FutureDate.into()), Format::Text);
        assert_eq!(
            text,
            "Date of birth cannot be in the future.\nInvalid fields: day, month, year"
        );
        assert_eq!(
            outcome(&Err(FormError::EmptyField), Format::Text),
            "Please fill all fields (day, month, year)."
        );
    }

    #[test]
    fn json_error_carries_kind_and_fields() {
        let text = outcome(
            &Err(ValidationFailure::MonthOutOfRange { month: 13 }.into()),
            Format::Json,
        );
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["kind"], "month_out_of_range");
        assert_eq!(value["fields"], json!(["month"]));
    }

    #[test]
    fn unexpected_message_in_both_formats() {
        assert_eq!(
            unexpected(Format::Text),
            "Unexpected error. See log for details."
        );

        let value: serde_json::Value = serde_json::from_str(&unexpected(Format::Json)).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["kind"], "unexpected");
        assert_eq!(value["message"], "Unexpected error. See log for details.");
    }
}
