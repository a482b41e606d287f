//! Command-line front end: arguments, configuration, logging and exit codes.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::clock::{FixedClock, SystemClock};
use crate::form::AgeForm;
use crate::render::{self, Format};

/// Exit code for input the user can correct.
pub const EXIT_INVALID_INPUT: u8 = 2;

/// Compute an age in years, months and days from a date of birth.
#[derive(Parser, Debug)]
#[command(name = "agecalc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Day of birth
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub day: String,

    /// Month of birth (1-12)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub month: String,

    /// Year of birth
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub year: String,

    /// Pin "today" to a date (YYYY-MM-DD) instead of reading the system clock
    #[arg(long, env = "AGECALC_TODAY")]
    pub today: Option<String>,

    /// Output format
    #[arg(long, value_enum, env = "AGECALC_FORMAT", default_value_t = Format::Text)]
    pub format: Format,
}

/// Settings resolved from the command line and environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub today: Option<NaiveDate>,
    pub format: Format,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let today = cli
            .today
            .as_deref()
            .map(|s| {
                NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                    .with_context(|| format!("Invalid --today / AGECALC_TODAY value {s:?}"))
            })
            .transpose()?;

        Ok(Self {
            today,
            format: cli.format,
        })
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agecalc=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Runs one form submission and writes the rendered outcome to stdout.
pub fn run(cli: &Cli) -> Result<ExitCode> {
    let config = Config::from_cli(cli)?;
    tracing::info!(today = ?config.today, format = ?config.format, "ready");

    let form = AgeForm::new(cli.day.as_str(), cli.month.as_str(), cli.year.as_str());
    let result = match config.today {
        Some(date) => form.submit(&FixedClock(date)),
        None => form.submit(&SystemClock),
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", render::outcome(&result, config.format))
        .context("Failed to write result to stdout")?;

    Ok(match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::from(EXIT_INVALID_INPUT),
    })
}

/// Like [`run`], but reports unexpected errors as a generic message and exit
/// code 1 instead of returning them.
pub fn execute(cli: &Cli) -> ExitCode {
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            println!("{}", render::unexpected(cli.format));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("agecalc").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn today_flag_pins_the_clock() {
        let config = Config::from_cli(&cli(&["--today", "2024-03-10", "--format", "json"])).unwrap();
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2024, 3, 10));
        assert_eq!(config.format, Format::Json);
    }

    #[test]
    fn bad_today_is_an_error() {
        let err = Config::from_cli(&cli(&["--today", "10/03/2024"])).unwrap_err();
        assert!(err.to_string().contains("10/03/2024"));
    }

    #[test]
    fn missing_fields_default_to_blank() {
        let parsed = cli(&["--day", "-3"]);
        assert_eq!(parsed.day, "-3");
        assert_eq!(parsed.month, "");
    }

    #[test]
    fn computed_age_exits_zero() {
        let args = cli(&["--day", "15", "--month", "3", "--year", "2000", "--today", "2024-03-10"]);
        assert_eq!(run(&args).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn correctable_input_exits_two() {
        let args = cli(&["--day", "30", "--month", "2", "--year", "2000", "--today", "2024-03-10"]);
        assert_eq!(run(&args).unwrap(), ExitCode::from(EXIT_INVALID_INPUT));

        let blank = cli(&["--month", "2", "--year", "2000", "--today", "2024-03-10"]);
        assert_eq!(execute(&blank), ExitCode::from(EXIT_INVALID_INPUT));
    }

    #[test]
    fn unexpected_error_exits_one() {
        let args = cli(&["--day", "15", "--month", "3", "--year", "2000", "--today", "nope"]);
        assert!(run(&args).is_err());
        assert_eq!(execute(&args), ExitCode::FAILURE);
    }
}
