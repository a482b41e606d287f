use std::process::ExitCode;

use agecalc::cli::{self, Cli};
use clap::Parser;

fn main() -> ExitCode {
    let args = Cli::parse();
    cli::init_logging();
    cli::execute(&args)
}
