//! Spark Package CLI - Command-line tool for creating, registering and
//! publishing Spark Packages.

use std::ffi::OsString;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod prompt;

use commands::{Cli, UsageError};
use prompt::{Prompter, TerminalPrompter};

/// Exit status of a failed invocation, the unsigned form of `-1`.
const FAILURE: u8 = 255;

fn main() -> ExitCode {
    let cli = match parse_cli(std::env::args_os()) {
        Ok(cli) => cli,
        Err(code) => return ExitCode::from(code),
    };

    // Logs go to stderr; stdout carries prompts and results.
    let default_filter = if cli.args.verbose {
        "spark_package=debug"
    } else {
        "spark_package=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    ExitCode::from(run(&cli, &mut TerminalPrompter))
}

/// Parses the command line, printing clap's message on failure.
///
/// Returns the exit status when the process should stop: `0` after help was
/// shown, [`FAILURE`] for any usage error.
fn parse_cli<I, T>(argv: I) -> Result<Cli, u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(argv).map_err(|err| {
        let _ = err.print();
        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
            _ => FAILURE,
        }
    })
}

/// Runs the requested action and returns the process exit status.
fn run(cli: &Cli, prompter: &mut dyn Prompter) -> u8 {
    match commands::dispatch(cli, prompter) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err:#}");
            if err.downcast_ref::<UsageError>().is_some() {
                let _ = Cli::command().print_help();
            }
            FAILURE
        }
    }
}
