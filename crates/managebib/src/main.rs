//! managebib CLI
//!
//! Command-line interface for BibTeX file operations.

mod cli;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};

/// Exit status when no command is given, matching clap usage errors
const USAGE_EXIT_CODE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // Logs go to stderr; stdout carries the formatted document
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: failed to set up logging: {e}");
    }
}

fn run(cli: Cli) -> managebib::Result<ExitCode> {
    match cli.command {
        Some(Commands::Format(args)) => {
            let options = args.into_options();
            tracing::debug!("Formatting with {:?}", options);
            managebib::run_format(&options)?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            Cli::command()
                .print_help()
                .map_err(|source| managebib::Error::Io {
                    context: "print help",
                    source,
                })?;
            Ok(ExitCode::from(USAGE_EXIT_CODE))
        }
    }
}
