//! Binary entry point for calcpad.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use calcpad::cli::output::{OutputFormat, format_error};
use calcpad::cli::{Cli, execute};
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let format = OutputFormat::parse(&cli.format);

    match execute(&cli) {
        Ok(output) => {
            if !output.is_empty() {
                // Handle broken pipe gracefully (e.g., when piped to `head` or `jq`)
                if let Err(e) = write!(io::stdout(), "{output}")
                    && e.kind() != io::ErrorKind::BrokenPipe
                {
                    eprintln!("Error writing to stdout: {e}");
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            let error_output = format_error(&e, format);
            match format {
                // JSON errors go to stdout for programmatic parsing
                OutputFormat::Json => print!("{error_output}"),
                OutputFormat::Text => eprintln!("{error_output}"),
            }
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr. `RUST_LOG` wins; otherwise `warn`, or `debug`
/// with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "calcpad=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
