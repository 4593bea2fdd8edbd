//! Entry point: parse arguments, initialise logging, run the pipeline,
//! write the Result JSON to stdout, and map the outcome to an exit code.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use unfold_zdd_cli::cli::Cli;
use unfold_zdd_cli::driver;
use unfold_zdd_cli::logging;
use unfold_zdd_io::write_result;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.log_format, cli.verbose, cli.quiet);

    let (result, divisible) = match driver::run(&cli) {
        Ok(outcome) => outcome,
        Err(report) => {
            error!(error = %report, "{report}");
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    if let Err(report) = write_result(&result, &mut writer) {
        error!(error = %report, "failed to write result");
        return ExitCode::FAILURE;
    }
    if let Err(err) = writer.flush() {
        error!(error = %err, "failed to flush stdout");
        return ExitCode::FAILURE;
    }

    if divisible {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
