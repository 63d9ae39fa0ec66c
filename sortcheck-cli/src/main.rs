//! sortcheck binary.
//!
//! Entry point for the `sortcheck` command-line tool.

use std::process::ExitCode;

use clap::Parser;
use sortcheck_cli::exit::{exit_code, summary_exit_code};
use sortcheck_cli::{
    execute_run, Cli, CommandError, ProcessRunner, RealSleeper, ShutdownFlag, StderrLogger,
};
use sortcheck_clock::SystemClock;
use sortcheck_fs::RealFilesystem;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Checked between test cases; the partial report is still printed.
    let shutdown = ShutdownFlag::new();
    let logger = StderrLogger::new(cli.verbosity());

    match run(&cli, &shutdown, &logger) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(exit_code(&e) as u8)
        }
    }
}

fn run(cli: &Cli, shutdown: &ShutdownFlag, logger: &StderrLogger) -> Result<i32, CommandError> {
    cli.validate()?;

    let config = cli.to_run_config(rand::random());
    let runner = ProcessRunner::new(RealSleeper).with_timeout(cli.timeout());

    let summary = execute_run(
        &config,
        &RealFilesystem,
        &SystemClock,
        &runner,
        shutdown,
        logger,
    )?;

    println!("{}", serde_json::to_string_pretty(&summary.reports)?);

    Ok(summary_exit_code(&summary))
}
