//! sortcheck CLI.
//!
//! Differential testing of an external record-sorting program: argument
//! parsing, process invocation, the run loop and exit-code mapping.

pub mod cli;
pub mod commands;
pub mod exit;
pub mod invoker;
pub mod logger;
pub mod signal;
pub mod sleeper;

pub use cli::{parse_from, Cli, CliError, DuplicateKeysArg, DEFAULT_ITERATIONS};
pub use commands::{execute_run, CommandError, CommandResult, RunConfig, RunSummary};
pub use invoker::{
    build_argv, Invocation, InvokeError, ProcessRunner, ProgramOutput, ProgramRunner,
};
pub use logger::{Logger, StderrLogger, Verbosity};
pub use signal::{ShutdownCheck, ShutdownFlag};
pub use sleeper::{RealSleeper, Sleeper};
