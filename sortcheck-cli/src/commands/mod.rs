//! Command orchestration.
//!
//! `run` drives the test cases: corpus, oracle, invocation, comparison.

pub mod run;

pub use run::{execute_run, RunConfig, RunSummary};

use sortcheck_conformance::OracleError;
use sortcheck_fs::CorpusError;
use sortcheck_gen::GenerationError;
use sortcheck_schema::ParseError;
use thiserror::Error;

use crate::cli::CliError;
use crate::invoker::InvokeError;

/// Errors from command execution.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] CliError),

    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("corpus error: {0}")]
    Corpus(#[from] CorpusError),

    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("unparseable output from `{invocation}`: {source}")]
    Output {
        invocation: String,
        #[source]
        source: ParseError,
    },

    #[error("program error: {0}")]
    Invoke(#[from] InvokeError),

    #[error("failed to write report: {0}")]
    Report(#[from] serde_json::Error),
}

/// Result of command execution.
pub type CommandResult<T> = Result<T, CommandError>;
