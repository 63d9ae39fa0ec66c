//! CLI argument parsing for sortcheck.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use sortcheck_fs::{CorpusConfig, DEFAULT_FILE_COUNT, DEFAULT_ROWS_PER_FILE};
use sortcheck_gen::{
    DuplicateKeyPolicy, GeneratorConfig, NameSource, DEFAULT_MAX_KEYS, DEFAULT_NAME_LENGTH,
};
use thiserror::Error;

use crate::commands::RunConfig;
use crate::logger::Verbosity;

/// Default number of test cases per run.
pub const DEFAULT_ITERATIONS: usize = 10;

/// Errors from CLI argument validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("files must be at least 1, got {0}")]
    InvalidFileCount(usize),

    #[error("name-length must be at least 1, got {0}")]
    InvalidNameLength(usize),

    #[error("max-keys must be at least 1, got {0}")]
    InvalidMaxKeys(usize),

    #[error("timeout-secs must be at least 1, got {0}")]
    InvalidTimeout(u64),
}

/// How repeated fields among the drawn sort keys are handled.
#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum DuplicateKeysArg {
    /// Redraw until every key uses a distinct field
    Reject,
    /// Draw each further key from the fields not yet used
    #[default]
    Dedupe,
    /// Pass repeated fields to the program unchanged
    Allow,
}

impl From<DuplicateKeysArg> for DuplicateKeyPolicy {
    fn from(arg: DuplicateKeysArg) -> Self {
        match arg {
            DuplicateKeysArg::Reject => DuplicateKeyPolicy::Reject,
            DuplicateKeysArg::Dedupe => DuplicateKeyPolicy::Dedupe,
            DuplicateKeysArg::Allow => DuplicateKeyPolicy::Allow,
        }
    }
}

/// Differential tester for multi-file record sorting programs.
///
/// Each test case writes a fresh corpus, runs PROGRAM over it and compares
/// the sort-key columns of its output against a reference ordering. A JSON
/// report is printed to stdout.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "sortcheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the program under test
    pub program: PathBuf,

    /// Number of test cases to run
    #[arg(default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Records per corpus file
    #[arg(default_value_t = DEFAULT_ROWS_PER_FILE)]
    pub rows_per_file: usize,

    /// Length of generated name tokens
    #[arg(long, default_value_t = DEFAULT_NAME_LENGTH)]
    pub name_length: usize,

    /// Corpus files per test case
    #[arg(long, default_value_t = DEFAULT_FILE_COUNT)]
    pub files: usize,

    /// Maximum number of sort keys per test case (at most one per field
    /// unless --duplicate-keys allow)
    #[arg(long, default_value_t = DEFAULT_MAX_KEYS)]
    pub max_keys: usize,

    /// Draw names from the built-in name list instead of random tokens
    #[arg(long, default_value_t = false)]
    pub curated_names: bool,

    /// Handling of repeated fields among the sort keys
    #[arg(long, value_enum, default_value_t = DuplicateKeysArg::Dedupe)]
    pub duplicate_keys: DuplicateKeysArg,

    /// RNG seed for a reproducible run (default: random, logged with -v)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Kill the program if one invocation runs longer than this
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Directory under which per-case corpus directories are created
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Validate the arguments.
    ///
    /// Zero iterations and zero rows per file are valid runs.
    pub fn validate(&self) -> Result<(), CliError> {
        if self.files == 0 {
            return Err(CliError::InvalidFileCount(self.files));
        }
        if self.name_length == 0 {
            return Err(CliError::InvalidNameLength(self.name_length));
        }
        if self.max_keys == 0 {
            return Err(CliError::InvalidMaxKeys(self.max_keys));
        }
        if self.timeout_secs == Some(0) {
            return Err(CliError::InvalidTimeout(0));
        }
        Ok(())
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_count(self.verbose)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        let source = if self.curated_names {
            NameSource::Curated
        } else {
            NameSource::Random
        };
        GeneratorConfig::new()
            .with_name_length(self.name_length)
            .with_name_source(source)
    }

    pub fn corpus_config(&self) -> CorpusConfig {
        CorpusConfig::new(self.files, self.rows_per_file).with_work_dir(self.work_dir.clone())
    }

    /// Run configuration, using `seed` unless one was given on the command line.
    pub fn to_run_config(&self, seed: u64) -> RunConfig {
        RunConfig::new(self.program.clone(), self.seed.unwrap_or(seed))
            .with_iterations(self.iterations)
            .with_max_keys(self.max_keys)
            .with_duplicate_keys(self.duplicate_keys.into())
            .with_generator(self.generator_config())
            .with_corpus(self.corpus_config())
    }
}

/// Parse CLI arguments from an iterator of strings.
/// Useful for testing.
pub fn parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}
