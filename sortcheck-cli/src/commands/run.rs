//! Run command orchestration.
//!
//! Draws all test cases up front from the seeded RNG, then for each case
//! builds a corpus, computes the expected ordering, runs the program and
//! compares. Mismatches are collected into the summary; anything that keeps a
//! case from being compared at all aborts the run. A case whose program was
//! running when shutdown was requested is discarded without comparison.

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;
use sortcheck_clock::Clock;
use sortcheck_conformance::{compare, compute_expected, ComparisonReport};
use sortcheck_fs::{build_corpus, CorpusConfig, Filesystem};
use sortcheck_gen::{
    generate_cases, DuplicateKeyPolicy, GeneratorConfig, RecordGenerator, DEFAULT_MAX_KEYS,
};
use sortcheck_schema::TestCase;

use crate::cli::DEFAULT_ITERATIONS;
use crate::invoker::{Invocation, ProgramRunner};
use crate::logger::Logger;
use crate::signal::ShutdownCheck;

use super::{CommandError, CommandResult};

/// Everything one run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub program: PathBuf,
    pub seed: u64,
    pub iterations: usize,
    pub max_keys: usize,
    pub duplicate_keys: DuplicateKeyPolicy,
    pub generator: GeneratorConfig,
    pub corpus: CorpusConfig,
}

impl RunConfig {
    pub fn new(program: PathBuf, seed: u64) -> Self {
        Self {
            program,
            seed,
            iterations: DEFAULT_ITERATIONS,
            max_keys: DEFAULT_MAX_KEYS,
            duplicate_keys: DuplicateKeyPolicy::default(),
            generator: GeneratorConfig::default(),
            corpus: CorpusConfig::default(),
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_max_keys(mut self, max_keys: usize) -> Self {
        self.max_keys = max_keys;
        self
    }

    pub fn with_duplicate_keys(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicate_keys = policy;
        self
    }

    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_corpus(mut self, corpus: CorpusConfig) -> Self {
        self.corpus = corpus;
        self
    }
}

/// Result of run command execution.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub seed: u64,
    /// One report per completed test case, in execution order.
    pub reports: Vec<ComparisonReport>,
    /// Sum of failure counts over all reports.
    pub total_failures: usize,
    /// Set when a shutdown request stopped the run early.
    pub interrupted: bool,
}

impl RunSummary {
    fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    fn record(&mut self, report: ComparisonReport) {
        self.total_failures += report.failure_count;
        self.reports.push(report);
    }

    /// True when no test case produced a mismatch.
    pub fn passed(&self) -> bool {
        self.total_failures == 0
    }

    pub fn failed_cases(&self) -> usize {
        self.reports.iter().filter(|r| !r.passed()).count()
    }
}

/// Execute the run command.
pub fn execute_run<F, C, R, H, L>(
    config: &RunConfig,
    fs: &F,
    clock: &C,
    runner: &R,
    shutdown: &H,
    logger: &L,
) -> CommandResult<RunSummary>
where
    F: Filesystem,
    C: Clock,
    R: ProgramRunner,
    H: ShutdownCheck,
    L: Logger,
{
    let generator = RecordGenerator::new(config.generator.clone(), clock)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let cases = generate_cases(&mut rng, config.iterations, config.max_keys, config.duplicate_keys)?;

    logger.verbose(&format!(
        "seed {}: {} test cases, {} files x {} rows against {}",
        config.seed,
        cases.len(),
        config.corpus.file_count,
        config.corpus.rows_per_file,
        config.program.display()
    ));

    let mut summary = RunSummary::new(config.seed);
    let result = run_cases(config, &cases, &generator, &mut rng, fs, runner, shutdown, logger, &mut summary);
    if !summary.reports.is_empty() {
        logger.progress_done();
    }
    if result.is_err() || !summary.passed() {
        logger.info(&format!("rerun with --seed {} to reproduce", config.seed));
    }
    result?;

    if summary.interrupted {
        logger.info(&format!(
            "interrupted after {} of {} test cases",
            summary.reports.len(),
            cases.len()
        ));
    }
    logger.verbose(&format!(
        "{} of {} test cases failed, {} mismatches in total",
        summary.failed_cases(),
        summary.reports.len(),
        summary.total_failures
    ));

    Ok(summary)
}

#[allow(clippy::too_many_arguments)]
fn run_cases<F, R, H, L>(
    config: &RunConfig,
    cases: &[TestCase],
    generator: &RecordGenerator,
    rng: &mut StdRng,
    fs: &F,
    runner: &R,
    shutdown: &H,
    logger: &L,
    summary: &mut RunSummary,
) -> CommandResult<()>
where
    F: Filesystem,
    R: ProgramRunner,
    H: ShutdownCheck,
    L: Logger,
{
    for (index, case) in cases.iter().enumerate() {
        if shutdown.should_stop() {
            summary.interrupted = true;
            break;
        }

        match run_case(config, index, case, generator, rng, fs, runner, shutdown, logger)? {
            Some(report) => {
                logger.progress(report.passed());
                summary.record(report);
            }
            None => {
                summary.interrupted = true;
                break;
            }
        }
    }
    Ok(())
}

/// Returns `None` when shutdown was requested while the program ran; its
/// output may be cut short and is not compared.
#[allow(clippy::too_many_arguments)]
fn run_case<F, R, H, L>(
    config: &RunConfig,
    index: usize,
    case: &TestCase,
    generator: &RecordGenerator,
    rng: &mut StdRng,
    fs: &F,
    runner: &R,
    shutdown: &H,
    logger: &L,
) -> CommandResult<Option<ComparisonReport>>
where
    F: Filesystem,
    R: ProgramRunner,
    H: ShutdownCheck,
    L: Logger,
{
    // Dropped at the end of this function, removing the files.
    let corpus = build_corpus(fs, generator, rng, case, &config.corpus)?;
    let expected = compute_expected(fs, corpus.paths(), case)?;

    let invocation = Invocation::for_case(config.program.clone(), corpus.paths(), case);
    let command_line = invocation.display();
    logger.debug(&format!("case {}: {}", index, command_line));

    let output = runner.run(&invocation);
    if shutdown.should_stop() {
        logger.verbose(&format!("case {}: interrupted, output discarded", index));
        return Ok(None);
    }
    let output = output?;
    if output.exit_status != Some(0) {
        logger.verbose(&format!(
            "case {}: program exited with {}",
            index,
            output
                .exit_status
                .map_or_else(|| "a signal".to_string(), |code| format!("status {}", code))
        ));
    }

    let comparison = compare(&expected, &output.stdout, case).map_err(|source| {
        CommandError::Output {
            invocation: command_line.clone(),
            source,
        }
    })?;
    if !comparison.passed() {
        logger.verbose(&format!(
            "case {}: {} mismatches ({} expected rows, {} actual)",
            index,
            comparison.failure_count(),
            comparison.expected_rows,
            comparison.actual_rows
        ));
    }

    Ok(Some(ComparisonReport::new(
        case.clone(),
        command_line,
        output.exit_status,
        comparison,
    )))
}
