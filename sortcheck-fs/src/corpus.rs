//! Corpus builder.
//!
//! Writes a fresh set of delimited input files for one test case into a
//! scoped temporary directory. The directory is removed when the returned
//! `Corpus` is dropped, on every exit path.

use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;
use sortcheck_gen::RecordGenerator;
use sortcheck_schema::{write_records, Record, SchemaError, TestCase};
use tempfile::TempDir;
use thiserror::Error;

use crate::writer::{Filesystem, FsError};

/// Default number of files per corpus.
pub const DEFAULT_FILE_COUNT: usize = 10;

/// Default number of records per file.
pub const DEFAULT_ROWS_PER_FILE: usize = 100;

/// Prefix of the per-case temporary directory.
pub const CORPUS_DIR_PREFIX: &str = "sortcheck-";

/// Errors from building a corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to create corpus directory: {0}")]
    CreateDir(#[source] io::Error),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    #[error("failed to encode records: {0}")]
    Encode(#[from] SchemaError),
}

/// Corpus shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusConfig {
    pub file_count: usize,
    pub rows_per_file: usize,
    /// Parent of the temporary directory; the system temp dir if unset.
    pub work_dir: Option<PathBuf>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            file_count: DEFAULT_FILE_COUNT,
            rows_per_file: DEFAULT_ROWS_PER_FILE,
            work_dir: None,
        }
    }
}

impl CorpusConfig {
    pub fn new(file_count: usize, rows_per_file: usize) -> Self {
        Self {
            file_count,
            rows_per_file,
            work_dir: None,
        }
    }

    pub fn with_work_dir(mut self, work_dir: Option<PathBuf>) -> Self {
        self.work_dir = work_dir;
        self
    }
}

/// A written corpus. Dropping it deletes the files.
#[derive(Debug)]
pub struct Corpus {
    dir: TempDir,
    paths: Vec<PathBuf>,
    rows_per_file: usize,
}

impl Corpus {
    /// Directory holding the corpus files.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// File paths in the fixed order shared by the oracle and the invoker.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Total number of data rows, headers excluded.
    pub fn record_count(&self) -> usize {
        self.paths.len() * self.rows_per_file
    }
}

/// Name of the `index`-th corpus file.
pub fn corpus_file_name(index: usize) -> String {
    format!("input-{:03}.csv", index)
}

/// Write `config.file_count` files of freshly generated records.
///
/// Each file gets the header row if the case asks for one, followed by
/// `config.rows_per_file` records in canonical field order.
pub fn build_corpus<F, R>(
    fs: &F,
    generator: &RecordGenerator,
    rng: &mut R,
    case: &TestCase,
    config: &CorpusConfig,
) -> Result<Corpus, CorpusError>
where
    F: Filesystem,
    R: Rng + ?Sized,
{
    let mut builder = tempfile::Builder::new();
    builder.prefix(CORPUS_DIR_PREFIX);
    let dir = match &config.work_dir {
        Some(parent) => builder.tempdir_in(parent),
        None => builder.tempdir(),
    }
    .map_err(CorpusError::CreateDir)?;

    let mut paths = Vec::with_capacity(config.file_count);
    for index in 0..config.file_count {
        let path = dir.path().join(corpus_file_name(index));
        let records: Vec<Record> = (0..config.rows_per_file)
            .map(|_| generator.generate_record(rng))
            .collect();
        let content = write_records(&records, case.delimiter(), case.has_header())?;

        fs.write_file(&path, content.as_bytes())
            .map_err(|source| CorpusError::Write {
                path: path.clone(),
                source,
            })?;
        paths.push(path);
    }

    Ok(Corpus {
        dir,
        paths,
        rows_per_file: config.rows_per_file,
    })
}
