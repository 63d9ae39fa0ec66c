//! Reference oracle.
//!
//! Reads a corpus back from disk and sorts it the way a correct program
//! under test must.

use std::path::{Path, PathBuf};

use sortcheck_fs::{Filesystem, FsError};
use sortcheck_schema::{parse_records, ParseError, Record, TestCase};
use thiserror::Error;

/// Errors from reading a corpus.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// Read every corpus file in order and concatenate their records.
///
/// The header line is skipped per file when the case has headers.
pub fn read_corpus<F: Filesystem, P: AsRef<Path>>(
    fs: &F,
    paths: &[P],
    case: &TestCase,
) -> Result<Vec<Record>, OracleError> {
    let mut records = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let content = fs.read_file(path).map_err(|source| OracleError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed = parse_records(&content, case.delimiter(), case.has_header()).map_err(|source| {
            OracleError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        records.extend(parsed);
    }
    Ok(records)
}

/// Sort records by the case's composite key.
///
/// The sort is stable, so records tied on every key keep their
/// concatenation order and repeated runs agree.
pub fn sort_expected(records: &mut [Record], case: &TestCase) {
    let keys = case.effective_keys();
    records.sort_by(|a, b| a.cmp_by_keys(b, &keys));
}

/// Expected output of the program under test for this corpus.
pub fn compute_expected<F: Filesystem, P: AsRef<Path>>(
    fs: &F,
    paths: &[P],
    case: &TestCase,
) -> Result<Vec<Record>, OracleError> {
    let mut records = read_corpus(fs, paths, case)?;
    sort_expected(&mut records, case);
    Ok(records)
}
