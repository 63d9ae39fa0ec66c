//! Reference oracle and comparator.
//!
//! The oracle re-reads a corpus and sorts it with a stable sort on the test
//! case's keys. The comparator checks the program's output against that
//! result, looking only at the sort-key columns.

pub mod compare;
pub mod oracle;
pub mod types;

pub use compare::{compare, compare_records, parse_actual};
pub use oracle::{compute_expected, read_corpus, sort_expected, OracleError};
pub use types::{Comparison, ComparisonReport, FailureSample, MAX_FAILURE_SAMPLES};
