//! Comparison result types.

use serde::Serialize;
use sortcheck_schema::{Field, TestCase};

/// Failure samples kept per report.
pub const MAX_FAILURE_SAMPLES: usize = 3;

/// One mismatching cell.
///
/// `expected` or `actual` is `None` when the row only exists on the other
/// side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureSample {
    pub row: usize,
    pub column: usize,
    pub field: Field,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

/// Outcome of comparing the oracle against the program's rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Comparison {
    pub expected_rows: usize,
    pub actual_rows: usize,
    pub failures: Vec<FailureSample>,
}

impl Comparison {
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Per-case report emitted in the final JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    pub testcase: TestCase,
    /// Space-joined argv of the program invocation.
    pub invocation: String,
    /// Exit code of the program under test; `None` if killed by a signal.
    pub exit_status: Option<i32>,
    pub expected_rows: usize,
    pub actual_rows: usize,
    pub failure_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failure_samples: Vec<FailureSample>,
}

impl ComparisonReport {
    /// Build a report, keeping the first few failures as samples.
    pub fn new(
        testcase: TestCase,
        invocation: String,
        exit_status: Option<i32>,
        comparison: Comparison,
    ) -> Self {
        let failure_count = comparison.failure_count();
        let mut failure_samples = comparison.failures;
        failure_samples.truncate(MAX_FAILURE_SAMPLES);

        Self {
            testcase,
            invocation,
            exit_status,
            expected_rows: comparison.expected_rows,
            actual_rows: comparison.actual_rows,
            failure_count,
            failure_samples,
        }
    }

    pub fn passed(&self) -> bool {
        self.failure_count == 0
    }
}
