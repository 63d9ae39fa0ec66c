//! Schema errors.

use thiserror::Error;

use crate::field::Field;

/// Errors from building or encoding schema values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("unknown field: {0:?}")]
    UnknownField(String),

    #[error("unknown sort direction: {0:?}")]
    UnknownDirection(String),

    #[error("test case has no sort keys")]
    EmptySortKeys,

    #[error("field {0} appears more than once in the sort keys")]
    DuplicateField(Field),

    #[error("delimiter {0:?} must be a single ASCII character other than a quote or newline")]
    InvalidDelimiter(char),

    #[error("failed to encode records: {0}")]
    Encode(String),
}
