//! sortcheck data model.
//!
//! Defines the record shape shared by the corpus writer, the oracle and the
//! output parser, plus the test case type that drives one comparison round.

mod error;
mod field;
mod record;
mod testcase;

pub use error::SchemaError;
pub use field::{Direction, Field, SortKey};
pub use record::{header_row, parse_records, write_records, ParseError, Record, CATEGORIES, DATE_FORMAT};
pub use testcase::{TestCase, DELIMITERS};
