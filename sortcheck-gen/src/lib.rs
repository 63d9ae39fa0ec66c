//! Randomized input generation for sortcheck.
//!
//! This crate provides:
//! - `RecordGenerator` for synthetic person records
//! - `generate_cases` for randomized sort configurations

pub mod cases;
pub mod config;
mod names;
pub mod record;

pub use cases::{generate_case, generate_cases, DuplicateKeyPolicy, DEFAULT_MAX_KEYS};
pub use config::{GenerationError, GeneratorConfig, NameSource, DEFAULT_NAME_LENGTH};
pub use record::{random_name, RecordGenerator, BIRTH_WINDOW_DAYS, TLDS};
