//! Filesystem abstraction and corpus builder for sortcheck.
//!
//! This crate provides:
//! - Filesystem trait with real and mock implementations
//! - Corpus builder writing per-case input files into a scoped temp directory

pub mod corpus;
pub mod writer;

pub use corpus::{
    build_corpus, corpus_file_name, Corpus, CorpusConfig, CorpusError, CORPUS_DIR_PREFIX,
    DEFAULT_FILE_COUNT, DEFAULT_ROWS_PER_FILE,
};
pub use writer::{FailingFilesystem, Filesystem, FsError, MockFilesystem, RealFilesystem};
