//! Logging abstraction for testable output.
//!
//! Diagnostics and the per-case progress markers both go to stderr so that
//! stdout carries only the JSON report.

use std::io::Write;
use std::sync::{Arc, RwLock};

/// Progress marker for a passing test case.
pub const PASS_MARK: char = '.';

/// Progress marker for a failing test case.
pub const FAIL_MARK: char = '𝍐';

/// Verbosity level for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Normal output (always shown)
    Normal,
    /// Verbose output (-v flag)
    Verbose,
    /// Debug output (-vv flag)
    Debug,
}

impl Verbosity {
    /// Create verbosity from CLI flag count.
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }
}

/// Trait for logging output.
pub trait Logger: Send + Sync {
    /// Log a message at the given verbosity level.
    fn log(&self, level: Verbosity, message: &str);

    /// Emit one progress marker, without a line break.
    fn progress(&self, passed: bool);

    /// Terminate the progress line.
    fn progress_done(&self);

    /// Log at normal level (always visible).
    fn info(&self, message: &str) {
        self.log(Verbosity::Normal, message);
    }

    /// Log at verbose level (requires -v).
    fn verbose(&self, message: &str) {
        self.log(Verbosity::Verbose, message);
    }

    /// Log at debug level (requires -vv).
    fn debug(&self, message: &str) {
        self.log(Verbosity::Debug, message);
    }
}

fn mark(passed: bool) -> char {
    if passed {
        PASS_MARK
    } else {
        FAIL_MARK
    }
}

/// Logger that writes to stderr.
#[derive(Debug)]
pub struct StderrLogger {
    level: Verbosity,
}

impl StderrLogger {
    pub fn new(level: Verbosity) -> Self {
        Self { level }
    }

    pub fn normal() -> Self {
        Self::new(Verbosity::Normal)
    }
}

impl Logger for StderrLogger {
    fn log(&self, level: Verbosity, message: &str) {
        if level <= self.level {
            let _ = writeln!(std::io::stderr(), "{}", message);
        }
    }

    fn progress(&self, passed: bool) {
        let mut stderr = std::io::stderr();
        let _ = write!(stderr, "{}", mark(passed));
        let _ = stderr.flush();
    }

    fn progress_done(&self) {
        let _ = writeln!(std::io::stderr());
    }
}

/// A captured log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Verbosity,
    pub message: String,
}

/// Mock logger for testing that captures all messages and markers.
#[derive(Debug, Clone)]
pub struct MockLogger {
    messages: Arc<RwLock<Vec<LogEntry>>>,
    marks: Arc<RwLock<String>>,
}

impl MockLogger {
    /// Create a mock logger that captures all levels.
    pub fn capture_all() -> Self {
        Self {
            messages: Arc::new(RwLock::new(Vec::new())),
            marks: Arc::new(RwLock::new(String::new())),
        }
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.messages.read().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.message).collect()
    }

    pub fn messages_at_level(&self, level: Verbosity) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .map(|e| e.message)
            .collect()
    }

    /// Check if any message contains the given substring.
    pub fn contains(&self, substring: &str) -> bool {
        self.messages().iter().any(|m| m.contains(substring))
    }

    /// Progress markers emitted so far; a terminated line ends in `\n`.
    pub fn progress_marks(&self) -> String {
        self.marks.read().unwrap().clone()
    }
}

impl Logger for MockLogger {
    fn log(&self, level: Verbosity, message: &str) {
        self.messages.write().unwrap().push(LogEntry {
            level,
            message: message.to_string(),
        });
    }

    fn progress(&self, passed: bool) {
        self.marks.write().unwrap().push(mark(passed));
    }

    fn progress_done(&self) {
        self.marks.write().unwrap().push('\n');
    }
}

/// A no-op logger that discards all messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: Verbosity, _message: &str) {}

    fn progress(&self, _passed: bool) {}

    fn progress_done(&self) {}
}
