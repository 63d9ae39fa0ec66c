//! Exit codes for the sortcheck CLI.

use sortcheck_conformance::OracleError;

use crate::commands::{CommandError, RunSummary};
use crate::invoker::InvokeError;

/// Exit code constants.
pub mod codes {
    /// Every test case matched.
    pub const SUCCESS: i32 = 0;
    /// At least one mismatch was found.
    pub const MISMATCH: i32 = 1;
    /// Invalid arguments or generator configuration.
    pub const INVALID_ARGS: i32 = 2;
    /// Corpus or report IO error.
    pub const IO_ERROR: i32 = 3;
    /// A corpus file or the program output could not be parsed.
    pub const PARSE_ERROR: i32 = 4;
    /// The program under test could not be started.
    pub const LAUNCH_ERROR: i32 = 5;
    /// The program under test exceeded its timeout.
    pub const TIMEOUT: i32 = 6;
    /// Interrupted by signal (128 + signal number).
    pub const SIGINT: i32 = 130;
}

/// Map a CommandError to an exit code.
pub fn exit_code(error: &CommandError) -> i32 {
    match error {
        CommandError::InvalidArgument(_) | CommandError::Generation(_) => codes::INVALID_ARGS,
        CommandError::Corpus(_) | CommandError::Report(_) => codes::IO_ERROR,
        CommandError::Oracle(OracleError::Read { .. }) => codes::IO_ERROR,
        CommandError::Oracle(OracleError::Parse { .. })
        | CommandError::Output { .. }
        | CommandError::Invoke(InvokeError::Encoding { .. }) => codes::PARSE_ERROR,
        CommandError::Invoke(InvokeError::Launch { .. }) => codes::LAUNCH_ERROR,
        CommandError::Invoke(InvokeError::Timeout { .. }) => codes::TIMEOUT,
        CommandError::Invoke(InvokeError::Capture(_)) => codes::IO_ERROR,
    }
}

/// Exit code for a run that completed or was interrupted.
pub fn summary_exit_code(summary: &RunSummary) -> i32 {
    if summary.interrupted {
        codes::SIGINT
    } else if summary.passed() {
        codes::SUCCESS
    } else {
        codes::MISMATCH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliError;
    use sortcheck_fs::{CorpusError, FsError};
    use sortcheck_gen::GenerationError;
    use sortcheck_schema::ParseError;
    use std::io;
    use std::path::PathBuf;
    use std::time::Duration;

    fn parse_error() -> ParseError {
        ParseError::FieldCount {
            line: 1,
            expected: 5,
            found: 1,
        }
    }

    #[test]
    fn test_exit_code_invalid_argument() {
        let error = CommandError::InvalidArgument(CliError::InvalidFileCount(0));
        assert_eq!(exit_code(&error), codes::INVALID_ARGS);
    }

    #[test]
    fn test_exit_code_generation() {
        let error = CommandError::Generation(GenerationError::InvalidMaxKeys(0));
        assert_eq!(exit_code(&error), codes::INVALID_ARGS);
    }

    #[test]
    fn test_exit_code_corpus() {
        let error = CommandError::Corpus(CorpusError::Write {
            path: PathBuf::from("/tmp/x"),
            source: FsError::Content("test".to_string()),
        });
        assert_eq!(exit_code(&error), codes::IO_ERROR);
    }

    #[test]
    fn test_exit_code_oracle() {
        let read = CommandError::Oracle(OracleError::Read {
            path: PathBuf::from("/tmp/x"),
            source: FsError::Content("test".to_string()),
        });
        assert_eq!(exit_code(&read), codes::IO_ERROR);

        let parse = CommandError::Oracle(OracleError::Parse {
            path: PathBuf::from("/tmp/x"),
            source: parse_error(),
        });
        assert_eq!(exit_code(&parse), codes::PARSE_ERROR);
    }

    #[test]
    fn test_exit_code_output() {
        let error = CommandError::Output {
            invocation: "sorter -S,".to_string(),
            source: parse_error(),
        };
        assert_eq!(exit_code(&error), codes::PARSE_ERROR);
        assert!(error.to_string().contains("sorter -S,"));
    }

    #[test]
    fn test_exit_code_invoke() {
        let launch = CommandError::Invoke(InvokeError::Launch {
            program: PathBuf::from("/bin/none"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        });
        assert_eq!(exit_code(&launch), codes::LAUNCH_ERROR);

        let timeout = CommandError::Invoke(InvokeError::Timeout {
            program: PathBuf::from("/bin/slow"),
            timeout: Duration::from_secs(2),
        });
        assert_eq!(exit_code(&timeout), codes::TIMEOUT);

        let capture = CommandError::Invoke(InvokeError::Capture(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "pipe",
        )));
        assert_eq!(exit_code(&capture), codes::IO_ERROR);
    }

    #[test]
    fn test_exit_code_non_utf8_output() {
        let source = String::from_utf8(vec![b'a', 0xff]).unwrap_err();
        let error = CommandError::Invoke(InvokeError::Encoding {
            program: PathBuf::from("/bin/sorter"),
            source,
        });
        assert_eq!(exit_code(&error), codes::PARSE_ERROR);
        assert!(error.to_string().contains("unparseable output from /bin/sorter"));
    }

    #[test]
    fn test_summary_exit_code() {
        let mut summary = RunSummary::default();
        assert_eq!(summary_exit_code(&summary), codes::SUCCESS);

        summary.total_failures = 4;
        assert_eq!(summary_exit_code(&summary), codes::MISMATCH);

        summary.interrupted = true;
        assert_eq!(summary_exit_code(&summary), codes::SIGINT);
    }

    #[test]
    fn test_exit_codes_constants() {
        assert_eq!(codes::SUCCESS, 0);
        assert_eq!(codes::MISMATCH, 1);
        assert_eq!(codes::INVALID_ARGS, 2);
        assert_eq!(codes::IO_ERROR, 3);
        assert_eq!(codes::PARSE_ERROR, 4);
        assert_eq!(codes::LAUNCH_ERROR, 5);
        assert_eq!(codes::TIMEOUT, 6);
        assert_eq!(codes::SIGINT, 130);
    }
}
