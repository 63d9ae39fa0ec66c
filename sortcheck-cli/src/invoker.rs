//! Launching the program under test.
//!
//! The argv contract is `program -S<delim> [-E] (-f <field> -d <dir>)* -- <paths>`,
//! with fields and directions spelled by their wire names.

use std::borrow::Cow;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::string::FromUtf8Error;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use sortcheck_schema::TestCase;
use thiserror::Error;

use crate::sleeper::Sleeper;

/// Interval between `try_wait` polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Errors from running the program under test.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("failed to launch {}: {source}", program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} did not exit within {:?}", program.display(), timeout)]
    Timeout { program: PathBuf, timeout: Duration },

    #[error("unparseable output from {}: {source}", program.display())]
    Encoding {
        program: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    #[error("failed to capture program output: {0}")]
    Capture(#[from] io::Error),
}

/// Arguments for one test case, in the program's CLI contract.
pub fn build_argv<P: AsRef<Path>>(paths: &[P], case: &TestCase) -> Vec<String> {
    let mut args = vec![format!("-S{}", case.delimiter())];
    if case.has_header() {
        args.push("-E".to_string());
    }
    for key in case.sort_keys() {
        args.push("-f".to_string());
        args.push(key.field.wire_name().to_string());
        args.push("-d".to_string());
        args.push(key.direction.wire_name().to_string());
    }
    args.push("--".to_string());
    args.extend(paths.iter().map(|p| p.as_ref().to_string_lossy().into_owned()));
    args
}

/// A program together with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Invocation of `program` for one test case over the corpus `paths`.
    pub fn for_case<P: AsRef<Path>>(program: impl Into<PathBuf>, paths: &[P], case: &TestCase) -> Self {
        Self::new(program, build_argv(paths, case))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Space-joined argv, as shown in reports. Arguments containing
    /// whitespace or quotes are single-quoted.
    pub fn display(&self) -> String {
        let mut out = quote_arg(&self.program.to_string_lossy()).into_owned();
        for arg in &self.args {
            out.push(' ');
            out.push_str(&quote_arg(arg));
        }
        out
    }
}

fn quote_arg(arg: &str) -> Cow<'_, str> {
    let plain = !arg.is_empty()
        && !arg
            .chars()
            .any(|c| c.is_whitespace() || c == '\'' || c == '"');
    if plain {
        Cow::Borrowed(arg)
    } else {
        Cow::Owned(format!("'{}'", arg.replace('\'', r"'\''")))
    }
}

/// What the program produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramOutput {
    pub stdout: String,
    /// `None` when the process was terminated by a signal.
    pub exit_status: Option<i32>,
}

/// Trait for running the program under test.
pub trait ProgramRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProgramOutput, InvokeError>;
}

/// Runs the program as a child process.
///
/// stdin is closed, stderr is inherited and stdout is drained on a separate
/// thread so a chatty program cannot block on a full pipe.
#[derive(Debug, Clone)]
pub struct ProcessRunner<S> {
    sleeper: S,
    timeout: Option<Duration>,
    poll_interval: Duration,
}

impl<S: Sleeper> ProcessRunner<S> {
    pub fn new(sleeper: S) -> Self {
        Self {
            sleeper,
            timeout: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    fn kill(child: &mut Child) {
        let _ = child.kill();
        let _ = child.wait();
    }
}

impl<S: Sleeper> ProgramRunner for ProcessRunner<S> {
    fn run(&self, invocation: &Invocation) -> Result<ProgramOutput, InvokeError> {
        let mut child = Command::new(invocation.program())
            .args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| InvokeError::Launch {
                program: invocation.program().to_path_buf(),
                source,
            })?;

        let Some(mut stdout) = child.stdout.take() else {
            Self::kill(&mut child);
            return Err(InvokeError::Capture(io::Error::new(
                io::ErrorKind::Other,
                "stdout was not piped",
            )));
        };
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = tx.send(stdout.read_to_end(&mut buf).map(|_| buf));
        });

        let started = Instant::now();
        let timed_out = |timeout| InvokeError::Timeout {
            program: invocation.program().to_path_buf(),
            timeout,
        };
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {}
                Err(e) => {
                    Self::kill(&mut child);
                    return Err(InvokeError::Capture(e));
                }
            }
            if let Some(timeout) = self.timeout {
                if started.elapsed() >= timeout {
                    // The reader thread is left detached; a grandchild may
                    // still hold the pipe open.
                    Self::kill(&mut child);
                    return Err(timed_out(timeout));
                }
            }
            self.sleeper.sleep(self.poll_interval);
        };

        // A grandchild that inherited stdout keeps the pipe open after the
        // child exits, so the drain shares the same deadline.
        let drained = match self.timeout {
            Some(timeout) => match rx.recv_timeout(timeout.saturating_sub(started.elapsed())) {
                Ok(drained) => drained,
                Err(RecvTimeoutError::Timeout) => return Err(timed_out(timeout)),
                Err(RecvTimeoutError::Disconnected) => return Err(reader_lost()),
            },
            None => rx.recv().map_err(|_| reader_lost())?,
        };
        let stdout = String::from_utf8(drained?).map_err(|source| InvokeError::Encoding {
            program: invocation.program().to_path_buf(),
            source,
        })?;

        Ok(ProgramOutput {
            stdout,
            exit_status: status.code(),
        })
    }
}

fn reader_lost() -> InvokeError {
    InvokeError::Capture(io::Error::new(
        io::ErrorKind::Other,
        "stdout reader stopped without a result",
    ))
}
