//! Bounded-timeout execution of external commands.
//!
//! Running a command and judging its exit code are separate steps. A runner
//! (see [`crate::ports::CommandRunner`]) only reports what happened; the
//! [`ExitPolicy`] of the invocation then decides whether a non-zero exit
//! means failure or simply "nothing found".

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::ports::CommandRunner;

/// A program plus its argument vector. Never interpreted by a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Captured result of a command that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Exit code, or -1 when the process was terminated by a signal.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

#[cfg(test)]
impl CommandOutput {
    pub(crate) fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub(crate) fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Errors raised while executing an external command.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The program could not be started (usually: not on PATH).
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting for the child or reading its output failed.
    #[error("I/O error while running `{program}`: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program did not exit in time and was killed.
    #[error("`{program}` did not finish within {timeout_ms}ms")]
    Timeout { program: String, timeout_ms: u64 },

    /// The program exited with a code its exit policy treats as failure.
    #[error("`{program}` exited with code {code}: {stderr}")]
    NonZeroExit {
        program: String,
        code: i32,
        stderr: String,
    },
}

/// How a non-zero exit code is interpreted for one tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitPolicy {
    /// Only exit code 0 is success.
    #[default]
    Strict,
    /// The given code with blank stdout means "no match" and yields empty
    /// output. `lsof` exits 1 when no socket matches its filter.
    EmptyOnExit(i32),
}

impl ExitPolicy {
    /// Turn a finished command into its stdout, or an error.
    pub fn classify(
        &self,
        spec: &CommandSpec,
        output: CommandOutput,
    ) -> Result<String, ExecError> {
        if output.exit_code == 0 {
            return Ok(output.stdout);
        }

        if let ExitPolicy::EmptyOnExit(code) = *self {
            if output.exit_code == code && output.stdout.trim().is_empty() {
                debug!(command = %spec, code, "Benign exit code, treating as empty result");
                return Ok(String::new());
            }
        }

        Err(ExecError::NonZeroExit {
            program: spec.program.clone(),
            code: output.exit_code,
            stderr: output.stderr.trim().to_string(),
        })
    }
}

/// Run `spec` through `runner` with a timeout and classify the exit code.
pub async fn execute<R: CommandRunner>(
    runner: &R,
    spec: &CommandSpec,
    timeout: Duration,
    policy: ExitPolicy,
) -> Result<String, ExecError> {
    let output = runner.run(spec, timeout).await?;
    policy.classify(spec, output)
}
