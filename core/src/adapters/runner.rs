//! Subprocess-backed command runner.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::executor::{CommandOutput, CommandSpec, ExecError};
use crate::ports::CommandRunner;

/// Runs commands as real child processes via `tokio::process`.
///
/// The child is killed if it outlives its timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    async fn run(&self, spec: &CommandSpec, limit: Duration) -> Result<CommandOutput, ExecError> {
        debug!(command = %spec, timeout_ms = limit.as_millis() as u64, "Running command");

        let child = Command::new(&spec.program)
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExecError::Spawn {
                program: spec.program.clone(),
                source,
            })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match timeout(limit, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                return Err(ExecError::Io {
                    program: spec.program.clone(),
                    source,
                })
            }
            Err(_) => {
                return Err(ExecError::Timeout {
                    program: spec.program.clone(),
                    timeout_ms: limit.as_millis() as u64,
                })
            }
        };

        let exit_code = output.status.code().unwrap_or(-1);
        debug!(command = %spec, exit_code, "Command finished");

        Ok(CommandOutput {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_captures_stdout_and_exit_code() {
        let runner = SystemCommandRunner::new();
        let spec = CommandSpec::new("sh", ["-c", "echo hello; exit 3"]);
        let output = runner.run(&spec, Duration::from_secs(5)).await.unwrap();
        assert_eq!(output.exit_code, 3);
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let runner = SystemCommandRunner::new();
        let spec = CommandSpec::new("portprobe-definitely-not-a-binary", Vec::<String>::new());
        let err = runner.run(&spec, Duration::from_secs(1)).await.unwrap_err();
        assert!(matches!(err, ExecError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_slow_command_times_out() {
        let runner = SystemCommandRunner::new();
        let spec = CommandSpec::new("sleep", ["5"]);
        let err = runner.run(&spec, Duration::from_millis(100)).await.unwrap_err();
        assert!(matches!(err, ExecError::Timeout { timeout_ms: 100, .. }));
    }
}
