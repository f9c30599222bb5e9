//! Command runner port (interface).

use std::time::Duration;

use crate::executor::{CommandOutput, CommandSpec, ExecError};

/// Port for running external programs.
///
/// Implementations spawn the program, wait at most `timeout` for it, and
/// report its exit code and output. A non-zero exit code is returned as
/// `Ok`: judging it is the caller's job (see [`crate::executor::ExitPolicy`]).
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion or until the timeout elapses.
    fn run(
        &self,
        spec: &CommandSpec,
        timeout: Duration,
    ) -> impl std::future::Future<Output = Result<CommandOutput, ExecError>> + Send;
}
