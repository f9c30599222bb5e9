//! Error types for the portprobe-core library.

use thiserror::Error;

use crate::executor::ExecError;

/// Result type alias for portprobe operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving the process behind a port.
///
/// "Nothing is listening" is not an error: it is an empty result.
#[derive(Error, Debug)]
pub enum Error {
    /// The operating system family has no supported tool chain.
    #[error("Platform not supported: {0}")]
    UnsupportedPlatform(String),

    /// The discovery tool could not be run, timed out, or failed.
    #[error("Command execution failed: {0}")]
    CommandExecution(#[from] ExecError),

    /// A port number outside 1..=65535 or not a number at all.
    #[error("Invalid port: {0}")]
    InvalidPort(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
