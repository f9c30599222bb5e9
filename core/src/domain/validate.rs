//! Input checks callers run before handing values to the resolver.

use crate::error::{Error, Result};

/// Parse a user-supplied port number, accepting only 1..=65535.
pub fn parse_port(input: &str) -> Result<u16> {
    let trimmed = input.trim();
    match trimmed.parse::<u32>() {
        Ok(port @ 1..=65535) => Ok(port as u16),
        Ok(_) => Err(Error::InvalidPort(format!(
            "{} is outside the range 1-65535",
            trimmed
        ))),
        Err(_) => Err(Error::InvalidPort(format!("{:?} is not a number", trimmed))),
    }
}

/// True for a positive decimal process ID.
///
/// `kill -9 0` and `kill -9 -1` signal whole process groups, so zero and
/// anything with a sign are rejected.
pub fn is_valid_pid(pid: &str) -> bool {
    !pid.is_empty() && pid.bytes().all(|b| b.is_ascii_digit()) && pid.bytes().any(|b| b != b'0')
}
