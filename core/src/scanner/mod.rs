//! Output parsers for each platform's socket inspection tool.
//!
//! Every parser reads the tool's full output and returns one [`Listener`]
//! per listening socket it recognises, for every port. Narrowing down to the
//! queried port happens afterwards, so the patterns stay static.
//!
//! The parsers are plain text functions and are compiled on every target;
//! only the commands that feed them are platform specific.

mod darwin;
mod linux;
mod windows;

pub use darwin::parse_lsof_output;
pub use linux::{parse_netstat_output as parse_linux_netstat_output, parse_ss_output};
pub use windows::{parse_netstat_output as parse_windows_netstat_output, parse_tasklist_output};

/// A listening socket as recognised in raw tool output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listener {
    pub pid: String,
    /// Short process name, when the tool prints one.
    pub name: Option<String>,
    pub port: String,
}

impl Listener {
    pub fn new(pid: impl Into<String>, name: Option<String>, port: impl Into<String>) -> Self {
        Self {
            pid: pid.into(),
            name: name.filter(|n| !n.trim().is_empty()),
            port: port.into(),
        }
    }
}

/// Signature shared by all socket-listing parsers.
pub type ParseFn = fn(&str) -> Vec<Listener>;
