//! The process-on-port record returned by every query.

use serde::Serialize;

/// Label used when no tool reports a name for the process.
pub const UNKNOWN_COMMAND: &str = "(unknown)";

/// A process found listening on a queried port.
///
/// All three fields are kept as text exactly as the source tool printed them.
/// Records are built fresh for each query and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProcessRecord {
    pid: String,
    command: String,
    port: String,
}

impl ProcessRecord {
    /// Create a record. A blank `command` is replaced with [`UNKNOWN_COMMAND`].
    pub fn new(
        pid: impl Into<String>,
        command: impl Into<String>,
        port: impl Into<String>,
    ) -> Self {
        let command = command.into();
        let command = if command.trim().is_empty() {
            UNKNOWN_COMMAND.to_string()
        } else {
            command
        };

        Self {
            pid: pid.into(),
            command,
            port: port.into(),
        }
    }

    /// Process ID as reported by the tool.
    pub fn pid(&self) -> &str {
        &self.pid
    }

    /// Best-effort process name or full command line. Never empty.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Port number as text.
    pub fn port(&self) -> &str {
        &self.port
    }

    /// A copy of this record with a better label, if `label` has content.
    pub(crate) fn relabeled(&self, label: Option<String>) -> Self {
        match label {
            Some(label) if !label.trim().is_empty() => Self {
                pid: self.pid.clone(),
                command: label.trim().to_string(),
                port: self.port.clone(),
            },
            _ => self.clone(),
        }
    }
}

impl std::fmt::Display for ProcessRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[PID: {}] Port {} - {}", self.pid, self.port, self.command)
    }
}
