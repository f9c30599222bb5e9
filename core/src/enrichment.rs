//! Best-effort lookup of a fuller label for an already matched pid.
//!
//! Socket tools report short names (`lsof`, `ss`) or none at all (Windows
//! `netstat`). A lookup here can only improve a label: every failure
//! returns `None` and the caller keeps what it had.

use std::path::Path;

use tracing::{debug, warn};

use crate::config::ResolverConfig;
use crate::domain::Platform;
use crate::executor::{self, CommandSpec, ExitPolicy};
use crate::ports::CommandRunner;
use crate::scanner::parse_tasklist_output;

/// Look up the full command line (or image name on Windows) of `pid`.
pub async fn lookup_label<R: CommandRunner>(
    runner: &R,
    platform: &Platform,
    pid: &str,
    config: &ResolverConfig,
) -> Option<String> {
    let label = match platform {
        Platform::Windows => {
            let spec = CommandSpec::new(
                "tasklist",
                [
                    "/FI".to_string(),
                    format!("PID eq {}", pid),
                    "/NH".to_string(),
                    "/FO".to_string(),
                    "CSV".to_string(),
                ],
            );
            run_lookup(runner, &spec, config)
                .await
                .and_then(|out| parse_tasklist_output(&out))
        }
        Platform::MacOs => {
            let spec = CommandSpec::new("ps", ["-p", pid, "-o", "command="]);
            run_lookup(runner, &spec, config).await.and_then(non_blank)
        }
        Platform::Linux => {
            let spec = CommandSpec::new("ps", ["-p", pid, "-o", "cmd="]);
            match run_lookup(runner, &spec, config).await.and_then(non_blank) {
                Some(label) => Some(label),
                None => read_proc_cmdline(&config.proc_root, pid).await,
            }
        }
        Platform::Unsupported(_) => None,
    };

    if label.is_none() {
        debug!(pid, "No richer label found, keeping the original");
    }
    label
}

/// Run a lookup command with the short timeout; failures become `None`.
async fn run_lookup<R: CommandRunner>(
    runner: &R,
    spec: &CommandSpec,
    config: &ResolverConfig,
) -> Option<String> {
    match executor::execute(runner, spec, config.enrichment_timeout(), ExitPolicy::Strict).await {
        Ok(stdout) => Some(stdout),
        Err(e) => {
            warn!(command = %spec, error = %e, "Label lookup failed");
            None
        }
    }
}

/// `/proc/<pid>/cmdline` holds NUL-separated arguments.
async fn read_proc_cmdline(proc_root: &Path, pid: &str) -> Option<String> {
    let path = proc_root.join(pid).join("cmdline");
    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let cmdline = String::from_utf8_lossy(&bytes).replace('\0', " ");
            non_blank(cmdline)
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Could not read cmdline");
            None
        }
    }
}

fn non_blank(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  \n".to_string()), None);
        assert_eq!(non_blank(" node app.js\n".to_string()).as_deref(), Some("node app.js"));
    }

    #[tokio::test]
    async fn test_read_proc_cmdline_replaces_nul() {
        let dir = tempdir().unwrap();
        let pid_dir = dir.path().join("9999");
        std::fs::create_dir_all(&pid_dir).unwrap();
        std::fs::write(pid_dir.join("cmdline"), b"node\0server.js\0--port\08080\0").unwrap();

        let label = read_proc_cmdline(dir.path(), "9999").await;
        assert_eq!(label.as_deref(), Some("node server.js --port 8080"));
    }

    #[tokio::test]
    async fn test_read_proc_cmdline_missing_or_empty() {
        let dir = tempdir().unwrap();
        assert_eq!(read_proc_cmdline(dir.path(), "1").await, None);

        // Kernel threads have an empty cmdline
        let pid_dir = dir.path().join("2");
        std::fs::create_dir_all(&pid_dir).unwrap();
        std::fs::write(pid_dir.join("cmdline"), b"").unwrap();
        assert_eq!(read_proc_cmdline(dir.path(), "2").await, None);
    }
}
