//! Per-platform tool selection.
//!
//! Each supported [`Platform`] maps to one static [`PlatformProfile`]: which
//! command lists listening sockets, how its output is parsed, what to try if
//! it fails, and how a process is killed.

use crate::domain::Platform;
use crate::executor::{CommandSpec, ExitPolicy};
use crate::scanner::{self, ParseFn};

/// One socket-listing tool invocation and the parser for its output.
#[derive(Clone, Copy)]
pub struct Probe {
    /// Tool name, for logs.
    pub tool: &'static str,
    pub command: fn(u16) -> CommandSpec,
    pub exit_policy: ExitPolicy,
    pub parse: ParseFn,
}

/// Everything the resolver needs to know about one platform.
#[derive(Clone, Copy)]
pub struct PlatformProfile {
    pub primary: Probe,
    /// Tried once when the primary probe fails to execute.
    pub fallback: Option<Probe>,
    pub kill: fn(&str) -> CommandSpec,
}

impl PlatformProfile {
    /// The profile for `platform`, or `None` when it is unsupported.
    pub fn for_platform(platform: &Platform) -> Option<&'static PlatformProfile> {
        match platform {
            Platform::MacOs => Some(&MACOS),
            Platform::Linux => Some(&LINUX),
            Platform::Windows => Some(&WINDOWS),
            Platform::Unsupported(_) => None,
        }
    }
}

static MACOS: PlatformProfile = PlatformProfile {
    primary: Probe {
        tool: "lsof",
        command: lsof_command,
        // lsof exits 1 when nothing matches the filter
        exit_policy: ExitPolicy::EmptyOnExit(1),
        parse: scanner::parse_lsof_output,
    },
    fallback: None,
    kill: unix_kill_command,
};

static LINUX: PlatformProfile = PlatformProfile {
    primary: Probe {
        tool: "ss",
        command: ss_command,
        exit_policy: ExitPolicy::Strict,
        parse: scanner::parse_ss_output,
    },
    fallback: Some(Probe {
        tool: "netstat",
        command: linux_netstat_command,
        exit_policy: ExitPolicy::Strict,
        parse: scanner::parse_linux_netstat_output,
    }),
    kill: unix_kill_command,
};

static WINDOWS: PlatformProfile = PlatformProfile {
    primary: Probe {
        tool: "netstat",
        command: windows_netstat_command,
        exit_policy: ExitPolicy::Strict,
        parse: scanner::parse_windows_netstat_output,
    },
    fallback: None,
    kill: taskkill_command,
};

/// `lsof -i tcp:<port> -sTCP:LISTEN -P -n`
///
/// - -sTCP:LISTEN: Show only listening sockets
/// - -P: Show port numbers (don't resolve to service names)
/// - -n: Show IP addresses (don't resolve to hostnames)
fn lsof_command(port: u16) -> CommandSpec {
    CommandSpec::new(
        "lsof",
        [
            "-i".to_string(),
            format!("tcp:{}", port),
            "-sTCP:LISTEN".to_string(),
            "-P".to_string(),
            "-n".to_string(),
        ],
    )
}

/// `ss -tulnp sport = :<port>`
///
/// -p is required for the users:(...) column; ss joins the trailing
/// arguments into a single filter expression.
fn ss_command(port: u16) -> CommandSpec {
    CommandSpec::new(
        "ss",
        [
            "-tulnp".to_string(),
            "sport".to_string(),
            "=".to_string(),
            format!(":{}", port),
        ],
    )
}

/// `netstat -tulnp`, unfiltered.
fn linux_netstat_command(_port: u16) -> CommandSpec {
    CommandSpec::new("netstat", ["-tulnp"])
}

/// `netstat -ano`, unfiltered: Windows netstat has no port filter.
fn windows_netstat_command(_port: u16) -> CommandSpec {
    CommandSpec::new("netstat", ["-ano"])
}

fn unix_kill_command(pid: &str) -> CommandSpec {
    CommandSpec::new("kill", ["-9", pid])
}

fn taskkill_command(pid: &str) -> CommandSpec {
    CommandSpec::new("taskkill", ["/PID", pid, "/F"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_platform_has_no_profile() {
        let platform = Platform::Unsupported("freebsd".to_string());
        assert!(PlatformProfile::for_platform(&platform).is_none());
    }

    #[test]
    fn test_macos_profile() {
        let profile = PlatformProfile::for_platform(&Platform::MacOs).unwrap();
        assert_eq!(
            (profile.primary.command)(3000).to_string(),
            "lsof -i tcp:3000 -sTCP:LISTEN -P -n"
        );
        assert_eq!(profile.primary.exit_policy, ExitPolicy::EmptyOnExit(1));
        assert!(profile.fallback.is_none());
        assert_eq!((profile.kill)("1234").to_string(), "kill -9 1234");
    }

    #[test]
    fn test_linux_profile_falls_back_to_netstat() {
        let profile = PlatformProfile::for_platform(&Platform::Linux).unwrap();
        assert_eq!(
            (profile.primary.command)(8080).to_string(),
            "ss -tulnp sport = :8080"
        );
        let fallback = profile.fallback.unwrap();
        assert_eq!(fallback.tool, "netstat");
        assert_eq!((fallback.command)(8080).to_string(), "netstat -tulnp");
    }

    #[test]
    fn test_windows_profile() {
        let profile = PlatformProfile::for_platform(&Platform::Windows).unwrap();
        assert_eq!((profile.primary.command)(8080).to_string(), "netstat -ano");
        assert!(profile.fallback.is_none());
        assert_eq!(
            (profile.kill)("4567").to_string(),
            "taskkill /PID 4567 /F"
        );
    }
}
