//! Windows `netstat -ano` and `tasklist` output parsing.

use std::sync::LazyLock;

use regex::Regex;

use super::Listener;

/// `TCP <local>:<port> <foreign> LISTENING <pid>`. Rows in any other state
/// (ESTABLISHED, TIME_WAIT, ...) and UDP rows do not match.
static NETSTAT_LISTENING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*TCP\s+\S+:(\d+)\s+\S+\s+LISTENING\s+(\d+)\s*$")
        .expect("netstat pattern is valid")
});

/// Parse the output of `netstat -ano`.
///
/// Example output:
/// ```text
/// Active Connections
///
///   Proto  Local Address          Foreign Address        State           PID
///   TCP    0.0.0.0:135            0.0.0.0:0              LISTENING       1020
///   TCP    [::]:445               [::]:0                 LISTENING       4
///   TCP    127.0.0.1:3000         0.0.0.0:0              LISTENING       5432
/// ```
///
/// netstat never reports a process name, so every listener comes back
/// unnamed.
pub fn parse_netstat_output(output: &str) -> Vec<Listener> {
    output
        .lines()
        .filter_map(|line| {
            let caps = NETSTAT_LISTENING.captures(line)?;
            Some(Listener::new(&caps[2], None, &caps[1]))
        })
        .collect()
}

/// Extract the image name from `tasklist /FI "PID eq N" /NH /FO CSV`.
///
/// Example output:
/// ```text
/// "node.exe","5432","Console","1","45,000 K"
/// ```
///
/// When nothing matches the filter tasklist prints an unquoted
/// `INFO: No tasks are running...` line, which yields `None`.
pub fn parse_tasklist_output(output: &str) -> Option<String> {
    let line = output.lines().map(str::trim).find(|l| !l.is_empty())?;
    let rest = line.strip_prefix('"')?;
    let end = rest.find('"')?;
    let name = rest[..end].trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listening_line() {
        let line = "  TCP    0.0.0.0:8080   0.0.0.0:0    LISTENING       4567";
        let listeners = parse_netstat_output(line);
        assert_eq!(listeners.len(), 1);
        assert_eq!(listeners[0].pid, "4567");
        assert_eq!(listeners[0].port, "8080");
        assert_eq!(listeners[0].name, None);
    }

    #[test]
    fn test_parse_netstat_output() {
        let output = "\r\nActive Connections\r\n\r\n  Proto  Local Address          Foreign Address        State           PID\r\n  TCP    0.0.0.0:135            0.0.0.0:0              LISTENING       1020\r\n  TCP    [::]:445               [::]:0                 LISTENING       4\r\n  TCP    127.0.0.1:3000         127.0.0.1:52100        ESTABLISHED     5432\r\n  TCP    127.0.0.1:3000         0.0.0.0:0              LISTENING       5432\r\n  UDP    0.0.0.0:5353           *:*                                    2200\r\n";

        let listeners = parse_netstat_output(output);
        let found: Vec<(&str, &str)> = listeners
            .iter()
            .map(|l| (l.port.as_str(), l.pid.as_str()))
            .collect();
        assert_eq!(found, vec![("135", "1020"), ("445", "4"), ("3000", "5432")]);
    }

    #[test]
    fn test_established_rows_never_match() {
        let line = "  TCP    192.168.1.10:8080   10.0.0.5:443    ESTABLISHED     4567";
        assert!(parse_netstat_output(line).is_empty());
    }

    #[test]
    fn test_parse_tasklist_output() {
        let output = "\r\n\"node.exe\",\"5432\",\"Console\",\"1\",\"45,000 K\"\r\n";
        assert_eq!(parse_tasklist_output(output).as_deref(), Some("node.exe"));
    }

    #[test]
    fn test_parse_tasklist_no_match() {
        let output = "INFO: No tasks are running which match the specified criteria.\r\n";
        assert_eq!(parse_tasklist_output(output), None);
        assert_eq!(parse_tasklist_output(""), None);
    }
}
