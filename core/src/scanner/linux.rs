//! Linux `ss` and `netstat` output parsing.

use std::sync::LazyLock;

use regex::Regex;

use super::Listener;

/// A TCP `LISTEN` row of `ss -tulnp`, capturing the local port and the
/// body of the `users:(...)` column. The leading `tcp` Netid column only
/// appears when more than one protocol is listed.
static SS_LISTEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:tcp\s+)?LISTEN\s+\d+\s+\d+\s+\S*:(\d+)\s+\S+\s+users:\((.*)\)\s*$")
        .expect("ss pattern is valid")
});

/// One `("name",pid=N,fd=M)` entry inside the users column.
static SS_USER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\("([^"]*)",pid=(\d+)"#).expect("ss user pattern is valid")
});

/// A TCP `LISTEN` row of `netstat -tulnp`. The program column is
/// `PID/name`, or `-` when the owner is not visible to the caller.
static NETSTAT_LISTEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*tcp6?\s+\d+\s+\d+\s+\S*:(\d+)\s+\S+\s+LISTEN\s+(\d+)(?:/(\S+))?")
        .expect("netstat pattern is valid")
});

/// Parse `ss -tulnp` output.
///
/// Expected ss output format:
/// ```text
/// Netid State  Recv-Q Send-Q Local Address:Port Peer Address:Port Process
/// tcp   LISTEN 0      511          0.0.0.0:8080      0.0.0.0:*    users:(("node",pid=9999,fd=22))
/// ```
///
/// A socket shared by several processes (pre-forked servers) yields one
/// listener per process.
pub fn parse_ss_output(output: &str) -> Vec<Listener> {
    let mut listeners = Vec::new();

    for line in output.lines() {
        let Some(caps) = SS_LISTEN.captures(line) else {
            continue;
        };
        let port = &caps[1];

        for user in SS_USER.captures_iter(&caps[2]) {
            listeners.push(Listener::new(&user[2], Some(user[1].to_string()), port));
        }
    }

    listeners
}

/// Parse `netstat -tulnp` output.
///
/// Expected netstat output format:
/// ```text
/// Proto Recv-Q Send-Q Local Address           Foreign Address         State       PID/Program name
/// tcp        0      0 0.0.0.0:8080            0.0.0.0:*               LISTEN      1234/java
/// ```
pub fn parse_netstat_output(output: &str) -> Vec<Listener> {
    output
        .lines()
        .filter_map(|line| {
            let caps = NETSTAT_LISTEN.captures(line)?;
            Some(Listener::new(
                &caps[2],
                caps.get(3).map(|m| m.as_str().to_string()),
                &caps[1],
            ))
        })
        .collect()
}
