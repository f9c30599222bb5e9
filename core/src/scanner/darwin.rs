//! macOS `lsof` output parsing.

use std::sync::LazyLock;

use regex::Regex;

use super::Listener;

/// `COMMAND PID USER FD TYPE DEVICE SIZE/OFF NODE NAME` with a listening
/// TCP `NAME` such as `*:3000 (LISTEN)` or `[::1]:8080 (LISTEN)`.
static LSOF_LISTEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\S+)\s+(\d+)\s+\S+\s+\S+\s+(?:IPv[46]|\*)\s+\S+\s+\S+\s+TCP\s+\S*:(\d+)\s+\(LISTEN\)",
    )
    .expect("lsof pattern is valid")
});

/// Parse `lsof -i tcp:<port> -sTCP:LISTEN -P -n` output.
///
/// Expected lsof output format:
/// ```text
/// COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
/// node     34805  code   19u  IPv6 0x3d8015e195af1f3f      0t0  TCP [::1]:3000 (LISTEN)
/// ```
pub fn parse_lsof_output(output: &str) -> Vec<Listener> {
    output
        .lines()
        .filter_map(|line| {
            let caps = LSOF_LISTEN.captures(line)?;
            Some(Listener::new(
                &caps[2],
                Some(unescape_command(&caps[1])),
                &caps[3],
            ))
        })
        .collect()
}

/// lsof hex-escapes spaces and slashes in the COMMAND column.
fn unescape_command(raw: &str) -> String {
    raw.replace("\\x20", " ").replace("\\x2f", "/")
}
