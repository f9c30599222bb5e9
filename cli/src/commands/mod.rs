//! Subcommand implementations.

pub mod config;
pub mod find;
pub mod free;
pub mod kill;

use portprobe_core::ProcessRecord;

/// Exit status when the scan itself failed, as opposed to finding nothing.
pub const EXIT_SCAN_FAILED: u8 = 2;

pub(crate) fn print_table(records: &[ProcessRecord]) {
    println!("{:<8} {:<6} COMMAND", "PID", "PORT");
    println!("{}", "-".repeat(60));

    for record in records {
        println!(
            "{:<8} {:<6} {}",
            record.pid(),
            record.port(),
            truncate(record.command(), 80)
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max - 1).collect();
        format!("{}…", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("node", 10), "node");
        assert_eq!(truncate("abcdefghijkl", 5), "abcd…");
    }
}
