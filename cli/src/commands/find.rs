//! Find command - show the processes listening on a port.

use std::process::ExitCode;

use anyhow::Result;
use portprobe_core::{parse_port, PortProbe};

use super::{print_table, EXIT_SCAN_FAILED};

pub fn run(engine: &PortProbe, port: &str, json: bool) -> Result<ExitCode> {
    let port = parse_port(port)?;

    let records = match engine.find_processes_on_port(port) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Port scan failed: {}", e);
            return Ok(ExitCode::from(EXIT_SCAN_FAILED));
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(ExitCode::SUCCESS);
    }

    if records.is_empty() {
        println!("No process is listening on port {}.", port);
        return Ok(ExitCode::SUCCESS);
    }

    print_table(&records);
    println!("\nTotal: {} processes", records.len());
    Ok(ExitCode::SUCCESS)
}
