//! Free command - kill every process listening on a port.

use std::process::ExitCode;

use anyhow::Result;
use portprobe_core::{parse_port, PortProbe};

use super::{print_table, EXIT_SCAN_FAILED};

pub fn run(engine: &PortProbe, port: &str, yes: bool, json: bool) -> Result<ExitCode> {
    let port = parse_port(port)?;

    let records = match engine.find_processes_on_port(port) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Port scan failed: {}", e);
            return Ok(ExitCode::from(EXIT_SCAN_FAILED));
        }
    };

    if records.is_empty() {
        if json {
            println!("[]");
        } else {
            println!("Port {} is already free.", port);
        }
        return Ok(ExitCode::SUCCESS);
    }

    if !yes {
        if json {
            println!("{}", serde_json::to_string_pretty(&records)?);
        } else {
            print_table(&records);
            println!("\nRe-run with --yes to kill {} process(es).", records.len());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut results = Vec::with_capacity(records.len());
    for record in &records {
        let killed = engine.kill_process(record.pid());
        if !json {
            if killed {
                println!("Killed PID {} ({}).", record.pid(), record.command());
            } else {
                eprintln!("Failed to kill PID {} ({}).", record.pid(), record.command());
            }
        }
        results.push(serde_json::json!({
            "pid": record.pid(),
            "command": record.command(),
            "port": record.port(),
            "killed": killed,
        }));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    let all_killed = results.iter().all(|r| r["killed"] == true);
    Ok(if all_killed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
