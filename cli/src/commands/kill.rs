//! Kill command - force-kill a process by PID.

use std::process::ExitCode;

use anyhow::Result;
use portprobe_core::PortProbe;

pub fn run(engine: &PortProbe, pid: &str, json: bool) -> Result<ExitCode> {
    let killed = engine.kill_process(pid);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "pid": pid, "killed": killed }))?
        );
    } else if killed {
        println!("Killed process {}.", pid);
    } else {
        eprintln!("Failed to kill process {} (run with --log-level debug for details).", pid);
    }

    Ok(if killed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
