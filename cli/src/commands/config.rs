//! Config command - show or initialise the configuration file.

use std::process::ExitCode;

use anyhow::Result;
use portprobe_core::{ConfigStore, Platform};
use tokio::runtime::Builder;

pub fn show(store: &ConfigStore, init: bool, json: bool) -> Result<ExitCode> {
    let runtime = Builder::new_current_thread().enable_all().build()?;

    let config = runtime.block_on(store.load())?;
    let created = init && !store.path().exists();
    if created {
        runtime.block_on(store.save(&config))?;
    }

    if json {
        let out = serde_json::json!({
            "path": store.path(),
            "platform": Platform::detect(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("Config file:          {}", store.path().display());
    if created {
        println!("                      (created with defaults)");
    }
    println!("Platform:             {}", Platform::detect());
    println!("Discovery timeout:    {} ms", config.discovery_timeout_ms);
    println!("Enrichment timeout:   {} ms", config.enrichment_timeout_ms);
    println!("Kill timeout:         {} ms", config.kill_timeout_ms);
    println!("Unknown label:        {}", config.unknown_label);
    println!("Parallel enrichment:  {}", config.parallel_enrichment);
    println!("Proc root:            {}", config.proc_root.display());

    Ok(ExitCode::SUCCESS)
}
