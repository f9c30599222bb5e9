//! PortProbe CLI - Find and kill the process listening on a port
//!
//! A command-line tool for looking up which process owns a TCP port
//! and terminating it.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use portprobe_core::{ConfigStore, PortProbe};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "portprobe")]
#[command(author, version, about = "Find and kill the process listening on a port")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Use this config file instead of ~/.portprobe/config.json
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// The minimum log level to display. Overrides RUST_LOG; warn if neither is set.
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<tracing::Level>,

    /// The format for log output.
    #[arg(long, global = true, value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,
}

#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Eq)]
enum LogFormat {
    /// Human-readable text format.
    Text,
    /// Machine-readable JSON format.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the processes listening on a port
    #[command(alias = "ls")]
    Find {
        /// Port number (1-65535)
        port: String,
    },

    /// Force-kill a process by PID
    Kill {
        /// Process ID to kill
        pid: String,
    },

    /// Kill every process listening on a port
    Free {
        /// Port number (1-65535)
        port: String,

        /// Actually kill; without this only the matches are listed
        #[arg(short, long)]
        yes: bool,
    },

    /// Show current configuration
    Config {
        /// Write the default configuration file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn log_filter(level: Option<tracing::Level>, env_directives: Option<&str>) -> EnvFilter {
    match (level, env_directives) {
        (Some(level), _) => EnvFilter::default().add_directive(level.into()),
        (None, Some(directives)) => {
            EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("warn"))
        }
        (None, None) => EnvFilter::new("warn"),
    }
}

fn init_logging(level: Option<tracing::Level>, format: &LogFormat) {
    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(level, env_directives.as_deref());

    match format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.log_level, &cli.log_format);

    let store = match cli.config {
        Some(path) => ConfigStore::with_path(path),
        None => ConfigStore::new()?,
    };

    let code = match cli.command {
        Commands::Find { port } => {
            let engine = PortProbe::from_store(&store)?;
            commands::find::run(&engine, &port, cli.json)?
        }
        Commands::Kill { pid } => {
            let engine = PortProbe::from_store(&store)?;
            commands::kill::run(&engine, &pid, cli.json)?
        }
        Commands::Free { port, yes } => {
            let engine = PortProbe::from_store(&store)?;
            commands::free::run(&engine, &port, yes, cli.json)?
        }
        Commands::Config { init } => commands::config::show(&store, init, cli.json)?,
    };

    Ok(code)
}
