//! PortProbe Core Library
//!
//! Cross-platform library that finds which process is listening on a TCP
//! port and can kill it. Provides functionality to:
//! - Resolve a port to its listening processes (pid, command, port)
//! - Kill a process by PID (forcefully)
//! - Load resolver settings from a JSON config file
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure data models and input validation
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: External system implementations
//! - `application`: Use case services
//!
//! # Platform Support
//! - macOS: Uses `lsof` and `ps` commands
//! - Linux: Uses `ss` (falling back to `netstat`), `ps` and `/proc`
//! - Windows: Uses `netstat` and `tasklist` commands

// Hexagonal architecture layers
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub mod config;
pub mod engine;
pub mod enrichment;
pub mod error;
pub mod executor;
pub mod profile;
pub mod scanner;

// Re-export domain types (primary API)
pub use domain::{is_valid_pid, parse_port, Platform, ProcessRecord, UNKNOWN_COMMAND};

// Re-export other commonly used types
pub use adapters::SystemCommandRunner;
pub use application::PortResolver;
pub use config::{ConfigStore, ResolverConfig};
pub use engine::PortProbe;
pub use error::{Error, Result};
pub use executor::{CommandOutput, CommandSpec, ExecError, ExitPolicy};
pub use ports::CommandRunner;
