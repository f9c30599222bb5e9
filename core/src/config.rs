//! Resolver configuration.
//!
//! Stores configuration in JSON format at `~/.portprobe/config.json`.
//! A missing file means "use the defaults".

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::UNKNOWN_COMMAND;
use crate::error::{Error, Result};

/// Tunables for port resolution and process termination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Timeout for the socket-listing command (lsof, ss, netstat).
    #[serde(default = "default_discovery_timeout_ms")]
    pub discovery_timeout_ms: u64,

    /// Timeout for each per-pid label lookup (ps, tasklist).
    #[serde(default = "default_enrichment_timeout_ms")]
    pub enrichment_timeout_ms: u64,

    /// Timeout for the kill / taskkill command.
    #[serde(default = "default_kill_timeout_ms")]
    pub kill_timeout_ms: u64,

    /// Label used when no tool reports a process name.
    #[serde(default = "default_unknown_label")]
    pub unknown_label: String,

    /// Run label lookups for several pids at the same time.
    #[serde(default = "default_true")]
    pub parallel_enrichment: bool,

    /// Mount point of procfs, read on Linux when `ps` reports nothing.
    #[serde(default = "default_proc_root")]
    pub proc_root: PathBuf,
}

fn default_discovery_timeout_ms() -> u64 {
    3000
}

fn default_enrichment_timeout_ms() -> u64 {
    500
}

fn default_kill_timeout_ms() -> u64 {
    3000
}

fn default_unknown_label() -> String {
    UNKNOWN_COMMAND.to_string()
}

fn default_true() -> bool {
    true
}

fn default_proc_root() -> PathBuf {
    PathBuf::from("/proc")
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            discovery_timeout_ms: default_discovery_timeout_ms(),
            enrichment_timeout_ms: default_enrichment_timeout_ms(),
            kill_timeout_ms: default_kill_timeout_ms(),
            unknown_label: default_unknown_label(),
            parallel_enrichment: true,
            proc_root: default_proc_root(),
        }
    }
}

impl ResolverConfig {
    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_millis(self.discovery_timeout_ms)
    }

    pub fn enrichment_timeout(&self) -> Duration {
        Duration::from_millis(self.enrichment_timeout_ms)
    }

    pub fn kill_timeout(&self) -> Duration {
        Duration::from_millis(self.kill_timeout_ms)
    }
}

/// Configuration store backed by a JSON file.
///
/// Handles reading and writing configuration to `~/.portprobe/config.json`.
pub struct ConfigStore {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a new config store with the default path.
    ///
    /// Default path: `~/.portprobe/config.json`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

        Ok(Self {
            config_path: home.join(".portprobe").join("config.json"),
        })
    }

    /// Create a config store with a custom path.
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Path of the configuration file.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub async fn load(&self) -> Result<ResolverConfig> {
        if !fs::try_exists(&self.config_path).await.unwrap_or(false) {
            return Ok(ResolverConfig::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub async fn save(&self, config: &ResolverConfig) -> Result<()> {
        if let Some(config_dir) = self.config_path.parent() {
            fs::create_dir_all(config_dir)
                .await
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(config)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        // Write atomically by writing to temp file then renaming
        let temp_path = self.config_path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to create temp config file: {}", e)))?;

        file.write_all(content.as_bytes())
            .await
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| Error::Config(format!("Failed to sync config: {}", e)))?;

        fs::rename(&temp_path, &self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to rename config file: {}", e)))?;

        Ok(())
    }
}
