//! PortProbe engine - blocking entry point for callers without a runtime.
//!
//! The resolver is async internally (it shells out through tokio). The
//! engine owns a single-threaded runtime and exposes the two operations as
//! plain blocking calls, so a UI thread or a CLI can use them directly.

use tokio::runtime::{Builder, Runtime};

use crate::adapters::SystemCommandRunner;
use crate::application::PortResolver;
use crate::config::{ConfigStore, ResolverConfig};
use crate::domain::{Platform, ProcessRecord};
use crate::error::Result;

/// Blocking facade over [`PortResolver`] with the real command runner.
pub struct PortProbe {
    resolver: PortResolver<SystemCommandRunner>,
    runtime: Runtime,
}

impl PortProbe {
    /// Create an engine for the current platform, with configuration from
    /// `~/.portprobe/config.json` (defaults if the file is absent).
    pub fn new() -> Result<Self> {
        Self::from_store(&ConfigStore::new()?)
    }

    /// Create an engine for the current platform with configuration from
    /// the given store.
    pub fn from_store(store: &ConfigStore) -> Result<Self> {
        let runtime = build_runtime()?;
        let config = runtime.block_on(store.load())?;
        Ok(Self::assemble(runtime, Platform::detect(), config))
    }

    /// Create an engine with explicit platform and configuration.
    pub fn with_config(platform: Platform, config: ResolverConfig) -> Result<Self> {
        Ok(Self::assemble(build_runtime()?, platform, config))
    }

    fn assemble(runtime: Runtime, platform: Platform, config: ResolverConfig) -> Self {
        Self {
            resolver: PortResolver::new(SystemCommandRunner::new(), platform, config),
            runtime,
        }
    }

    pub fn platform(&self) -> &Platform {
        self.resolver.platform()
    }

    pub fn config(&self) -> &ResolverConfig {
        self.resolver.config()
    }

    /// Find the processes listening on `port`. Blocks until the lookup and
    /// any label lookups finish or time out.
    pub fn find_processes_on_port(&self, port: u16) -> Result<Vec<ProcessRecord>> {
        self.runtime
            .block_on(self.resolver.find_processes_on_port(port))
    }

    /// Force-kill `pid`. `false` on any failure.
    pub fn kill_process(&self, pid: &str) -> bool {
        self.runtime.block_on(self.resolver.kill_process(pid))
    }
}

// Use single-threaded runtime - one blocking call at a time per engine
fn build_runtime() -> Result<Runtime> {
    Ok(Builder::new_current_thread().enable_all().build()?)
}
