//! Port-to-process resolution service.

use std::collections::HashSet;

use futures_util::future::join_all;
use tracing::{info, warn};

use crate::config::ResolverConfig;
use crate::domain::{is_valid_pid, Platform, ProcessRecord};
use crate::enrichment::lookup_label;
use crate::error::{Error, Result};
use crate::executor::{self, ExecError};
use crate::ports::CommandRunner;
use crate::profile::{PlatformProfile, Probe};
use crate::scanner::Listener;

/// Application service that finds and kills the processes behind a port.
///
/// The platform is fixed at construction and every command goes through
/// the injected `CommandRunner`, so the whole flow can be driven by a
/// scripted runner in tests.
pub struct PortResolver<R: CommandRunner> {
    runner: R,
    platform: Platform,
    config: ResolverConfig,
}

impl<R: CommandRunner> PortResolver<R> {
    /// Create a resolver for `platform`.
    pub fn new(runner: R, platform: Platform, config: ResolverConfig) -> Self {
        Self {
            runner,
            platform,
            config,
        }
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Find the processes listening on TCP `port`.
    ///
    /// An empty vector means nothing is listening. Errors mean the lookup
    /// itself failed: the platform is unsupported, or the socket-listing
    /// tool (and its fallback, if any) could not be run.
    ///
    /// The port is not range-checked here; see [`crate::parse_port`].
    pub async fn find_processes_on_port(&self, port: u16) -> Result<Vec<ProcessRecord>> {
        let profile = PlatformProfile::for_platform(&self.platform).ok_or_else(|| {
            warn!(platform = %self.platform, "Unsupported operating system");
            Error::UnsupportedPlatform(self.platform.name().to_string())
        })?;

        let (probe, output) = self.discover(profile, port).await?;

        // Parse everything, then keep the queried port only
        let target = port.to_string();
        let mut seen: HashSet<String> = HashSet::new();
        let matches: Vec<Listener> = (probe.parse)(&output)
            .into_iter()
            .filter(|listener| listener.port == target)
            .filter(|listener| seen.insert(listener.pid.clone()))
            .collect();

        if matches.is_empty() {
            info!(port, tool = probe.tool, "No process is listening on port");
            return Ok(Vec::new());
        }

        let records = self.enrich(matches).await;
        for record in &records {
            info!(
                port,
                pid = record.pid(),
                command = record.command(),
                "Found process on port"
            );
        }

        Ok(records)
    }

    /// Kill the process with `pid` by force (SIGKILL / `taskkill /F`).
    ///
    /// Returns `true` only when the kill command exits with code 0. Every
    /// failure, including an unsupported platform or a malformed pid, is
    /// logged and reported as `false`.
    pub async fn kill_process(&self, pid: &str) -> bool {
        let Some(profile) = PlatformProfile::for_platform(&self.platform) else {
            warn!(platform = %self.platform, pid, "Unsupported operating system for killing process");
            return false;
        };

        if !is_valid_pid(pid) {
            warn!(pid, "Refusing to kill: not a valid process id");
            return false;
        }

        let spec = (profile.kill)(pid);
        match self.runner.run(&spec, self.config.kill_timeout()).await {
            Ok(output) if output.exit_code == 0 => {
                info!(pid, "Successfully killed process");
                true
            }
            Ok(output) => {
                warn!(
                    pid,
                    exit_code = output.exit_code,
                    stderr = output.stderr.trim(),
                    "Failed to kill process"
                );
                false
            }
            Err(e) => {
                warn!(pid, error = %e, "Error executing kill command");
                false
            }
        }
    }

    /// Run the primary probe, and the fallback once if the primary fails.
    async fn discover(
        &self,
        profile: &'static PlatformProfile,
        port: u16,
    ) -> std::result::Result<(Probe, String), ExecError> {
        let primary = profile.primary;
        match self.run_probe(&primary, port).await {
            Ok(output) => Ok((primary, output)),
            Err(e) => {
                let Some(fallback) = profile.fallback else {
                    warn!(tool = primary.tool, error = %e, "Port scan failed");
                    return Err(e);
                };

                warn!(
                    tool = primary.tool,
                    fallback = fallback.tool,
                    error = %e,
                    "Port scan failed, trying fallback"
                );
                let output = self.run_probe(&fallback, port).await.inspect_err(|e| {
                    warn!(tool = fallback.tool, error = %e, "Fallback port scan failed");
                })?;
                Ok((fallback, output))
            }
        }
    }

    async fn run_probe(&self, probe: &Probe, port: u16) -> std::result::Result<String, ExecError> {
        let spec = (probe.command)(port);
        executor::execute(
            &self.runner,
            &spec,
            self.config.discovery_timeout(),
            probe.exit_policy,
        )
        .await
    }

    /// Build records, replacing short labels with full command lines where
    /// a lookup succeeds. Lookups never fail the query.
    async fn enrich(&self, matches: Vec<Listener>) -> Vec<ProcessRecord> {
        let records: Vec<ProcessRecord> = matches
            .into_iter()
            .map(|listener| {
                let label = listener
                    .name
                    .unwrap_or_else(|| self.config.unknown_label.clone());
                ProcessRecord::new(listener.pid, label, listener.port)
            })
            .collect();

        let labels: Vec<Option<String>> = if self.config.parallel_enrichment {
            join_all(records.iter().map(|record| {
                lookup_label(&self.runner, &self.platform, record.pid(), &self.config)
            }))
            .await
        } else {
            let mut labels = Vec::with_capacity(records.len());
            for record in &records {
                labels.push(
                    lookup_label(&self.runner, &self.platform, record.pid(), &self.config).await,
                );
            }
            labels
        };

        records
            .iter()
            .zip(labels)
            .map(|(record, label)| record.relabeled(label))
            .collect()
    }
}
