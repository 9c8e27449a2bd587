// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dependency-aware mod installation.
//!
//! ```text
//! Installer::install(mod)
//!   |
//!   +--> InstallPlan::resolve()       dependencies first, each mod once
//!   |
//!   +--> for each planned mod (stop starting new ones once cancelled):
//!          dependency failed?    --> DependencyInstallFailure
//!          missing dependency?   --> warn (skip) | DependencyNotFound (fail)
//!          |
//!          +-- Placer::prepare_install_root()   host/<location or plugin dir>
//!          +-- ArtifactSource::from_descriptor() URL check, file name
//!          +-- ArtifactFetcher::download_file() staging (cancellable)
//!          +-- PathLocks::lock(install root)
//!          +-- Placer::place_artifact()         extract | move into <root>/<name>/
//!   |
//!   v
//! InstallReport: one ModOutcome per planned mod
//! ```
//!
//! A failure never escapes as an error: every mod ends up as a success or a
//! failure in the report. The top-level result is the root mod's outcome.

pub mod context;
pub mod extract;
pub mod fetch;
pub mod lock;
pub mod place;
pub mod plan;

#[cfg(test)]
pub(crate) mod test_utils;


use std::path::{Path, PathBuf};
use std::sync::Arc;

use bon::Builder;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, error, info, warn};

use crate::config::Config;
use crate::config::types::MissingDependencyPolicy;
use crate::error::{InstallError, InstallResult};
use crate::net::ProgressDisplay;
use crate::registry::{ModDescriptor, ModRegistry};

use context::InstallContext;
use fetch::{ArtifactFetcher, ArtifactSource};
use lock::PathLocks;
use place::{DEFAULT_PLUGIN_DIR, Placement, Placer};
use plan::{CycleEdge, InstallPlan, PlannedMod};

/// Session-wide install settings.
#[derive(Debug, Clone, Builder)]
pub struct InstallSettings {
    /// Game directory all install locations are relative to.
    #[builder(into)]
    host_root: PathBuf,
    /// Install location for mods that do not name one.
    #[builder(into, default = DEFAULT_PLUGIN_DIR.to_string())]
    plugin_dir: String,
    /// Where artifacts are downloaded before placement.
    #[builder(into, default = std::env::temp_dir())]
    staging_dir: PathBuf,
    #[builder(default)]
    missing_dependencies: MissingDependencyPolicy,
    #[builder(default)]
    progress: ProgressDisplay,
}

impl InstallSettings {
    /// Settings for `host_root` taken from the loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config, host_root: impl Into<PathBuf>) -> Self {
        Self::builder()
            .host_root(host_root)
            .plugin_dir(config.host.plugin_dir.clone())
            .staging_dir(config.paths.staging_dir())
            .missing_dependencies(config.install.missing_dependencies)
            .progress(config.install.progress)
            .build()
    }

    /// Replaces the missing dependency policy, e.g. from a command-line flag.
    #[must_use]
    pub fn with_missing_dependencies(mut self, policy: MissingDependencyPolicy) -> Self {
        self.missing_dependencies = policy;
        self
    }

    #[must_use]
    pub fn host_root(&self) -> &Path {
        &self.host_root
    }

    #[must_use]
    pub fn plugin_dir(&self) -> &str {
        &self.plugin_dir
    }

    #[must_use]
    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    #[must_use]
    pub const fn missing_dependencies(&self) -> MissingDependencyPolicy {
        self.missing_dependencies
    }

    #[must_use]
    pub const fn progress(&self) -> ProgressDisplay {
        self.progress
    }
}

/// Result of one mod's install attempt.
#[derive(Debug)]
pub struct ModOutcome {
    pub name: String,
    pub version: String,
    /// The mod whose dependency list pulled this one in.
    pub requested_by: Option<String>,
    pub result: InstallResult<Placement>,
}

impl ModOutcome {
    fn new(step: &PlannedMod<'_>, result: InstallResult<Placement>) -> Self {
        Self {
            name: step.descriptor.name.clone(),
            version: step.descriptor.version.clone(),
            requested_by: step.requested_by.map(|m| m.name.clone()),
            result,
        }
    }

    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    #[must_use]
    pub fn error(&self) -> Option<&InstallError> {
        self.result.as_ref().err()
    }

    /// One-line human-readable summary, including the error's causes.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.result {
            Ok(_) if self.version.is_empty() => format!("Successfully installed {}", self.name),
            Ok(_) => format!("Successfully installed {} v{}", self.name, self.version),
            Err(e) => format!("Failed to install {}: {}", self.name, error_chain(e)),
        }
    }
}

fn error_chain(err: &InstallError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

/// Outcomes of one install request, in plan order.
#[derive(Debug)]
pub struct InstallReport {
    requested: String,
    outcomes: Vec<ModOutcome>,
    cycles: Vec<CycleEdge>,
}

impl InstallReport {
    fn new(requested: impl Into<String>) -> Self {
        Self {
            requested: requested.into(),
            outcomes: Vec::new(),
            cycles: Vec::new(),
        }
    }

    /// Name of the mod the request was for.
    #[must_use]
    pub fn requested(&self) -> &str {
        &self.requested
    }

    /// True if the requested mod was installed.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.outcome(&self.requested)
            .is_some_and(ModOutcome::succeeded)
    }

    #[must_use]
    pub fn outcome(&self, name: &str) -> Option<&ModOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    #[must_use]
    pub fn outcomes(&self) -> &[ModOutcome] {
        &self.outcomes
    }

    pub fn installed(&self) -> impl Iterator<Item = &ModOutcome> {
        self.outcomes.iter().filter(|o| o.succeeded())
    }

    pub fn failed(&self) -> impl Iterator<Item = &ModOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }

    /// Dependency edges ignored because they closed a cycle.
    #[must_use]
    pub fn cycles(&self) -> &[CycleEdge] {
        &self.cycles
    }

    fn has_failed(&self, name: &str) -> bool {
        self.outcome(name).is_some_and(|o| !o.succeeded())
    }
}

/// One install session: a registry, a game directory, and shared state for
/// every install started from it.
#[derive(Debug, Clone)]
pub struct Installer {
    registry: Arc<ModRegistry>,
    settings: InstallSettings,
    fetcher: ArtifactFetcher,
    placer: Placer,
    locks: PathLocks,
    cancel: CancellationToken,
}

impl Installer {
    #[must_use]
    pub fn new(registry: Arc<ModRegistry>, settings: InstallSettings) -> Self {
        let fetcher = ArtifactFetcher::new(settings.staging_dir.clone(), settings.progress);
        let placer = Placer::new(settings.plugin_dir.clone());
        Self {
            registry,
            settings,
            fetcher,
            placer,
            locks: PathLocks::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Uses `token` to stop the session; mods not yet started are reported
    /// as cancelled once it fires.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    #[must_use]
    pub fn registry(&self) -> &ModRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn settings(&self) -> &InstallSettings {
        &self.settings
    }

    #[must_use]
    pub const fn fetcher(&self) -> &ArtifactFetcher {
        &self.fetcher
    }

    /// Installs `descriptor` and its dependencies. Returns true if
    /// `descriptor` itself was installed.
    pub async fn install_mod(
        &self,
        descriptor: &ModDescriptor,
        requesting: Option<&ModDescriptor>,
    ) -> bool {
        self.install(descriptor, requesting).await.succeeded()
    }

    /// Looks `name` up in the registry and installs it.
    ///
    /// An unknown name yields a report with a single
    /// [`InstallError::UnknownMod`] outcome.
    pub async fn install_by_name(&self, name: &str) -> InstallReport {
        match self.registry.lookup(name) {
            Some(descriptor) => self.install(descriptor, None).await,
            None => {
                error!("No mod named '{name}' in the mod list");
                let mut report = InstallReport::new(name);
                report.outcomes.push(ModOutcome {
                    name: name.to_string(),
                    version: String::new(),
                    requested_by: None,
                    result: Err(InstallError::UnknownMod(name.to_string())),
                });
                report
            }
        }
    }

    /// Installs `descriptor` after all of its transitive dependencies.
    ///
    /// `requesting` names the mod that asked for this one, and is never
    /// installed again as a dependency of it.
    pub async fn install(
        &self,
        descriptor: &ModDescriptor,
        requesting: Option<&ModDescriptor>,
    ) -> InstallReport {
        let plan = InstallPlan::resolve(&self.registry, descriptor, requesting);
        let mut report = InstallReport::new(descriptor.name.clone());
        report.cycles = plan.cycles().to_vec();

        if plan.len() > 1 {
            info!(
                "Installing {} with {} dependencies",
                descriptor.name,
                plan.len() - 1
            );
        }

        for step in plan.steps() {
            let result = self.run_step(step, &report).await;
            let outcome = ModOutcome::new(step, result);
            match &outcome.result {
                Ok(placement) => {
                    info!(path = %placement.location().display(), "{}", outcome.message());
                }
                Err(_) => error!("{}", outcome.message()),
            }
            report.outcomes.push(outcome);
        }

        report
    }

    async fn run_step(
        &self,
        step: &PlannedMod<'_>,
        report: &InstallReport,
    ) -> InstallResult<Placement> {
        let name = step.name();

        if self.cancel.is_cancelled() {
            return Err(InstallError::Cancelled(name.to_string()));
        }

        if let Some(dependency) = step.dependencies.iter().find(|d| report.has_failed(d)) {
            return Err(InstallError::DependencyInstallFailure {
                name: name.to_string(),
                dependency: (*dependency).to_string(),
            });
        }

        if let Some(first_missing) = step.missing.first() {
            match self.settings.missing_dependencies {
                MissingDependencyPolicy::Fail => {
                    return Err(InstallError::DependencyNotFound {
                        name: name.to_string(),
                        dependency: (*first_missing).to_string(),
                    });
                }
                MissingDependencyPolicy::Skip => {
                    for dependency in &step.missing {
                        warn!(
                            "Dependency '{dependency}' of '{name}' is not in the mod list, skipping it"
                        );
                    }
                }
            }
        }

        let ctx = InstallContext::new(step.descriptor, step.requested_by, &self.settings.host_root);
        self.install_one(&ctx).instrument(ctx.span()).await
    }

    /// Root, validate, fetch, place.
    async fn install_one(&self, ctx: &InstallContext<'_>) -> InstallResult<Placement> {
        let name = ctx.name();
        match ctx.requesting() {
            Some(parent) => info!("Installing {name} (dependency of {})", parent.name),
            None => info!("Installing {name}"),
        }

        let install_root = self.placer.prepare_install_root(ctx).await?;
        let source = ArtifactSource::from_descriptor(ctx.descriptor())?;

        let staged = tokio::select! {
            biased;
            () = self.cancel.cancelled() => {
                return Err(InstallError::Cancelled(name.to_string()));
            }
            staged = self.fetcher.download_file(&source.url, &source.file_name) => {
                staged.map_err(|source| InstallError::DownloadFailure {
                    name: name.to_string(),
                    source,
                })?
            }
        };

        let _guard = self.locks.lock(&install_root).await;
        self.placer.place_artifact(ctx, staged, install_root).await
    }
}
