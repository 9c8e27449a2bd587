// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Install command implementation for mmm-rs.
//!
//! ```text
//! load feed --> find game dir --> [bootstrap loader] --> Installer
//!   for each requested mod: install, print outcomes
//! ```

use std::sync::Arc;

use tracing::warn;

use crate::cli::install::InstallArgs;
use crate::cmd::bootstrap::bootstrap_loader;
use crate::cmd::list::select_mod;
use crate::config::Config;
use crate::error::{InstallError, Result, bail_out};
use crate::host::discovery::discover_host_root;
use crate::install::{InstallReport, InstallSettings, Installer, ModOutcome};
use crate::registry::feed::load_feed;

/// Main handler for install command.
///
/// # Errors
///
/// Returns an error if the feed or game directory cannot be loaded, the
/// loader bootstrap fails, or any requested mod was not installed.
pub async fn run_install_command(args: &InstallArgs, config: &Config) -> Result<()> {
    let registry = Arc::new(load_feed(&config.feed.url, config.install.progress).await?);
    let host_root = discover_host_root(config.host.root.as_deref(), &config.host.candidates)?;

    let mut settings = InstallSettings::from_config(config, &host_root);
    if let Some(policy) = args.missing_dependency_policy() {
        settings = settings.with_missing_dependencies(policy);
    }
    let installer = Installer::new(registry, settings);

    if !args.no_bootstrap {
        bootstrap_loader(&host_root, config, installer.fetcher(), false).await?;
    }

    let cancel_token = installer.cancel_token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl+C, stopping after the current mod...");
            cancel_token.cancel();
        }
    });

    let mut failed = Vec::new();
    for selector in &args.mods {
        let report = match select_mod(installer.registry(), selector) {
            Some(descriptor) => installer.install(descriptor, None).await,
            None => installer.install_by_name(selector).await,
        };
        print_report(&report);
        if !report.succeeded() {
            failed.push(report.requested().to_string());
        }
    }

    if !failed.is_empty() {
        return Err(bail_out(format!(
            "{} mod(s) not installed: {}",
            failed.len(),
            failed.join(", ")
        ))
        .into());
    }
    Ok(())
}

fn print_report(report: &InstallReport) {
    for edge in report.cycles() {
        println!("Ignored dependency cycle: {edge}");
    }
    for outcome in report.outcomes() {
        println!("{}", outcome_line(outcome));
    }
}

fn outcome_line(outcome: &ModOutcome) -> String {
    match (&outcome.requested_by, outcome.error()) {
        (_, Some(InstallError::Cancelled(_))) => format!("Cancelled {}", outcome.name),
        (Some(parent), None) => format!("{} (for {parent})", outcome.message()),
        _ => outcome.message(),
    }
}
