// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bootstrap command: installs the mod loader into the game directory.

use std::path::Path;

use tracing::info;

use crate::cli::install::BootstrapArgs;
use crate::config::Config;
use crate::error::Result;
use crate::host::discovery::discover_host_root;
use crate::host::loader::{LoaderStatus, ensure_loader};
use crate::install::fetch::ArtifactFetcher;

/// Main handler for bootstrap command.
///
/// # Errors
///
/// Returns an error if the game directory cannot be found or the loader
/// cannot be installed.
pub async fn run_bootstrap_command(args: &BootstrapArgs, config: &Config) -> Result<()> {
    let host_root = discover_host_root(config.host.root.as_deref(), &config.host.candidates)?;
    let fetcher = ArtifactFetcher::new(config.paths.staging_dir(), config.install.progress);
    bootstrap_loader(&host_root, config, &fetcher, args.force).await
}

/// Ensures the loader is present, printing what was done.
pub(crate) async fn bootstrap_loader(
    host_root: &Path,
    config: &Config,
    fetcher: &ArtifactFetcher,
    force: bool,
) -> Result<()> {
    match ensure_loader(host_root, &config.loader, fetcher, force).await? {
        LoaderStatus::AlreadyInstalled => {
            info!("Mod loader found in {}", host_root.display());
        }
        LoaderStatus::Installed {
            report,
            config_applied,
        } => {
            for rejected in &report.rejected {
                println!("Skipped {rejected}");
            }
            println!(
                "Installed mod loader into {} ({} files{})",
                host_root.display(),
                report.extracted.len(),
                if config_applied { ", config applied" } else { "" }
            );
        }
    }
    Ok(())
}
