// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod loader (`BepInEx`) detection and bootstrap.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::types::LoaderConfig;
use crate::error::{ConfigError, FsError, MmmError, MmmResult};
use crate::install::extract::{ExtractionReport, extract_safely};
use crate::install::fetch::ArtifactFetcher;
use crate::net::Downloader;
use crate::utility::fs::paths::safe_relative_path;

/// Name the loader archive is staged under.
const LOADER_ARCHIVE: &str = "BepInEx.zip";

/// Result of [`ensure_loader`].
#[derive(Debug)]
pub enum LoaderStatus {
    /// Marker directory and file were already present.
    AlreadyInstalled,
    /// The loader was downloaded and extracted.
    Installed {
        report: ExtractionReport,
        /// Whether the loader configuration file was written.
        config_applied: bool,
    },
}

/// True if both loader markers exist below `host_root`.
#[must_use]
pub fn loader_installed(host_root: &Path, config: &LoaderConfig) -> bool {
    host_root.join(&config.marker_dir).is_dir() && host_root.join(&config.marker_file).is_file()
}

/// Installs the loader unless it is already present (or `force` is set).
///
/// # Errors
///
/// Returns an error if the loader archive cannot be downloaded or extracted.
/// A failure to fetch the loader configuration file is only logged.
pub async fn ensure_loader(
    host_root: &Path,
    config: &LoaderConfig,
    fetcher: &ArtifactFetcher,
    force: bool,
) -> MmmResult<LoaderStatus> {
    if !force && loader_installed(host_root, config) {
        info!(root = %host_root.display(), "mod loader already installed");
        return Ok(LoaderStatus::AlreadyInstalled);
    }

    let report = install_loader(host_root, config, fetcher).await?;

    let config_applied = match apply_loader_config(host_root, config, fetcher).await {
        Ok(path) => {
            info!("Loader config written to {}", path.display());
            true
        }
        Err(e) => {
            warn!("Could not apply loader config, keeping the default: {e}");
            false
        }
    };

    Ok(LoaderStatus::Installed {
        report,
        config_applied,
    })
}

/// Downloads the loader archive and extracts it into `host_root`.
///
/// # Errors
///
/// Returns an error if the download fails or the archive cannot be read.
pub async fn install_loader(
    host_root: &Path,
    config: &LoaderConfig,
    fetcher: &ArtifactFetcher,
) -> MmmResult<ExtractionReport> {
    info!("Downloading mod loader");
    let staged = fetcher.download_file(&config.url, LOADER_ARCHIVE).await?;

    info!("Extracting mod loader into {}", host_root.display());
    let target = host_root.to_path_buf();
    let report = tokio::task::spawn_blocking(move || {
        let result = extract_safely(staged.path(), &target);
        drop(staged);
        result
    })
    .await
    .map_err(|e| MmmError::Other(format!("loader extraction task failed: {e}").into()))??;

    Ok(report)
}

/// Fetches the loader configuration file and writes it to
/// `config.config_path` below `host_root`.
///
/// # Errors
///
/// Returns an error if `config_path` is not a relative path, the download
/// fails, or the file cannot be written.
pub async fn apply_loader_config(
    host_root: &Path,
    config: &LoaderConfig,
    fetcher: &ArtifactFetcher,
) -> MmmResult<PathBuf> {
    let relative =
        safe_relative_path(&config.config_path).ok_or_else(|| ConfigError::InvalidValue {
            section: "loader".to_string(),
            key: "config_path".to_string(),
            message: format!(
                "'{}' must be a relative path inside the game directory",
                config.config_path
            ),
        })?;
    let path = host_root.join(relative);

    let content = Downloader::new()
        .url(&config.config_url)
        .progress(fetcher.progress())
        .download_string()
        .await?;

    let io_error = |source| FsError::IoError {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    tokio::fs::write(&path, content).await.map_err(io_error)?;
    Ok(path)
}
