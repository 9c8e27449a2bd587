// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Artifact download into staging.
//!
//! ```text
//! download_url --> ArtifactSource::from_descriptor()
//!                    parse, http(s) only, file name = decoded last path segment
//!        |
//!        v
//! ArtifactFetcher::download_file()
//!   <staging>/mmm-XXXXXX/<file name>      (StagedArtifact)
//!        |
//!        v
//! placement moves or extracts it; dropping the StagedArtifact
//! removes whatever is left of the staging directory
//! ```

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use reqwest::Url;
use tempfile::TempDir;
use tracing::{debug, info};

use crate::error::{InstallError, InstallResult, MmmError, NetworkError};
use crate::install::extract::is_archive;
use crate::net::{Downloader, ProgressDisplay};
use crate::registry::ModDescriptor;
use crate::utility::fs::paths::is_single_component;

/// Validated download location of a mod's artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSource {
    pub url: String,
    /// Name the artifact is saved under.
    pub file_name: String,
}

impl ArtifactSource {
    /// Validates the descriptor's URL and derives the artifact file name.
    ///
    /// The file name is the last URL path segment, percent-decoded, or
    /// `<mod name>.dll` when the path has none or it does not decode to a
    /// plain file name.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::InvalidModDefinition`] if the URL is empty,
    /// not absolute, or not http(s).
    pub fn from_descriptor(descriptor: &ModDescriptor) -> InstallResult<Self> {
        let invalid = |reason: String| InstallError::InvalidModDefinition {
            name: descriptor.name.clone(),
            reason,
        };

        let raw = descriptor.download_url.trim();
        if raw.is_empty() {
            return Err(invalid("download_url is empty".into()));
        }

        let url = Url::parse(raw)
            .map_err(|e| invalid(format!("download_url '{raw}' is not a valid URL: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "download_url '{raw}' uses unsupported scheme '{}'",
                url.scheme()
            )));
        }

        let file_name = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .and_then(|segment| urlencoding::decode(segment).ok())
            .filter(|segment| is_single_component(segment))
            .map_or_else(|| format!("{}.dll", descriptor.name), Cow::into_owned);

        Ok(Self {
            url: url.into(),
            file_name,
        })
    }
}

/// A downloaded file waiting to be placed.
///
/// Owns a private staging directory that is deleted on drop.
#[derive(Debug)]
pub struct StagedArtifact {
    dir: TempDir,
    path: PathBuf,
    file_name: String,
}

impl StagedArtifact {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn is_archive(&self) -> bool {
        is_archive(&self.file_name)
    }

    /// Staging directory that holds the file.
    #[must_use]
    pub fn staging_dir(&self) -> &Path {
        self.dir.path()
    }
}

#[cfg(test)]
impl StagedArtifact {
    /// Stages `contents` as if it had been downloaded.
    pub(crate) fn from_bytes(staging_root: &Path, file_name: &str, contents: &[u8]) -> Self {
        let dir = tempfile::Builder::new()
            .prefix("mmm-")
            .tempdir_in(staging_root)
            .unwrap();
        let path = dir.path().join(file_name);
        std::fs::write(&path, contents).unwrap();
        Self {
            dir,
            path,
            file_name: file_name.to_string(),
        }
    }
}

/// Downloads artifacts into a staging directory.
#[derive(Debug, Clone)]
pub struct ArtifactFetcher {
    staging_root: PathBuf,
    progress: ProgressDisplay,
}

impl ArtifactFetcher {
    #[must_use]
    pub fn new(staging_root: impl Into<PathBuf>, progress: ProgressDisplay) -> Self {
        Self {
            staging_root: staging_root.into(),
            progress,
        }
    }

    #[must_use]
    pub fn staging_root(&self) -> &Path {
        &self.staging_root
    }

    #[must_use]
    pub const fn progress(&self) -> ProgressDisplay {
        self.progress
    }

    /// Downloads `url` into a fresh staging directory as `file_name`.
    ///
    /// The file is written atomically, so a failed download never leaves a
    /// partial file behind.
    ///
    /// # Errors
    ///
    /// Returns a [`NetworkError`] on connection failures, non-success
    /// statuses, or staging write failures.
    pub async fn download_file(
        &self,
        url: &str,
        file_name: &str,
    ) -> Result<StagedArtifact, NetworkError> {
        let staging_failed = |e: std::io::Error| NetworkError::DownloadFailed {
            url: url.to_string(),
            message: format!(
                "cannot create staging directory in {}: {e}",
                self.staging_root.display()
            ),
        };

        tokio::fs::create_dir_all(&self.staging_root)
            .await
            .map_err(staging_failed)?;
        let dir = tempfile::Builder::new()
            .prefix("mmm-")
            .tempdir_in(&self.staging_root)
            .map_err(staging_failed)?;
        let path = dir.path().join(file_name);

        info!("Downloading {file_name}");
        debug!(url = %url, staged = %path.display(), "fetching artifact");

        Downloader::new()
            .url(url)
            .progress(self.progress)
            .download_to(&path)
            .await
            .map_err(|e| into_network_error(e, url))?;

        Ok(StagedArtifact {
            dir,
            path,
            file_name: file_name.to_string(),
        })
    }
}

fn into_network_error(err: MmmError, url: &str) -> NetworkError {
    match err {
        MmmError::Network(inner) => *inner,
        other => NetworkError::DownloadFailed {
            url: url.to_string(),
            message: other.to_string(),
        },
    }
}
