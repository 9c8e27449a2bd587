// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Install root resolution and artifact placement.
//!
//! ```text
//! install root = host_root / (install_location || plugin_dir)
//!
//! staged "*.zip" (any case) --> extract_safely(archive, install root)
//! staged anything else      --> install root / <mod name> / <file name>
//!                               (existing file replaced)
//! ```

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{InstallError, InstallResult};
use crate::install::context::InstallContext;
use crate::install::extract::{ExtractionReport, extract_safely};
use crate::install::fetch::StagedArtifact;
use crate::utility::fs::paths::{is_single_component, safe_relative_path};
use crate::utility::fs::transfer::move_file;


/// Default install location below the host root.
pub const DEFAULT_PLUGIN_DIR: &str = "BepInEx/plugins";

/// Where an artifact ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Archive extracted into `root`.
    Extracted {
        root: PathBuf,
        report: ExtractionReport,
    },
    /// Single file moved to `path`.
    File { path: PathBuf },
}

impl Placement {
    /// Directory or file the mod was installed to.
    #[must_use]
    pub const fn location(&self) -> &PathBuf {
        match self {
            Self::Extracted { root, .. } => root,
            Self::File { path } => path,
        }
    }
}

/// Places staged artifacts under the host root.
#[derive(Debug, Clone)]
pub struct Placer {
    plugin_dir: String,
}

impl Default for Placer {
    fn default() -> Self {
        Self::new(DEFAULT_PLUGIN_DIR)
    }
}

impl Placer {
    /// `plugin_dir` is used for mods that leave `install_location` empty.
    #[must_use]
    pub fn new(plugin_dir: impl Into<String>) -> Self {
        Self {
            plugin_dir: plugin_dir.into(),
        }
    }

    /// Computes the install root for a mod without touching the disk.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::InvalidModDefinition`] if the mod name cannot
    /// be used as a folder name, or the install location is absolute or
    /// climbs out of the host root.
    pub fn install_root(&self, ctx: &InstallContext<'_>) -> InstallResult<PathBuf> {
        let descriptor = ctx.descriptor();
        let invalid = |reason: String| InstallError::InvalidModDefinition {
            name: descriptor.name.clone(),
            reason,
        };

        if !is_single_component(&descriptor.name) {
            return Err(invalid(format!(
                "name '{}' cannot be used as a folder name",
                descriptor.name
            )));
        }

        let location = if descriptor.install_location.trim().is_empty() {
            self.plugin_dir.as_str()
        } else {
            descriptor.install_location.as_str()
        };
        let relative = safe_relative_path(location).ok_or_else(|| {
            invalid(format!(
                "install_location '{location}' must be a relative path inside the game directory"
            ))
        })?;

        Ok(ctx.host_root().join(relative))
    }

    /// Resolves the install root and makes sure it exists.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Placer::install_root`], or
    /// [`InstallError::InstallFailure`] if the directory cannot be created.
    pub async fn prepare_install_root(&self, ctx: &InstallContext<'_>) -> InstallResult<PathBuf> {
        let root = self.install_root(ctx)?;
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            InstallError::failure(
                ctx.name(),
                format!("cannot create install directory {}: {e}", root.display()),
            )
        })?;
        debug!(root = %root.display(), "install root ready");
        Ok(root)
    }

    /// Extracts or moves a staged artifact into `install_root`.
    ///
    /// The staging directory is removed when this returns, whatever the
    /// outcome.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::ExtractionFailure`] if the archive cannot be
    /// read, or [`InstallError::InstallFailure`] if the file cannot be moved
    /// into place.
    pub async fn place_artifact(
        &self,
        ctx: &InstallContext<'_>,
        staged: StagedArtifact,
        install_root: PathBuf,
    ) -> InstallResult<Placement> {
        let name = ctx.name();

        if staged.is_archive() {
            info!("Extracting {} to {}", staged.file_name(), install_root.display());
            let target = install_root.clone();
            let report = tokio::task::spawn_blocking(move || {
                let result = extract_safely(staged.path(), &target);
                drop(staged);
                result
            })
            .await
            .map_err(|e| InstallError::failure(name, format!("extraction task failed: {e}")))?
            .map_err(|source| InstallError::ExtractionFailure {
                name: name.to_string(),
                source,
            })?;

            return Ok(Placement::Extracted {
                root: install_root,
                report,
            });
        }

        let folder = install_root.join(name);
        tokio::fs::create_dir_all(&folder).await.map_err(|e| {
            InstallError::failure(
                name,
                format!("cannot create mod folder {}: {e}", folder.display()),
            )
        })?;

        let destination = folder.join(staged.file_name());
        info!("Placing {} in {}", staged.file_name(), folder.display());
        move_file(staged.path(), &destination)
            .await
            .map_err(|e| InstallError::failure(name, format!("{e:#}")))?;

        Ok(Placement::File { path: destination })
    }
}
