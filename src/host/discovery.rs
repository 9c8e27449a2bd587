// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConfigError, FsError, MmmResult};

/// Usual Steam and Oculus install locations of the game.
#[must_use]
pub fn default_candidates() -> Vec<PathBuf> {
    vec![
        PathBuf::from(r"C:\Program Files (x86)\Steam\steamapps\common\Gorilla Tag"),
        PathBuf::from(r"C:\Program Files\Oculus\Software\Software\another-axiom-gorilla-tag"),
    ]
}

/// Picks the game directory.
///
/// An explicitly configured root wins and must exist. Otherwise the first
/// candidate that is a directory is used.
///
/// # Errors
///
/// Returns [`FsError::NotFound`] if the configured root is not a directory,
/// or [`ConfigError::MissingKey`] for `host.root` if no candidate exists.
pub fn discover_host_root(configured: Option<&Path>, candidates: &[PathBuf]) -> MmmResult<PathBuf> {
    if let Some(root) = configured {
        if root.is_dir() {
            info!(root = %root.display(), "using configured game directory");
            return Ok(root.to_path_buf());
        }
        return Err(FsError::NotFound(root.display().to_string()).into());
    }

    for candidate in candidates {
        debug!(candidate = %candidate.display(), "probing game directory");
        if candidate.is_dir() {
            info!(root = %candidate.display(), "found game directory");
            return Ok(candidate.clone());
        }
    }

    Err(ConfigError::MissingKey {
        section: "host".to_string(),
        key: "root".to_string(),
    }
    .into())
}
