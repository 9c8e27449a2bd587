// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use anyhow::Context;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Moves `src` to `dst`, replacing any existing file at `dst`.
///
/// Tries a rename first. When that fails (staging on another volume, for
/// instance) the file is copied and the source removed.
///
/// # Example
/// ```no_run
/// use mmm_rs::utility::fs::transfer::move_file;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// move_file(Path::new("/tmp/mmm-x/Utilla.dll"), Path::new("/game/BepInEx/plugins/Utilla/Utilla.dll")).await?;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if the existing destination cannot be removed or the
/// file can be neither renamed nor copied.
pub async fn move_file(src: &Path, dst: &Path) -> Result<()> {
    if fs::try_exists(dst).await.unwrap_or(false) {
        fs::remove_file(dst)
            .await
            .with_context(|| format!("failed to remove existing {}", dst.display()))?;
    }

    match fs::rename(src, dst).await {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            debug!(
                src = %src.display(),
                dst = %dst.display(),
                error = %rename_err,
                "rename failed, falling back to copy"
            );
            fs::copy(src, dst).await.with_context(|| {
                format!("failed to copy {} to {}", src.display(), dst.display())
            })?;
            if let Err(e) = fs::remove_file(src).await {
                debug!(src = %src.display(), error = %e, "failed to remove moved source");
            }
            Ok(())
        }
    }
}
