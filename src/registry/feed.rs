// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Metadata feed loading.

use tracing::{debug, info};

use super::ModRegistry;
use crate::error::MmmResult;
use crate::net::{Downloader, ProgressDisplay};

/// Public feed the registry is loaded from unless configured otherwise.
pub const DEFAULT_FEED_URL: &str =
    "https://raw.githubusercontent.com/The-Graze/MonkeModInfo/refs/heads/master/modinfo.json";

/// Fetches the metadata feed and builds the session registry.
///
/// # Errors
///
/// Returns an error if the feed cannot be downloaded or decoded, or if it
/// contains empty or duplicate mod names.
pub async fn load_feed(url: &str, progress: ProgressDisplay) -> MmmResult<ModRegistry> {
    debug!(url = %url, "fetching metadata feed");

    let json = Downloader::new()
        .url(url)
        .progress(progress)
        .download_string()
        .await?;

    let registry = ModRegistry::from_json(url, &json)?;
    info!(url = %url, mods = registry.len(), "metadata feed loaded");
    Ok(registry)
}
