// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for mmm-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. mmm.toml (cwd, optional)
//! 3. --ini files, in order
//! 4. MMM_* env vars
//! 5. CLI overrides (--game-dir, --feed, ...)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! MMM_HOST__ROOT=/games/gtag            → host.root
//! MMM_HOST__PLUGIN_DIR=BepInEx/plugins  → host.plugin_dir
//! MMM_INSTALL__MISSING_DEPENDENCIES=fail → install.missing_dependencies
//! ```
//!
//! Sections and keys are separated by a double underscore so keys keep their
//! own underscores.

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::utility::fs::paths::safe_relative_path;

use loader::ConfigLoader;
use types::{FeedConfig, GlobalConfig, HostConfig, InstallConfig, LoaderConfig, PathsConfig};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "mmm.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "MMM";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub global: GlobalConfig,
    pub feed: FeedConfig,
    pub host: HostConfig,
    pub install: InstallConfig,
    pub loader: LoaderConfig,
    pub paths: PathsConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mmm_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("mmm.toml")
    ///     .with_env_prefix("MMM")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Checks values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `host.plugin_dir` or
    /// `loader.config_path` leaves the game directory, or a URL is empty.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        for (section, key, value) in [
            ("host", "plugin_dir", self.host.plugin_dir.as_str()),
            ("loader", "config_path", self.loader.config_path.as_str()),
        ] {
            if safe_relative_path(value).is_none() {
                return Err(ConfigError::InvalidValue {
                    section: section.to_string(),
                    key: key.to_string(),
                    message: format!("'{value}' must be a relative path inside the game directory"),
                }
                .into());
            }
        }

        for (section, key, value) in [
            ("feed", "url", self.feed.url.as_str()),
            ("loader", "url", self.loader.url.as_str()),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingKey {
                    section: section.to_string(),
                    key: key.to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is sorted by key and aligned on `=`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_host_options(&mut options);
        self.format_loader_options(&mut options);

        options.insert("feed.url".into(), self.feed.url.clone());
        options.insert(
            "install.missing_dependencies".into(),
            self.install.missing_dependencies.to_string(),
        );
        options.insert(
            "install.progress".into(),
            self.install.progress.to_string(),
        );
        options.insert(
            "paths.staging".into(),
            self.paths.staging_dir().display().to_string(),
        );

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global.log_file.display().to_string(),
        );
    }

    fn format_host_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "host.root".into(),
            self.host
                .root
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        let candidates: Vec<String> = self
            .host
            .candidates
            .iter()
            .map(|p: &PathBuf| p.display().to_string())
            .collect();
        options.insert("host.candidates".into(), candidates.join("; "));
        options.insert("host.plugin_dir".into(), self.host.plugin_dir.clone());
    }

    fn format_loader_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("loader.url".into(), self.loader.url.clone());
        options.insert("loader.config_url".into(), self.loader.config_url.clone());
        options.insert("loader.marker_dir".into(), self.loader.marker_dir.clone());
        options.insert("loader.marker_file".into(), self.loader.marker_file.clone());
        options.insert(
            "loader.config_path".into(),
            self.loader.config_path.clone(),
        );
    }
}
