// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration sections.
//!
//! ```text
//! Config: GlobalConfig, FeedConfig, HostConfig, InstallConfig,
//!         LoaderConfig, PathsConfig
//! MissingDependencyPolicy: skip (default) | fail
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::install::place::DEFAULT_PLUGIN_DIR;
use crate::logging::LogLevel;
use crate::net::ProgressDisplay;
use crate::registry::feed::DEFAULT_FEED_URL;

/// What to do when a dependency is not in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingDependencyPolicy {
    /// Warn and install the mod anyway.
    #[default]
    Skip,
    /// Fail the mod with `DependencyNotFound`.
    Fail,
}

impl std::fmt::Display for MissingDependencyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

impl std::str::FromStr for MissingDependencyPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "fail" => Ok(Self::Fail),
            _ => Err(ConfigError::InvalidValue {
                section: "install".to_string(),
                key: "missing_dependencies".to_string(),
                message: format!("expected 'skip' or 'fail', got '{s}'"),
            }),
        }
    }
}

/// Logging options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file.
    pub log_file: PathBuf,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: PathBuf::from("mmm.log"),
        }
    }
}

/// Metadata feed location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    pub url: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
        }
    }
}

/// Game (host application) directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Explicit game directory. Skips discovery when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Directories searched in order when `root` is unset.
    pub candidates: Vec<PathBuf>,
    /// Install location for mods that do not name one.
    pub plugin_dir: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            root: None,
            candidates: crate::host::discovery::default_candidates(),
            plugin_dir: DEFAULT_PLUGIN_DIR.to_string(),
        }
    }
}

/// Install behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallConfig {
    pub missing_dependencies: MissingDependencyPolicy,
    pub progress: ProgressDisplay,
}

/// Mod loader (`BepInEx`) bootstrap settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Loader archive, extracted into the game directory.
    pub url: String,
    /// Loader configuration file, fetched after extraction.
    pub config_url: String,
    /// Directory whose presence marks the loader as installed.
    pub marker_dir: String,
    /// File whose presence marks the loader as installed.
    pub marker_file: String,
    /// Where the loader configuration file is written.
    pub config_path: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            url: "https://github.com/BepInEx/BepInEx/releases/download/v5.4.23.3/BepInEx_win_x64_5.4.23.3.zip"
                .to_string(),
            config_url: "https://raw.githubusercontent.com/The-Graze/MonkeModInfo/master/BepInEx.cfg"
                .to_string(),
            marker_dir: "BepInEx".to_string(),
            marker_file: "winhttp.dll".to_string(),
            config_path: "BepInEx/config/BepInEx.cfg".to_string(),
        }
    }
}

/// Working directories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Where downloads are staged. Defaults to the system temp directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staging: Option<PathBuf>,
}

impl PathsConfig {
    #[must_use]
    pub fn staging_dir(&self) -> PathBuf {
        self.staging.clone().unwrap_or_else(std::env::temp_dir)
    }
}
