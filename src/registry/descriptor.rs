// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod descriptor as published by the metadata feed.
//!
//! ```json
//! {
//!   "name": "Utilla",
//!   "author": "Graze",
//!   "version": "1.6.14",
//!   "download_url": "https://example.com/Utilla.dll",
//!   "install_location": "BepInEx/plugins",
//!   "dependencies": ["Newtonsoft"]
//! }
//! ```
//!
//! `install_location` and `dependencies` may be absent or `null`.

use serde::{Deserialize, Deserializer, Serialize};

/// Identity and install recipe for one mod. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModDescriptor {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    /// Absolute URI to the artifact. Empty is an install-time error.
    #[serde(default, deserialize_with = "null_as_default")]
    pub download_url: String,
    /// Relative path under the host root. Empty selects the default plugin
    /// directory.
    #[serde(default, deserialize_with = "null_as_default")]
    pub install_location: String,
    /// Names of mods that must be installed first, in declaration order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub dependencies: Vec<String>,
}

impl ModDescriptor {
    /// Creates a descriptor with only a name and URL set.
    #[must_use]
    pub fn new(name: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            author: String::new(),
            version: String::new(),
            download_url: download_url.into(),
            install_location: String::new(),
            dependencies: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    #[must_use]
    pub fn with_install_location(mut self, location: impl Into<String>) -> Self {
        self.install_location = location.into();
        self
    }

    #[must_use]
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }

    /// One-line summary used by `list`.
    #[must_use]
    pub fn summary(&self) -> String {
        match (self.author.is_empty(), self.version.is_empty()) {
            (false, false) => format!("{} by {} - v{}", self.name, self.author, self.version),
            (false, true) => format!("{} by {}", self.name, self.author),
            (true, false) => format!("{} - v{}", self.name, self.version),
            (true, true) => self.name.clone(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
