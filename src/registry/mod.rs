// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Session-scoped mod registry.
//!
//! ```text
//! metadata feed (JSON array)
//!        |  feed::load_feed()
//!        v
//! ModRegistry::new(Vec<ModDescriptor>)
//!   rejects empty / duplicate names
//!        |
//!        v
//! lookup("Utilla") --> Some(&ModDescriptor) | None
//! ```
//!
//! The registry is immutable once built. Callers share it behind an `Arc`.

pub mod descriptor;
pub mod feed;


use std::collections::BTreeMap;

use crate::error::RegistryError;

pub use descriptor::ModDescriptor;

/// Lookup table of mod descriptors by unique name.
#[derive(Debug, Clone, Default)]
pub struct ModRegistry {
    /// Descriptors in feed order.
    mods: Vec<ModDescriptor>,

    /// Name to position in `mods`.
    index: BTreeMap<String, usize>,
}

impl ModRegistry {
    /// Builds a registry from decoded descriptors, keeping feed order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyName`] or [`RegistryError::DuplicateName`]
    /// if names are not unique and non-empty.
    pub fn new(mods: Vec<ModDescriptor>) -> Result<Self, RegistryError> {
        let mut index = BTreeMap::new();
        for (i, descriptor) in mods.iter().enumerate() {
            if descriptor.name.trim().is_empty() {
                return Err(RegistryError::EmptyName { index: i });
            }
            if index.insert(descriptor.name.clone(), i).is_some() {
                return Err(RegistryError::DuplicateName {
                    name: descriptor.name.clone(),
                });
            }
        }
        Ok(Self { mods, index })
    }

    /// Decodes a metadata feed document.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Feed`] if `json` is not an array of
    /// descriptors, or any error from [`ModRegistry::new`].
    pub fn from_json(source: &str, json: &str) -> Result<Self, RegistryError> {
        let mods: Vec<ModDescriptor> =
            serde_json::from_str(json).map_err(|e| RegistryError::Feed {
                url: source.to_string(),
                message: e.to_string(),
            })?;
        Self::new(mods)
    }

    /// Exact-match lookup. Absence is a normal result.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&ModDescriptor> {
        self.index.get(name).map(|&i| &self.mods[i])
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Descriptors in feed order.
    pub fn iter(&self) -> impl Iterator<Item = &ModDescriptor> {
        self.mods.iter()
    }

    /// Descriptor at a 1-based position in feed order, as shown by `list`.
    #[must_use]
    pub fn by_position(&self, position: usize) -> Option<&ModDescriptor> {
        position.checked_sub(1).and_then(|i| self.mods.get(i))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }

    /// Dependencies of `descriptor` that are not in the registry.
    #[must_use]
    pub fn missing_dependencies<'a>(&self, descriptor: &'a ModDescriptor) -> Vec<&'a str> {
        descriptor
            .dependencies
            .iter()
            .filter(|dep| !self.contains(dep))
            .map(String::as_str)
            .collect()
    }
}
