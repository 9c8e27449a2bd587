// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-mod install context.

use std::path::Path;

use tracing::Span;

use crate::logging::install_span;
use crate::registry::ModDescriptor;

/// Everything one install attempt needs to know about its mod.
#[derive(Debug, Clone, Copy)]
pub struct InstallContext<'a> {
    descriptor: &'a ModDescriptor,
    requesting: Option<&'a ModDescriptor>,
    host_root: &'a Path,
}

impl<'a> InstallContext<'a> {
    #[must_use]
    pub const fn new(
        descriptor: &'a ModDescriptor,
        requesting: Option<&'a ModDescriptor>,
        host_root: &'a Path,
    ) -> Self {
        Self {
            descriptor,
            requesting,
            host_root,
        }
    }

    #[must_use]
    pub const fn descriptor(&self) -> &'a ModDescriptor {
        self.descriptor
    }

    /// The mod whose dependency list triggered this install, if any.
    #[must_use]
    pub const fn requesting(&self) -> Option<&'a ModDescriptor> {
        self.requesting
    }

    #[must_use]
    pub const fn host_root(&self) -> &'a Path {
        self.host_root
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.descriptor.name
    }

    /// Tracing span every log line of this install is recorded under.
    #[must_use]
    pub fn span(&self) -> Span {
        install_span(self.name(), self.requesting.map(|m| m.name.as_str()))
    }
}
