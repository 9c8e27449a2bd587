// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the feed and install commands.

use clap::Args;

use crate::config::types::MissingDependencyPolicy;

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Also print each mod's dependencies.
    #[arg(short = 'd', long = "deps")]
    pub deps: bool,
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// Mod name (exact match) or its number in `mmm list`.
    #[arg(value_name = "MOD")]
    pub name: String,
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, Args)]
pub struct InstallArgs {
    /// Mods to install, by exact name or by number in `mmm list`.
    #[arg(value_name = "MOD", required = true)]
    pub mods: Vec<String>,

    /// Fail a mod if one of its dependencies is not in the feed.
    #[arg(long, conflicts_with = "lenient")]
    pub strict: bool,

    /// Warn about dependencies missing from the feed and install anyway.
    #[arg(long)]
    pub lenient: bool,

    /// Do not install the mod loader if it is missing.
    #[arg(long = "no-bootstrap")]
    pub no_bootstrap: bool,
}

impl InstallArgs {
    /// Policy chosen on the command line, if any.
    #[must_use]
    pub const fn missing_dependency_policy(&self) -> Option<MissingDependencyPolicy> {
        if self.strict {
            Some(MissingDependencyPolicy::Fail)
        } else if self.lenient {
            Some(MissingDependencyPolicy::Skip)
        } else {
            None
        }
    }
}

/// Arguments for the `bootstrap` command.
#[derive(Debug, Clone, Default, Args)]
pub struct BootstrapArgs {
    /// Reinstall the loader even if it looks installed.
    #[arg(short = 'f', long)]
    pub force: bool,
}
