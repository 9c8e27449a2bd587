// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for mmm-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! mmm [global options] <command>
//! version | options | inis
//! list [--deps]
//! show <mod>
//! install <mod|number>... [--strict|--lenient] [--no-bootstrap]
//! bootstrap [--force]
//! ```

pub mod global;
pub mod install;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::install::{BootstrapArgs, InstallArgs, ListArgs, ShowArgs};
use clap::{Parser, Subcommand};

/// Monke Mod Manager
///
/// Installs game mods and their dependencies from a shared metadata feed.
#[derive(Debug, Parser)]
#[command(
    name = "mmm",
    author,
    version,
    about = "Monke Mod Manager",
    long_about = "mmm-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Installs mods and their dependencies from the metadata feed.\n\n\
                  `mmm list` shows the available mods, `mmm install Utilla`\n\
                  installs one by name or by its number in the list. See\n\
                  `mmm <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  mmm loads `mmm.toml` from the current directory if it exists,\n\
                  then every file given with --ini, in order. MMM_SECTION__KEY\n\
                  environment variables override files, and command-line flags\n\
                  override everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the config files in use.
    Inis,

    /// Lists the mods in the metadata feed.
    List(ListArgs),

    /// Shows one mod and its dependencies.
    Show(ShowArgs),

    /// Installs mods and their dependencies.
    Install(InstallArgs),

    /// Installs the mod loader into the game directory.
    Bootstrap(BootstrapArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
