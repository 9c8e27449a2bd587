// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config (options, inis), list (list, show), install, bootstrap
//! ```

pub mod bootstrap;
pub mod config;
pub mod install;
pub mod list;

#[cfg(test)]
mod tests;
