// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Feed browsing commands: `list` and `show`.

use anyhow::anyhow;

use crate::cli::install::{ListArgs, ShowArgs};
use crate::config::Config;
use crate::error::Result;
use crate::registry::feed::load_feed;
use crate::registry::{ModDescriptor, ModRegistry};

/// Finds a mod by exact name, falling back to its 1-based number in `list`.
#[must_use]
pub fn select_mod<'r>(registry: &'r ModRegistry, selector: &str) -> Option<&'r ModDescriptor> {
    registry.lookup(selector).or_else(|| {
        selector
            .parse::<usize>()
            .ok()
            .and_then(|position| registry.by_position(position))
    })
}

/// Numbered listing of the registry, one mod per line.
#[must_use]
pub fn format_mod_list(registry: &ModRegistry, with_dependencies: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(registry.len());
    for (i, descriptor) in registry.iter().enumerate() {
        lines.push(format!("[{:02}] {}", i + 1, descriptor.summary()));
        if with_dependencies && descriptor.has_dependencies() {
            lines.push(format!(
                "     Dependencies: {}",
                descriptor.dependencies.join(", ")
            ));
        }
    }
    lines
}

/// Detail view of one mod, flagging dependencies the feed does not have.
#[must_use]
pub fn format_mod_details(registry: &ModRegistry, descriptor: &ModDescriptor) -> Vec<String> {
    let mut lines = vec![
        descriptor.summary(),
        format!("  url:      {}", descriptor.download_url),
    ];
    if !descriptor.install_location.is_empty() {
        lines.push(format!("  location: {}", descriptor.install_location));
    }

    if descriptor.has_dependencies() {
        let missing = registry.missing_dependencies(descriptor);
        lines.push("  dependencies:".to_string());
        for dependency in &descriptor.dependencies {
            if !missing.contains(&dependency.as_str()) {
                lines.push(format!("    {dependency}"));
            } else {
                lines.push(format!("    {dependency} (not in the mod list)"));
            }
        }
    }
    lines
}

/// Main handler for list command.
///
/// # Errors
///
/// Returns an error if the metadata feed cannot be loaded.
pub async fn run_list_command(args: &ListArgs, config: &Config) -> Result<()> {
    let registry = load_feed(&config.feed.url, config.install.progress).await?;

    if registry.is_empty() {
        println!("No mods found");
    } else {
        for line in format_mod_list(&registry, args.deps) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Main handler for show command.
///
/// # Errors
///
/// Returns an error if the feed cannot be loaded or the mod is not in it.
pub async fn run_show_command(args: &ShowArgs, config: &Config) -> Result<()> {
    let registry = load_feed(&config.feed.url, config.install.progress).await?;

    let descriptor = select_mod(&registry, &args.name)
        .ok_or_else(|| anyhow!("no mod named '{}' in the mod list", args.name))?;

    for line in format_mod_details(&registry, descriptor) {
        println!("{line}");
    }
    Ok(())
}
