// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::global::Override;
use crate::cli::{Cli, Command};
use crate::config::types::MissingDependencyPolicy;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["mmm", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_install_mods() {
    let cli = Cli::try_parse_from(["mmm", "install", "Utilla", "3", "--strict"]).unwrap();
    let Some(Command::Install(args)) = cli.command else {
        panic!("expected install command");
    };
    assert_eq!(args.mods, ["Utilla", "3"]);
    assert!(!args.no_bootstrap);
    assert_eq!(
        args.missing_dependency_policy(),
        Some(MissingDependencyPolicy::Fail)
    );
}

#[test]
fn test_install_policy_defaults_to_config() {
    let cli = Cli::try_parse_from(["mmm", "install", "Utilla", "--no-bootstrap"]).unwrap();
    let Some(Command::Install(args)) = cli.command else {
        panic!("expected install command");
    };
    assert!(args.no_bootstrap);
    assert_eq!(args.missing_dependency_policy(), None);
}

#[test]
fn test_install_requires_a_mod() {
    assert!(Cli::try_parse_from(["mmm", "install"]).is_err());
}

#[test]
fn test_strict_conflicts_with_lenient() {
    assert!(Cli::try_parse_from(["mmm", "install", "A", "--strict", "--lenient"]).is_err());
}

#[test]
fn test_parse_list_and_show() {
    let cli = Cli::try_parse_from(["mmm", "list", "--deps"]).unwrap();
    assert!(matches!(cli.command, Some(Command::List(ref a)) if a.deps));

    let cli = Cli::try_parse_from(["mmm", "show", "Newtilla"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Show(ref a)) if a.name == "Newtilla"));
}

#[test]
fn test_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["mmm", "-l", "7", "version"]).is_err());
}

#[test]
fn test_global_options_to_overrides() {
    let cli = Cli::try_parse_from([
        "mmm",
        "-l",
        "4",
        "-g",
        "/games/gtag",
        "--feed",
        "http://localhost/mods.json",
        "-i",
        "a.toml",
        "-i",
        "b.toml",
        "bootstrap",
    ])
    .unwrap();

    assert_eq!(
        cli.global.inis,
        [PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
    assert_eq!(
        cli.global.to_config_overrides(),
        [
            Override::Int("global.output_log_level", 4),
            Override::Int("global.file_log_level", 4),
            Override::Text("host.root", "/games/gtag".to_string()),
            Override::Text("feed.url", "http://localhost/mods.json".to_string()),
        ]
    );
}

#[test]
fn test_file_log_level_wins_over_log_level() {
    let cli = Cli::try_parse_from(["mmm", "-l", "1", "--file-log-level", "5", "options"]).unwrap();
    let overrides = cli.global.to_config_overrides();
    assert!(overrides.contains(&Override::Int("global.file_log_level", 5)));
    assert!(overrides.contains(&Override::Int("global.output_log_level", 1)));
}
