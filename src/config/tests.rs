// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Config, ConfigLoader};
use crate::config::types::MissingDependencyPolicy;
use crate::logging::LogLevel;
use crate::net::ProgressDisplay;
use crate::registry::feed::DEFAULT_FEED_URL;
use std::path::PathBuf;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert_eq!(config.global.file_log_level, LogLevel::TRACE);
    assert_eq!(config.global.log_file, PathBuf::from("mmm.log"));
    assert_eq!(config.feed.url, DEFAULT_FEED_URL);
    assert_eq!(config.host.plugin_dir, "BepInEx/plugins");
    assert!(config.host.root.is_none());
    assert_eq!(config.host.candidates.len(), 2);
    assert_eq!(
        config.install.missing_dependencies,
        MissingDependencyPolicy::Skip
    );
    assert_eq!(config.install.progress, ProgressDisplay::Spinner);
    assert_eq!(config.loader.marker_file, "winhttp.dll");
    assert_eq!(config.paths.staging_dir(), std::env::temp_dir());
}

#[test]
fn test_missing_dependency_policy_parse() {
    assert_eq!(
        "skip".parse::<MissingDependencyPolicy>().unwrap(),
        MissingDependencyPolicy::Skip
    );
    assert_eq!(
        "FAIL".parse::<MissingDependencyPolicy>().unwrap(),
        MissingDependencyPolicy::Fail
    );
    let err = "sometimes".parse::<MissingDependencyPolicy>().unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'missing_dependencies' in section '[install]': expected 'skip' or 'fail', got 'sometimes'"
    );
}

#[test]
fn test_config_parse() {
    let config = Config::parse(
        r#"
[global]
output_log_level = 5
log_file = "logs/mmm.log"

[host]
root = "/games/gtag"
plugin_dir = "BepInEx/plugins"

[install]
missing_dependencies = "fail"
progress = "silent"

[paths]
staging = "/tmp/mmm-staging"
"#,
    )
    .unwrap();

    assert_eq!(config.global.output_log_level, LogLevel::TRACE);
    assert_eq!(config.global.log_file, PathBuf::from("logs/mmm.log"));
    assert_eq!(config.host.root, Some(PathBuf::from("/games/gtag")));
    assert_eq!(
        config.install.missing_dependencies,
        MissingDependencyPolicy::Fail
    );
    assert_eq!(config.install.progress, ProgressDisplay::Silent);
    assert_eq!(config.paths.staging_dir(), PathBuf::from("/tmp/mmm-staging"));
}

#[test]
fn test_deny_unknown_fields_top_level() {
    let result = Config::parse("[unknown_section]\nfoo = \"bar\"\n");
    assert!(result.is_err());
}

#[test]
fn test_deny_unknown_fields_in_section() {
    let result = Config::parse("[install]\nparallel = true\n");
    assert!(result.is_err());
}

#[test]
fn test_invalid_log_level_rejected() {
    let result = Config::parse("[global]\noutput_log_level = 9\n");
    assert!(result.is_err());
}

#[test]
fn test_plugin_dir_must_stay_inside_game_dir() {
    let err = Config::parse("[host]\nplugin_dir = \"../elsewhere\"\n").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'plugin_dir' in section '[host]': '../elsewhere' must be a relative path inside the game directory"
    );
}

#[test]
fn test_empty_feed_url_rejected() {
    let err = Config::parse("[feed]\nurl = \"\"\n").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"missing required config key 'url' in section '[feed]'"
    );
}

#[test]
fn test_config_loader_tracks_files() {
    let loader = ConfigLoader::new()
        .add_toml_str("[global]\noutput_log_level = 3")
        .add_toml_file_optional("/nonexistent/optional.toml");

    insta::assert_snapshot!(loader.format_loaded_files().join("\n"), @"1. [string] <string>");
}

#[test]
fn test_config_loader_add_toml_file_not_found() {
    let result = ConfigLoader::new()
        .add_toml_file("/nonexistent/path/to/mmm.toml")
        .build();
    assert!(result.is_err());
}

#[test]
fn test_config_loader_layered_sources() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().expect("failed to create temp file");
    writeln!(
        file,
        r#"
[host]
root = "/from/file"

[install]
missing_dependencies = "fail"
"#
    )
    .expect("failed to write");

    let config = ConfigLoader::new()
        .add_toml_file(file.path())
        .add_toml_str("[host]\nroot = \"/from/string\"\n")
        .build()
        .expect("build should succeed");

    assert_eq!(config.host.root, Some(PathBuf::from("/from/string")));
    assert_eq!(
        config.install.missing_dependencies,
        MissingDependencyPolicy::Fail
    );
}

#[test]
fn test_config_loader_set_override() {
    let config = ConfigLoader::new()
        .add_toml_str("[host]\nroot = \"/from/file\"\n")
        .set("host.root", "/from/cli")
        .expect("set should succeed")
        .set("global.output_log_level", 6_i64)
        .expect("set should succeed")
        .build()
        .expect("build should succeed");

    assert_eq!(config.host.root, Some(PathBuf::from("/from/cli")));
    assert_eq!(config.global.output_log_level, LogLevel::DUMP);
}

#[test]
fn test_config_loader_with_env_prefix() {
    // SAFETY: the variable name is unique to this test.
    unsafe {
        std::env::set_var("MMMTEST_HOST__PLUGIN_DIR", "mods/plugins");
    }

    let config = ConfigLoader::new()
        .with_env_prefix("MMMTEST")
        .build()
        .expect("build should succeed");

    // SAFETY: same as above
    unsafe {
        std::env::remove_var("MMMTEST_HOST__PLUGIN_DIR");
    }

    assert_eq!(config.host.plugin_dir, "mods/plugins");
}

#[test]
fn test_format_options_sorted_and_aligned() {
    let config = Config::parse("[paths]\nstaging = \"/staging\"\n").unwrap();
    let options = config.format_options();

    let keys: Vec<&str> = options
        .iter()
        .map(|line| line.split_whitespace().next().unwrap())
        .collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);

    let eq_columns: Vec<usize> = options.iter().map(|l| l.find(" = ").unwrap()).collect();
    assert!(eq_columns.windows(2).all(|w| w[0] == w[1]));
    assert!(options.iter().any(|l| l.ends_with("= /staging")));
    assert!(options.iter().any(|l| l.ends_with("= skip")));
}
