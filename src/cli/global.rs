// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! ```text
//! --ini FILE         extra config files (repeatable, later wins)
//! --log-level N      console verbosity (0-6)
//! --file-log-level   file verbosity (defaults to --log-level)
//! --log-file FILE    global.log_file
//! --game-dir DIR     host.root
//! --feed URL         feed.url
//! --staging DIR      paths.staging
//!
//! Precedence: CLI flags > MMM_* env > --ini > mmm.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'i', long = "ini", value_name = "FILE", action = clap::ArgAction::Append)]
    pub inis: Vec<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Game directory. Skips automatic discovery.
    #[arg(short = 'g', long = "game-dir", value_name = "DIR")]
    pub game_dir: Option<PathBuf>,

    /// Metadata feed URL.
    #[arg(long = "feed", value_name = "URL")]
    pub feed: Option<String>,

    /// Directory downloads are staged in.
    #[arg(long = "staging", value_name = "DIR")]
    pub staging: Option<PathBuf>,
}

/// A config override: dotted key and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Override {
    Int(&'static str, i64),
    Text(&'static str, String),
}

impl GlobalOptions {
    /// Converts command-line options to configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<Override> {
        let mut overrides = Vec::new();

        if let Some(level) = self.log_level {
            overrides.push(Override::Int("global.output_log_level", i64::from(level)));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(Override::Int("global.file_log_level", i64::from(level)));
        }

        let paths = [
            ("global.log_file", &self.log_file),
            ("host.root", &self.game_dir),
            ("paths.staging", &self.staging),
        ];
        for (key, path) in paths {
            if let Some(path) = path {
                overrides.push(Override::Text(key, path.display().to_string()));
            }
        }

        if let Some(ref url) = self.feed {
            overrides.push(Override::Text("feed.url", url.clone()));
        }

        overrides
    }
}
