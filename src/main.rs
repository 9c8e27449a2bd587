// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Command Dispatch
//!   List | Show | Install | Bootstrap | Options | Inis
//! ```

use std::process::ExitCode;

use anyhow::Context;

use mmm_rs::cli::global::{GlobalOptions, Override};
use mmm_rs::cli::{self, Command};
use mmm_rs::cmd::bootstrap::run_bootstrap_command;
use mmm_rs::cmd::config::{run_inis_command, run_options_command};
use mmm_rs::cmd::install::run_install_command;
use mmm_rs::cmd::list::{run_list_command, run_show_command};
use mmm_rs::config::loader::ConfigLoader;
use mmm_rs::config::{CONFIG_FILE_NAME, Config, ENV_PREFIX};
use mmm_rs::error::Result;
use mmm_rs::logging::init_logging;
use mmm_rs::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();
    let config = load_config(&cli.global);

    let log_config = build_log_config(&cli.global, config.as_ref().ok());
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, config).await
}

/// Levels and log file come from the merged config, which already carries the
/// CLI flags. If the config failed to load, only the flags are used.
fn build_log_config(global: &GlobalOptions, config: Option<&Config>) -> LogConfig {
    let (console_level, file_level, log_file) = match config {
        Some(config) => (
            config.global.output_log_level,
            config.global.file_log_level,
            Some(config.global.log_file.display().to_string()),
        ),
        None => {
            let console_level = global
                .log_level
                .and_then(LogLevel::from_u8)
                .unwrap_or(LogLevel::INFO);
            let file_level = global
                .file_log_level
                .and_then(LogLevel::from_u8)
                .unwrap_or(console_level);
            (
                console_level,
                file_level,
                global.log_file.as_ref().map(|p| p.display().to_string()),
            )
        }
    };

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(log_file)
        .build()
}

async fn dispatch_command(cli: &cli::Cli, config: Result<Config>) -> ExitCode {
    let config = config.context("failed to load config");
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => config.map(|config| run_options_command(&config)),
        Some(Command::Inis) => {
            let loader = build_config_loader(&cli.global);
            run_inis_command(&loader.format_loaded_files());
            Ok(())
        }
        Some(Command::List(args)) => match config {
            Ok(config) => run_list_command(args, &config).await,
            Err(e) => Err(e),
        },
        Some(Command::Show(args)) => match config {
            Ok(config) => run_show_command(args, &config).await,
            Err(e) => Err(e),
        },
        Some(Command::Install(args)) => match config {
            Ok(config) => run_install_command(args, &config).await,
            Err(e) => Err(e),
        },
        Some(Command::Bootstrap(args)) => match config {
            Ok(config) => run_bootstrap_command(args, &config).await,
            Err(e) => Err(e),
        },
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new().add_toml_file_optional(CONFIG_FILE_NAME);
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader.with_env_prefix(ENV_PREFIX)
}

fn load_config(global: &GlobalOptions) -> Result<Config> {
    let mut loader = build_config_loader(global);
    for value in global.to_config_overrides() {
        loader = match value {
            Override::Int(key, level) => loader.set(key, level)?,
            Override::Text(key, text) => loader.set(key, text)?,
        };
    }
    loader.build()
}
