// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              MmmError (~24 bytes)
//!                     |
//!   +------+------+---+---+-------+-----+----+
//!   |      |      |       |       |     |    |
//!   v      v      v       v       v     v    v
//! Bail   Net    Cfg   Registry Install Archive Fs/Io/Other
//!        Box    Box     Box      Box    Box    Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Network   Reqwest, HttpError, DownloadFailed
//!   Config    ParseError, MissingKey, InvalidValue
//!   Registry  EmptyName, DuplicateName, Feed
//!   Install   InvalidModDefinition, DownloadFailure, InstallFailure,
//!             ExtractionFailure, DependencyInstallFailure, DependencyNotFound, Cancelled
//!   Archive   Open, ReadEntry, Io
//!
//! All variants boxed => MmmError fits in 24 bytes.
//! ```

use std::fmt;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`MmmError`].
pub type MmmResult<T> = std::result::Result<T, MmmError>;

/// Result type for a single mod install pipeline.
pub type InstallResult<T> = std::result::Result<T, InstallError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum MmmError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Network operation failed.
    #[error("network error: {0}")]
    Network(#[from] Box<NetworkError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Mod registry or metadata feed error.
    #[error("registry error: {0}")]
    Registry(#[from] Box<RegistryError>),

    /// Mod installation error.
    #[error("install error: {0}")]
    Install(#[from] Box<InstallError>),

    /// Archive extraction error.
    #[error("archive error: {0}")]
    Archive(#[from] Box<ArchiveError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a fatal [`MmmError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> MmmError {
    MmmError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for MmmError {
                fn from(err: $error) -> Self {
                    MmmError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    NetworkError => Network,
    ConfigError => Config,
    RegistryError => Registry,
    InstallError => Install,
    ArchiveError => Archive,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Network Errors ---

/// Network operation errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Download failed.
    #[error("download failed: {url} - {message}")]
    DownloadFailed { url: String, message: String },

    /// HTTP error response.
    #[error("http error {status}: {url}")]
    HttpError { status: u16, url: String },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// I/O error during download.
    #[error("io error during download: {0}")]
    Io(#[from] std::io::Error),
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Registry Errors ---

/// Errors raised while building the mod registry from the metadata feed.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A descriptor has an empty name.
    #[error("mod descriptor #{index} has an empty name")]
    EmptyName { index: usize },

    /// Two descriptors share the same name.
    #[error("duplicate mod name '{name}' in metadata feed")]
    DuplicateName { name: String },

    /// The metadata feed could not be decoded.
    #[error("failed to decode metadata feed from {url}: {message}")]
    Feed { url: String, message: String },
}

// --- Install Errors ---

/// Failure of a single mod's install pipeline.
#[derive(Debug, Error)]
pub enum InstallError {
    /// The descriptor cannot be installed as written (empty or malformed URL,
    /// unusable name or install location). Raised before any network call.
    #[error("invalid definition for mod '{name}': {reason}")]
    InvalidModDefinition { name: String, reason: String },

    /// Fetching the artifact failed.
    #[error("failed to download '{name}'")]
    DownloadFailure {
        name: String,
        #[source]
        source: NetworkError,
    },

    /// Placement or extraction failed.
    #[error("failed to install '{name}': {message}")]
    InstallFailure { name: String, message: String },

    /// The artifact archive could not be extracted.
    #[error("failed to extract '{name}'")]
    ExtractionFailure {
        name: String,
        #[source]
        source: ArchiveError,
    },

    /// A dependency scheduled before this mod failed.
    #[error("mod '{name}' was not installed because dependency '{dependency}' failed")]
    DependencyInstallFailure { name: String, dependency: String },

    /// A declared dependency is missing from the registry (strict mode).
    #[error("mod '{name}' depends on '{dependency}', which is not in the registry")]
    DependencyNotFound { name: String, dependency: String },

    /// The requested mod itself is not in the registry.
    #[error("mod '{0}' is not in the registry")]
    UnknownMod(String),

    /// Installation was cancelled before this mod started.
    #[error("installation of '{0}' was cancelled")]
    Cancelled(String),
}

impl InstallError {
    /// Wraps any displayable placement error as [`InstallError::InstallFailure`].
    pub fn failure(name: impl Into<String>, err: impl fmt::Display) -> Self {
        Self::InstallFailure {
            name: name.into(),
            message: err.to_string(),
        }
    }
}

// --- Archive Errors ---

/// Fatal archive errors. Unsafe entries are not errors; see
/// [`crate::install::extract::RejectedEntry`].
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The archive could not be opened or is not a valid zip file.
    #[error("failed to open archive '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// An entry could not be read from the archive.
    #[error("failed to read entry #{index} of '{path}': {source}")]
    ReadEntry {
        path: String,
        index: usize,
        #[source]
        source: zip::result::ZipError,
    },

    /// Writing an extracted entry failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
