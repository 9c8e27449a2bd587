// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Network module: whole-body HTTP GETs.
//!
//! ```text
//! Downloader::new()
//!   .url() .header()
//!   .progress() .silent()
//!        |
//!        +--------------+---------------+
//!        v              v               v
//!   fetch_bytes()  download_to()   download_string()
//!                       |
//!                       v
//!           NamedTempFile in target dir --> persist (rename)
//!
//! Global client: OnceLock, connection pool, keep-alive
//! No timeout, no retry, no resume: callers wrap if they need them.
//! ```

use crate::error::{MmmResult, NetworkError};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use reqwest::Response;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

/// Global HTTP client - initialized once, reused across all downloads.
/// Falls back to a basic client if custom configuration fails.
fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("mmm-rs/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        })
        .clone()
}

/// Progress display style for downloads.
///
/// Bodies are fetched in one call, so there is no byte-level progress, only
/// a spinner while the request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressDisplay {
    #[default]
    Spinner,
    Silent,
}

impl std::fmt::Display for ProgressDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spinner => write!(f, "spinner"),
            Self::Silent => write!(f, "silent"),
        }
    }
}

/// Async HTTP downloader with builder pattern.
///
/// # Example
/// ```ignore
/// use mmm_rs::net::Downloader;
///
/// Downloader::new()
///     .url("https://example.com/Utilla.zip")
///     .download_to("/tmp/Utilla.zip")
///     .await?;
/// ```
pub struct Downloader {
    client: Client,
    url: Option<String>,
    headers: Vec<(String, String)>,
    progress_display: ProgressDisplay,
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new()
    }
}

impl Downloader {
    /// Create a new downloader sharing the global connection pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: global_client().clone(),
            url: None,
            headers: Vec::new(),
            progress_display: ProgressDisplay::default(),
        }
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub const fn progress(mut self, style: ProgressDisplay) -> Self {
        self.progress_display = style;
        self
    }

    #[must_use]
    pub const fn silent(mut self) -> Self {
        self.progress_display = ProgressDisplay::Silent;
        self
    }

    fn url_required(&self) -> MmmResult<&str> {
        self.url
            .as_deref()
            .ok_or_else(|| NetworkError::InvalidUrl("no URL provided".to_string()).into())
    }

    fn create_spinner(&self, url: &str) -> Option<ProgressBar> {
        match self.progress_display {
            ProgressDisplay::Silent => None,
            ProgressDisplay::Spinner => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(spinner_style());
                pb.set_message(format!("GET {url}"));
                pb.enable_steady_tick(Duration::from_millis(120));
                Some(pb)
            }
        }
    }

    /// Sends the GET request and checks the status code.
    async fn send(&self, url: &str) -> MmmResult<Response> {
        let mut request = self.client.get(url);
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await.map_err(NetworkError::Reqwest)?;

        if !response.status().is_success() {
            return Err(NetworkError::HttpError {
                status: response.status().as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        Ok(response)
    }

    /// Downloads the entire response body into memory.
    ///
    /// # Errors
    ///
    /// Returns an error if no URL is configured, the request fails, or the
    /// server answers with a non-success status code.
    pub async fn fetch_bytes(&self) -> MmmResult<Vec<u8>> {
        let url = self.url_required()?;
        let spinner = self.create_spinner(url);

        let result: MmmResult<Vec<u8>> = async {
            let response = self.send(url).await?;
            let body = response.bytes().await.map_err(NetworkError::Reqwest)?;
            Ok(body.to_vec())
        }
        .await;

        if let Some(pb) = spinner {
            match &result {
                Ok(body) => pb.finish_with_message(format!("{} bytes from {url}", body.len())),
                Err(_) => pb.abandon_with_message("failed"),
            }
        }

        result
    }

    /// Downloads the body and writes it to `output` as one atomic step.
    ///
    /// The body is written to a temporary file next to `output` and renamed
    /// over it, so readers never observe a partially written file and an
    /// existing file is replaced in one go. Missing parent directories are
    /// created.
    ///
    /// # Errors
    ///
    /// Returns an error if the download fails or the file cannot be written.
    pub async fn download_to(&self, output: impl Into<PathBuf>) -> MmmResult<PathBuf> {
        let output = output.into();
        let url = self.url_required()?.to_string();
        let body = self.fetch_bytes().await?;

        let target = output.clone();
        tokio::task::spawn_blocking(move || write_atomically(&target, &body))
            .await
            .map_err(|e| NetworkError::DownloadFailed {
                url: url.clone(),
                message: format!("writer task failed: {e}"),
            })?
            .map_err(|e| NetworkError::DownloadFailed {
                url,
                message: format!("failed to write {}: {e}", output.display()),
            })?;

        Ok(output)
    }

    /// Download and return content as string.
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or returns a non-success
    /// status code.
    pub async fn download_string(&self) -> MmmResult<String> {
        let url = self.url_required()?;
        let response = self.send(url).await?;
        let text = response.text().await.map_err(NetworkError::Reqwest)?;
        Ok(text)
    }
}

/// Writes `bytes` to a temp file in `path`'s directory, then renames it
/// into place. The temp file is removed on any error.
fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
