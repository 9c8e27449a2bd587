// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Zip-slip-safe archive extraction.
//!
//! ```text
//! for each entry:
//!   "dir/"            --> skip (directory-only)
//!   '\' --> '/'       normalize separators
//!   "..", "/x", "C:"  --> reject (string check)
//!   canonical(target/entry) outside canonical(target)
//!                     --> reject (symlinked segments, odd encodings)
//!   mkdir -p parent, write (overwrite)
//! finally: remove the archive file
//! ```
//!
//! Rejections are logged and collected in the [`ExtractionReport`]; they never
//! abort the extraction. Only unreadable archives and write failures do.

use std::ffi::OsString;
use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::ArchiveError;

/// File name suffix (case-insensitive) that routes an artifact to extraction.
pub const ARCHIVE_SUFFIX: &str = ".zip";

/// Returns true if `file_name` ends in [`ARCHIVE_SUFFIX`], ignoring case.
#[must_use]
pub fn is_archive(file_name: &str) -> bool {
    file_name
        .get(file_name.len().saturating_sub(ARCHIVE_SUFFIX.len())..)
        .is_some_and(|suffix| suffix.eq_ignore_ascii_case(ARCHIVE_SUFFIX))
}

/// Why an archive entry was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The normalized path has a `..` segment.
    ParentTraversal,
    /// The normalized path is absolute or carries a drive/UNC prefix.
    AbsolutePath,
    /// The canonical destination is not inside the canonical target.
    OutsideTarget,
    /// The destination could not be canonicalized (e.g. dangling symlink).
    Unverifiable,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParentTraversal => write!(f, "parent-directory traversal"),
            Self::AbsolutePath => write!(f, "absolute path"),
            Self::OutsideTarget => write!(f, "resolves outside the target directory"),
            Self::Unverifiable => write!(f, "destination cannot be verified"),
        }
    }
}

/// An unsafe archive entry that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    /// Entry name as stored in the archive.
    pub entry: String,
    pub reason: RejectReason,
}

impl fmt::Display for RejectedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsafe archive entry '{}': {}", self.entry, self.reason)
    }
}

/// Outcome of [`extract_safely`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Written files, relative to the target directory.
    pub extracted: Vec<PathBuf>,
    pub rejected: Vec<RejectedEntry>,
}

impl ExtractionReport {
    #[must_use]
    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }
}

/// Unifies path separators to `/`.
#[must_use]
pub fn normalize_entry_name(raw: &str) -> String {
    raw.replace('\\', "/")
}

/// Validates a normalized entry name and returns it as a relative path.
///
/// Returns `Ok(None)` for directory-only entries.
///
/// # Errors
///
/// Returns the [`RejectReason`] if the name is absolute or traverses upward.
pub fn entry_relative_path(normalized: &str) -> Result<Option<PathBuf>, RejectReason> {
    if is_absolute_name(normalized) {
        return Err(RejectReason::AbsolutePath);
    }

    let mut relative = PathBuf::new();
    for segment in normalized.split('/') {
        match segment {
            "" | "." => {}
            ".." => return Err(RejectReason::ParentTraversal),
            other => relative.push(other),
        }
    }

    // Anything the platform still sees as non-normal (a `C:` prefix on
    // Windows, for instance) is refused as absolute.
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Err(RejectReason::AbsolutePath);
    }

    if normalized.ends_with('/') || relative.as_os_str().is_empty() {
        return Ok(None);
    }
    Ok(Some(relative))
}

fn is_absolute_name(normalized: &str) -> bool {
    let bytes = normalized.as_bytes();
    let has_drive = bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';
    normalized.starts_with('/') || has_drive || Path::new(normalized).is_absolute()
}

/// Canonicalizes `path`, allowing a suffix of it to not exist yet.
///
/// The deepest existing ancestor is canonicalized (resolving symlinks) and
/// the missing components are appended. A dangling symlink anywhere on the
/// path is an error.
fn canonicalize_lenient(path: &Path) -> io::Result<PathBuf> {
    let mut missing: Vec<OsString> = Vec::new();
    let mut current = path;

    loop {
        match current.canonicalize() {
            Ok(mut base) => {
                for name in missing.iter().rev() {
                    base.push(name);
                }
                return Ok(base);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if current.symlink_metadata().is_ok() {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("dangling symlink at {}", current.display()),
                    ));
                }
                let (Some(parent), Some(name)) = (current.parent(), current.file_name()) else {
                    return Err(e);
                };
                missing.push(name.to_os_string());
                current = parent;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Checks that `target/relative` stays inside `canonical_target` once every
/// symlink is resolved.
fn verify_containment(
    canonical_target: &Path,
    target: &Path,
    relative: &Path,
) -> Result<PathBuf, RejectReason> {
    let candidate = target.join(relative);
    let canonical = canonicalize_lenient(&candidate).map_err(|e| {
        debug!(path = %candidate.display(), error = %e, "cannot canonicalize entry destination");
        RejectReason::Unverifiable
    })?;

    if canonical.starts_with(canonical_target) && canonical != canonical_target {
        Ok(candidate)
    } else {
        Err(RejectReason::OutsideTarget)
    }
}

/// Extracts `archive` into `target`, skipping any entry that would land
/// outside it, then deletes the archive file.
///
/// `target` is created if missing. Existing files are overwritten.
///
/// # Errors
///
/// Returns an [`ArchiveError`] if the archive cannot be opened or read, or if
/// an accepted entry cannot be written. Unsafe entries are not errors.
pub fn extract_safely(archive: &Path, target: &Path) -> Result<ExtractionReport, ArchiveError> {
    let io_err = |path: &Path| {
        let path = path.display().to_string();
        move |source| ArchiveError::Io { path, source }
    };

    fs::create_dir_all(target).map_err(io_err(target))?;
    let canonical_target = target.canonicalize().map_err(io_err(target))?;

    let file = File::open(archive).map_err(io_err(archive))?;
    let mut zip = zip::ZipArchive::new(file).map_err(|source| ArchiveError::Open {
        path: archive.display().to_string(),
        source,
    })?;

    debug!(
        archive = %archive.display(),
        target = %canonical_target.display(),
        entries = zip.len(),
        "extracting archive"
    );

    let mut report = ExtractionReport::default();

    for index in 0..zip.len() {
        let mut entry = zip.by_index(index).map_err(|source| ArchiveError::ReadEntry {
            path: archive.display().to_string(),
            index,
            source,
        })?;
        let raw_name = entry.name().to_string();
        let normalized = normalize_entry_name(&raw_name);

        let checked = entry_relative_path(&normalized).and_then(|relative| match relative {
            Some(relative) => verify_containment(&canonical_target, target, &relative)
                .map(|destination| Some((relative, destination))),
            None => Ok(None),
        });

        let (relative, destination) = match checked {
            Ok(Some(paths)) => paths,
            Ok(None) => continue,
            Err(reason) => {
                let rejected = RejectedEntry {
                    entry: raw_name,
                    reason,
                };
                warn!("{rejected}, skipping");
                report.rejected.push(rejected);
                continue;
            }
        };

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(io_err(parent))?;
        }

        let mut out = File::create(&destination).map_err(io_err(&destination))?;
        io::copy(&mut entry, &mut out).map_err(io_err(&destination))?;

        debug!(entry = %relative.display(), "extracted");
        report.extracted.push(relative);
    }

    drop(zip);
    if let Err(e) = fs::remove_file(archive) {
        warn!(archive = %archive.display(), error = %e, "failed to remove staged archive");
    }

    info!(
        target = %target.display(),
        extracted = report.extracted.len(),
        rejected = report.rejected.len(),
        "archive extracted"
    );
    Ok(report)
}

#[cfg(test)]
mod tests;
