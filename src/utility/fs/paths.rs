// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Component, Path, PathBuf};

/// Parses a `/` or `\` separated relative path that must stay below its base.
///
/// Empty and `.` segments are dropped, so `"BepInEx/plugins/"` and
/// `"./BepInEx\\plugins"` both yield `BepInEx/plugins`. Returns `None` for
/// absolute paths, drive prefixes, and any `..` segment. An empty input
/// yields an empty path.
#[must_use]
pub fn safe_relative_path(raw: &str) -> Option<PathBuf> {
    let normalized = raw.trim().replace('\\', "/");
    let bytes = normalized.as_bytes();
    let has_drive = bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';
    if normalized.starts_with('/') || has_drive {
        return None;
    }

    let mut path = PathBuf::new();
    for segment in normalized.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            other => path.push(other),
        }
    }

    path.components()
        .all(|c| matches!(c, Component::Normal(_)))
        .then_some(path)
}

/// True if `name` can be used as exactly one directory or file name.
#[must_use]
pub fn is_single_component(name: &str) -> bool {
    !name.is_empty()
        && !name.contains(['/', '\\', ':'])
        && matches!(
            Path::new(name).components().collect::<Vec<_>>().as_slice(),
            [Component::Normal(_)]
        )
}
