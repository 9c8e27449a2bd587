// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use super::{
    ExtractionReport, RejectReason, entry_relative_path, extract_safely, is_archive,
    normalize_entry_name,
};
use crate::install::test_utils::write_zip;

fn rejected_reasons(report: &ExtractionReport) -> Vec<(&str, RejectReason)> {
    report
        .rejected
        .iter()
        .map(|r| (r.entry.as_str(), r.reason))
        .collect()
}

#[test]
fn test_is_archive_ignores_case() {
    assert!(is_archive("Utilla.zip"));
    assert!(is_archive("Utilla.ZIP"));
    assert!(!is_archive("Utilla.dll"));
    assert!(!is_archive("zip"));
    assert!(!is_archive("Utilla.zip.dll"));
    assert!(!is_archive("€€"));
    assert!(is_archive("Mod€.zip"));
}

#[test]
fn test_entry_relative_path_accepts_nested_names() {
    assert_eq!(
        entry_relative_path("BepInEx/plugins/Utilla.dll"),
        Ok(Some(PathBuf::from("BepInEx/plugins/Utilla.dll")))
    );
    assert_eq!(
        entry_relative_path("./a/./b.dll"),
        Ok(Some(PathBuf::from("a/b.dll")))
    );
}

#[test]
fn test_entry_relative_path_directory_entries() {
    assert_eq!(entry_relative_path("BepInEx/"), Ok(None));
    assert_eq!(entry_relative_path("./"), Ok(None));
}

#[test]
fn test_entry_relative_path_rejects_unsafe_names() {
    assert_eq!(
        entry_relative_path("../evil.dll"),
        Err(RejectReason::ParentTraversal)
    );
    assert_eq!(
        entry_relative_path("sub/../../evil.dll"),
        Err(RejectReason::ParentTraversal)
    );
    assert_eq!(
        entry_relative_path("/etc/evil"),
        Err(RejectReason::AbsolutePath)
    );
    assert_eq!(
        entry_relative_path("C:/Windows/evil.dll"),
        Err(RejectReason::AbsolutePath)
    );
    assert_eq!(
        entry_relative_path(&normalize_entry_name(r"..\evil.dll")),
        Err(RejectReason::ParentTraversal)
    );
    assert_eq!(
        entry_relative_path(&normalize_entry_name(r"\\server\share\evil.dll")),
        Err(RejectReason::AbsolutePath)
    );
}

#[test]
fn test_extract_writes_nested_files_and_removes_archive() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("Utilla.zip");
    write_zip(
        &archive,
        &[
            ("Utilla/", b"".as_slice()),
            ("Utilla/Utilla.dll", b"dll bytes"),
            (r"Utilla\README.txt", b"readme"),
        ],
    );
    let target = dir.path().join("plugins");

    let report = extract_safely(&archive, &target).unwrap();

    assert_eq!(
        report.extracted,
        vec![
            PathBuf::from("Utilla/Utilla.dll"),
            PathBuf::from("Utilla/README.txt")
        ]
    );
    assert!(!report.has_rejections());
    assert_eq!(
        fs::read(target.join("Utilla/Utilla.dll")).unwrap(),
        b"dll bytes"
    );
    assert_eq!(fs::read(target.join("Utilla/README.txt")).unwrap(), b"readme");
    assert!(!archive.exists());
}

#[test]
fn test_extract_overwrites_existing_files() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("plugins");
    fs::create_dir_all(&target).unwrap();
    fs::write(target.join("Utilla.dll"), b"old").unwrap();

    let archive = dir.path().join("Utilla.zip");
    write_zip(&archive, &[("Utilla.dll", b"new".as_slice())]);

    extract_safely(&archive, &target).unwrap();
    assert_eq!(fs::read(target.join("Utilla.dll")).unwrap(), b"new");
}

#[test]
fn test_extract_skips_traversal_entries_and_keeps_going() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("game");
    let target = root.join("BepInEx/plugins");
    let archive = dir.path().join("evil.zip");
    write_zip(
        &archive,
        &[
            ("../../evil.dll", b"x".as_slice()),
            (r"..\..\evil2.dll", b"x"),
            ("/abs.dll", b"x"),
            ("ok.dll", b"ok"),
        ],
    );

    let report = extract_safely(&archive, &target).unwrap();

    assert_eq!(report.extracted, vec![PathBuf::from("ok.dll")]);
    assert_eq!(
        rejected_reasons(&report),
        vec![
            ("../../evil.dll", RejectReason::ParentTraversal),
            (r"..\..\evil2.dll", RejectReason::ParentTraversal),
            ("/abs.dll", RejectReason::AbsolutePath),
        ]
    );
    assert!(!root.join("evil.dll").exists());
    assert!(!root.join("evil2.dll").exists());
    assert!(!dir.path().join("evil.dll").exists());
    assert_eq!(fs::read(target.join("ok.dll")).unwrap(), b"ok");
}

#[test]
fn test_extract_rejected_entry_message() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("evil.zip");
    write_zip(&archive, &[("../evil.dll", b"x".as_slice())]);

    let report = extract_safely(&archive, &dir.path().join("t")).unwrap();
    insta::assert_snapshot!(
        report.rejected[0].to_string(),
        @"unsafe archive entry '../evil.dll': parent-directory traversal"
    );
}

#[cfg(unix)]
#[test]
fn test_extract_rejects_entries_through_symlinks() {
    let dir = tempdir().unwrap();
    let outside = dir.path().join("outside");
    let target = dir.path().join("target");
    fs::create_dir_all(&outside).unwrap();
    fs::create_dir_all(&target).unwrap();
    std::os::unix::fs::symlink(&outside, target.join("link")).unwrap();
    std::os::unix::fs::symlink(outside.join("nowhere"), target.join("dangling")).unwrap();

    let archive = dir.path().join("evil.zip");
    write_zip(
        &archive,
        &[
            ("link/evil.dll", b"x".as_slice()),
            ("dangling", b"x"),
            ("inside.dll", b"ok"),
        ],
    );

    let report = extract_safely(&archive, &target).unwrap();

    assert_eq!(report.extracted, vec![PathBuf::from("inside.dll")]);
    assert_eq!(
        rejected_reasons(&report),
        vec![
            ("link/evil.dll", RejectReason::OutsideTarget),
            ("dangling", RejectReason::Unverifiable),
        ]
    );
    assert!(!outside.join("evil.dll").exists());
    assert!(!outside.join("nowhere").exists());
}

#[test]
fn test_extract_corrupt_archive_is_an_error() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("broken.zip");
    fs::write(&archive, b"definitely not a zip").unwrap();

    let err = extract_safely(&archive, &dir.path().join("t")).unwrap_err();
    assert!(matches!(err, crate::error::ArchiveError::Open { .. }));
}

#[test]
fn test_extract_missing_archive_is_an_error() {
    let dir = tempdir().unwrap();
    let err = extract_safely(Path::new("/nonexistent/x.zip"), dir.path()).unwrap_err();
    assert!(matches!(err, crate::error::ArchiveError::Io { .. }));
}
