// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cmd::list::{format_mod_details, format_mod_list, select_mod};
use crate::registry::{ModDescriptor, ModRegistry};

fn registry() -> ModRegistry {
    ModRegistry::new(vec![
        ModDescriptor::new("Newtonsoft", "https://example.com/Newtonsoft.dll")
            .with_author("James")
            .with_version("13.0.3"),
        ModDescriptor::new("Utilla", "https://example.com/Utilla.zip")
            .with_author("Graze")
            .with_version("1.6.14")
            .with_dependencies(["Newtonsoft", "Ghost"]),
        ModDescriptor::new("42", "https://example.com/42.dll"),
    ])
    .unwrap()
}

#[test]
fn test_select_mod_by_name_or_position() {
    let registry = registry();
    assert_eq!(select_mod(&registry, "Utilla").unwrap().name, "Utilla");
    assert_eq!(select_mod(&registry, "1").unwrap().name, "Newtonsoft");
    assert!(select_mod(&registry, "0").is_none());
    assert!(select_mod(&registry, "4").is_none());
    assert!(select_mod(&registry, "utilla").is_none());
}

#[test]
fn test_select_mod_prefers_exact_name() {
    let registry = registry();
    assert_eq!(select_mod(&registry, "42").unwrap().name, "42");
}

#[test]
fn test_format_mod_list() {
    let lines = format_mod_list(&registry(), true).join("\n");
    insta::assert_snapshot!(lines, @r"
    [01] Newtonsoft by James - v13.0.3
    [02] Utilla by Graze - v1.6.14
         Dependencies: Newtonsoft, Ghost
    [03] 42
    ");
}

#[test]
fn test_format_mod_list_without_dependencies() {
    let lines = format_mod_list(&registry(), false);
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_format_mod_details_flags_missing_dependencies() {
    let registry = registry();
    let utilla = registry.lookup("Utilla").unwrap();
    let lines = format_mod_details(&registry, utilla).join("\n");
    insta::assert_snapshot!(lines, @r"
    Utilla by Graze - v1.6.14
      url:      https://example.com/Utilla.zip
      dependencies:
        Newtonsoft
        Ghost (not in the mod list)
    ");
}
