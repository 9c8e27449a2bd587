// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-to-end install tests: metadata feed, loader bootstrap and mod
//! installation against a wiremock server and a temporary game directory.

use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::Arc;

use mmm_rs::config::Config;
use mmm_rs::config::types::MissingDependencyPolicy;
use mmm_rs::host::loader::{LoaderStatus, ensure_loader, loader_installed};
use mmm_rs::install::{InstallSettings, Installer};
use mmm_rs::net::ProgressDisplay;
use mmm_rs::registry::feed::load_feed;
use tempfile::{TempDir, tempdir};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zip::write::SimpleFileOptions;

fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(contents).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

async fn serve(server: &MockServer, file: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(format!("/{file}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(server)
        .await;
}

fn feed_json(server: &MockServer) -> String {
    let base = server.uri();
    serde_json::json!([
        {
            "name": "Newtonsoft",
            "author": "James",
            "version": "13.0.3",
            "download_url": format!("{base}/Newtonsoft.Json.dll"),
            "install_location": null,
            "dependencies": null
        },
        {
            "name": "Utilla",
            "author": "Graze",
            "version": "1.6.14",
            "download_url": format!("{base}/Utilla.zip"),
            "dependencies": ["Newtonsoft"]
        },
        {
            "name": "Hostile",
            "author": "Nobody",
            "version": "0.0.1",
            "download_url": format!("{base}/Hostile.zip"),
            "install_location": "BepInEx/patchers"
        },
        {
            "name": "Orphan",
            "author": "Nobody",
            "version": "1.0.0",
            "download_url": format!("{base}/Orphan.dll"),
            "dependencies": ["NotInFeed"]
        }
    ])
    .to_string()
}

async fn session(policy: MissingDependencyPolicy) -> (MockServer, TempDir, TempDir, Installer) {
    let server = MockServer::start().await;
    serve(&server, "modinfo.json", feed_json(&server).into_bytes()).await;

    let registry = load_feed(&format!("{}/modinfo.json", server.uri()), ProgressDisplay::Silent)
        .await
        .unwrap();

    let game = tempdir().unwrap();
    let staging = tempdir().unwrap();
    let settings = InstallSettings::builder()
        .host_root(game.path())
        .staging_dir(staging.path())
        .missing_dependencies(policy)
        .progress(ProgressDisplay::Silent)
        .build();
    let installer = Installer::new(Arc::new(registry), settings);
    (server, game, staging, installer)
}

fn is_empty(dir: &Path) -> bool {
    std::fs::read_dir(dir).unwrap().count() == 0
}

#[tokio::test]
async fn install_from_feed_with_dependency() {
    let (server, game, staging, installer) = session(MissingDependencyPolicy::Skip).await;
    serve(&server, "Newtonsoft.Json.dll", b"json".to_vec()).await;
    serve(
        &server,
        "Utilla.zip",
        zip_bytes(&[("Utilla/Utilla.dll", b"utilla"), ("Utilla/README.md", b"hi")]),
    )
    .await;

    assert_eq!(installer.registry().len(), 4);
    let report = installer.install_by_name("Utilla").await;

    assert!(report.succeeded());
    let order: Vec<&str> = report.outcomes().iter().map(|o| o.name.as_str()).collect();
    assert_eq!(order, ["Newtonsoft", "Utilla"]);
    assert_eq!(
        report.outcome("Newtonsoft").unwrap().requested_by.as_deref(),
        Some("Utilla")
    );

    let plugins = game.path().join("BepInEx/plugins");
    assert_eq!(
        std::fs::read(plugins.join("Newtonsoft/Newtonsoft.Json.dll")).unwrap(),
        b"json"
    );
    assert_eq!(
        std::fs::read(plugins.join("Utilla/Utilla.dll")).unwrap(),
        b"utilla"
    );
    assert!(is_empty(staging.path()));
}

#[tokio::test]
async fn hostile_archive_entries_stay_inside_install_location() {
    let (server, game, staging, installer) = session(MissingDependencyPolicy::Skip).await;
    serve(
        &server,
        "Hostile.zip",
        zip_bytes(&[
            ("ok.dll", b"fine"),
            ("../../escape.dll", b"evil"),
            ("..\\win.dll", b"evil"),
            ("/abs.dll", b"evil"),
        ]),
    )
    .await;

    let report = installer.install_by_name("Hostile").await;
    assert!(report.succeeded());

    let patchers = game.path().join("BepInEx/patchers");
    assert_eq!(std::fs::read(patchers.join("ok.dll")).unwrap(), b"fine");
    assert!(!game.path().join("escape.dll").exists());
    assert!(!game.path().join("BepInEx/win.dll").exists());
    assert!(!game.path().parent().unwrap().join("escape.dll").exists());
    assert!(is_empty(staging.path()));
}

#[tokio::test]
async fn missing_dependency_policy_controls_install() {
    let (server, game, _staging, lenient) = session(MissingDependencyPolicy::Skip).await;
    serve(&server, "Orphan.dll", b"orphan".to_vec()).await;
    assert!(lenient.install_by_name("Orphan").await.succeeded());
    assert!(
        game.path()
            .join("BepInEx/plugins/Orphan/Orphan.dll")
            .is_file()
    );

    let (_server, game, _staging, strict) = session(MissingDependencyPolicy::Fail).await;
    let report = strict.install_by_name("Orphan").await;
    assert!(!report.succeeded());
    insta::assert_snapshot!(
        report.outcomes()[0].message(),
        @"Failed to install Orphan: mod 'Orphan' depends on 'NotInFeed', which is not in the registry"
    );
    assert!(!game.path().join("BepInEx/plugins/Orphan").exists());
}

#[tokio::test]
async fn bootstrap_then_install() {
    let (server, game, _staging, installer) = session(MissingDependencyPolicy::Skip).await;
    serve(
        &server,
        "BepInEx_win_x64.zip",
        zip_bytes(&[
            ("BepInEx/core/BepInEx.dll", b"core"),
            ("winhttp.dll", b"proxy"),
        ]),
    )
    .await;
    serve(&server, "BepInEx.cfg", b"[Logging]\n".to_vec()).await;
    serve(&server, "Newtonsoft.Json.dll", b"json".to_vec()).await;

    let mut loader = Config::default().loader;
    loader.url = format!("{}/BepInEx_win_x64.zip", server.uri());
    loader.config_url = format!("{}/BepInEx.cfg", server.uri());

    let status = ensure_loader(game.path(), &loader, installer.fetcher(), false)
        .await
        .unwrap();
    assert!(matches!(
        status,
        LoaderStatus::Installed {
            config_applied: true,
            ..
        }
    ));
    assert!(loader_installed(game.path(), &loader));

    assert!(installer.install_by_name("Newtonsoft").await.succeeded());
    assert!(
        game.path()
            .join("BepInEx/plugins/Newtonsoft/Newtonsoft.Json.dll")
            .is_file()
    );
}

#[tokio::test]
async fn feed_with_duplicate_names_is_rejected() {
    let server = MockServer::start().await;
    serve(
        &server,
        "modinfo.json",
        br#"[{"name":"A","download_url":"x"},{"name":"A","download_url":"y"}]"#.to_vec(),
    )
    .await;

    let err = load_feed(&format!("{}/modinfo.json", server.uri()), ProgressDisplay::Silent)
        .await
        .unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"registry error: duplicate mod name 'A' in metadata feed"
    );
}
