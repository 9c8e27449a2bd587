// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem helpers.
//!
//! ```text
//! paths:     safe_relative_path()   "BepInEx\plugins" --> BepInEx/plugins
//!            is_single_component()  mod names used as folder names
//! transfer:  move_file()            rename, else copy + remove
//! ```

pub mod paths;
pub mod transfer;
