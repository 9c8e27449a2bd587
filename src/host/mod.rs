// mmm-rs: Monke Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The game installation mods are placed into.
//!
//! ```text
//! discovery:  --game-dir / host.root  -->  must exist
//!             else first existing host.candidates entry
//! loader:     <root>/BepInEx/ + <root>/winhttp.dll  -->  installed
//!             else download loader zip, extract_safely() into <root>,
//!             then fetch BepInEx.cfg (best effort)
//! ```

pub mod discovery;
pub mod loader;
