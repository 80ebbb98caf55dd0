// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Lookup order: `./binreader.toml` > `~/.config/binreader/binreader.toml` >
//! `/etc/binreader/binreader.toml`, with `BINREADER_` environment overrides
//! on top.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::BinreaderConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG: &str = "/etc/binreader/binreader.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG: &str = "binreader.toml";

/// Path of the per-user config file, if the platform has a config dir.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("binreader/binreader.toml"))
}

/// Build the full layered Figment without extracting it.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/binreader/binreader.toml`
/// 3. `~/.config/binreader/binreader.toml`
/// 4. `./binreader.toml`
/// 5. `BINREADER_*` environment variables
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(BinreaderConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    figment.merge(Toml::file(LOCAL_CONFIG)).merge(env_provider())
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<BinreaderConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<BinreaderConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BinreaderConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file, with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<BinreaderConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BinreaderConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Environment provider mapping `BINREADER_SECTION_KEY` to `section.key`.
///
/// Only the first underscore after the section name becomes a dot, so
/// `BINREADER_READER_CHUNK_SIZE` maps to `reader.chunk_size`.
fn env_provider() -> Env {
    Env::prefixed("BINREADER_").map(|key| {
        let key_str = key.as_str();
        key_str
            .replacen("log_", "log.", 1)
            .replacen("reader_", "reader.", 1)
            .replacen("heartbeat_", "heartbeat.", 1)
            .into()
    })
}
