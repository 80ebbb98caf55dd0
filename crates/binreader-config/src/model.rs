// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so misspelled keys are
//! reported at startup instead of silently ignored.

use binreader_core::ReaderMode;
use serde::{Deserialize, Serialize};

/// Top-level binreader configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BinreaderConfig {
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Defaults applied to every reader stream.
    #[serde(default)]
    pub reader: ReaderConfig,

    /// Refresh cadence for reread and stream readers.
    #[serde(default)]
    pub heartbeat: HeartbeatConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Default level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Reader stream defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReaderConfig {
    /// Component tag to instantiate.
    #[serde(default = "default_reader_tag")]
    pub tag: String,

    /// Bytes per record.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Directory prepended to relative sources.
    #[serde(default)]
    pub path_prefix: Option<String>,

    /// Mode used when the command line does not choose one.
    #[serde(default)]
    pub mode: ReaderMode,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            tag: default_reader_tag(),
            chunk_size: default_chunk_size(),
            path_prefix: None,
            mode: ReaderMode::default(),
        }
    }
}

fn default_reader_tag() -> String {
    "Binary".to_string()
}

fn default_chunk_size() -> usize {
    1024
}

/// Heartbeat configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HeartbeatConfig {
    /// Milliseconds between heartbeats.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

fn default_interval_ms() -> u64 {
    1000
}
