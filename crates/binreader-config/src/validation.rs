// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::BinreaderConfig;

/// Levels accepted by `log.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Largest `reader.chunk_size` the host accepts (64 MiB).
pub const MAX_CHUNK_SIZE: usize = 64 * 1024 * 1024;

/// Validate a deserialized configuration.
///
/// Collects every problem instead of stopping at the first one.
pub fn validate_config(config: &BinreaderConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.log.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of: {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.reader.tag.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "reader.tag must not be empty".to_string(),
        });
    }

    if config.reader.chunk_size == 0 {
        errors.push(ConfigError::Validation {
            message: "reader.chunk_size must be greater than zero".to_string(),
        });
    } else if config.reader.chunk_size > MAX_CHUNK_SIZE {
        errors.push(ConfigError::Validation {
            message: format!(
                "reader.chunk_size {} exceeds the maximum of {MAX_CHUNK_SIZE}",
                config.reader.chunk_size
            ),
        });
    }

    if let Some(prefix) = &config.reader.path_prefix {
        if prefix.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "reader.path_prefix must not be blank; omit it instead".to_string(),
            });
        }
    }

    if config.heartbeat.interval_ms == 0 {
        errors.push(ConfigError::Validation {
            message: "heartbeat.interval_ms must be greater than zero".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
