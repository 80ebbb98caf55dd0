// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for binreader.
//!
//! TOML configuration with strict key checking (`deny_unknown_fields`),
//! layered file lookup, `BINREADER_*` environment overrides, and miette
//! diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use binreader_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("chunk size: {}", config.reader.chunk_size);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::BinreaderConfig;
pub use validation::MAX_CHUNK_SIZE;

/// Load configuration from the standard hierarchy and validate it.
pub fn load_and_validate() -> Result<BinreaderConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Load configuration from one explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<BinreaderConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        read_source(path).into_iter().collect()
    })
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<BinreaderConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Validate a loaded config, or convert the load error into diagnostics.
///
/// `sources` is only called on failure, to read files for span information.
fn finish(
    loaded: Result<BinreaderConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<BinreaderConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

fn read_source(path: &Path) -> Option<(String, String)> {
    std::fs::read_to_string(path)
        .ok()
        .map(|content| (path.display().to_string(), content))
}

/// Contents of every config file in the lookup hierarchy that exists.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut sources = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        sources.extend(read_source(&cwd.join(loader::LOCAL_CONFIG)));
    }
    if let Some(user) = loader::user_config_path() {
        sources.extend(read_source(&user));
    }
    sources.extend(read_source(Path::new(loader::SYSTEM_CONFIG)));

    sources
}
