// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-stream options understood by the Binary reader.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use binreader_core::ReaderError;
use tracing::warn;

/// Chunk size used when neither the host nor the stream sets one.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Option key for the record size in bytes.
pub const CHUNK_SIZE_KEY: &str = "chunk_size";

/// Option key for the directory prepended to relative sources.
pub const PATH_PREFIX_KEY: &str = "path_prefix";

/// Settings of one opened stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryOptions {
    /// Maximum number of bytes per record. Always positive.
    pub chunk_size: usize,
    /// Directory prepended to relative source paths.
    pub path_prefix: Option<PathBuf>,
}

impl Default for BinaryOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            path_prefix: None,
        }
    }
}

impl BinaryOptions {
    /// Apply per-stream `options` on top of `self`.
    ///
    /// Unknown keys are ignored with a warning. An empty `path_prefix`
    /// clears the prefix.
    pub fn merged(&self, options: &BTreeMap<String, String>) -> Result<Self, ReaderError> {
        let mut merged = self.clone();
        for (key, value) in options {
            match key.as_str() {
                CHUNK_SIZE_KEY => merged.chunk_size = parse_chunk_size(value)?,
                PATH_PREFIX_KEY => {
                    let trimmed = value.trim();
                    merged.path_prefix = if trimmed.is_empty() {
                        None
                    } else {
                        Some(PathBuf::from(trimmed))
                    };
                }
                other => warn!(option = other, "ignoring unknown binary reader option"),
            }
        }
        Ok(merged)
    }

    /// Resolve `source` against the path prefix. Absolute sources are kept as is.
    pub fn resolve(&self, source: &str) -> PathBuf {
        let path = Path::new(source);
        match &self.path_prefix {
            Some(prefix) if path.is_relative() => prefix.join(path),
            _ => path.to_path_buf(),
        }
    }
}

fn parse_chunk_size(value: &str) -> Result<usize, ReaderError> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(ReaderError::Config(
            "chunk_size must be greater than zero".to_string(),
        )),
        Ok(size) => Ok(size),
        Err(e) => Err(ReaderError::Config(format!(
            "chunk_size `{value}` is not a valid size: {e}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_without_options() {
        let merged = BinaryOptions::default().merged(&BTreeMap::new()).unwrap();
        assert_eq!(merged.chunk_size, 1024);
        assert!(merged.path_prefix.is_none());
    }

    #[test]
    fn stream_options_override_defaults() {
        let merged = BinaryOptions::default()
            .merged(&options(&[("chunk_size", "64"), ("path_prefix", "/data")]))
            .unwrap();
        assert_eq!(merged.chunk_size, 64);
        assert_eq!(merged.path_prefix.as_deref(), Some(Path::new("/data")));
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let err = BinaryOptions::default()
            .merged(&options(&[("chunk_size", "0")]))
            .unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn non_numeric_chunk_size_is_rejected() {
        let err = BinaryOptions::default()
            .merged(&options(&[("chunk_size", "big")]))
            .unwrap_err();
        assert!(matches!(err, ReaderError::Config(msg) if msg.contains("big")));
    }

    #[test]
    #[tracing_test::traced_test]
    fn unknown_options_are_ignored_with_warning() {
        let merged = BinaryOptions::default()
            .merged(&options(&[("want_record", "F")]))
            .unwrap();
        assert_eq!(merged, BinaryOptions::default());
        assert!(logs_contain("ignoring unknown binary reader option"));
    }

    #[test]
    fn empty_prefix_clears_prefix() {
        let base = BinaryOptions {
            chunk_size: 8,
            path_prefix: Some(PathBuf::from("/data")),
        };
        let merged = base.merged(&options(&[("path_prefix", "  ")])).unwrap();
        assert!(merged.path_prefix.is_none());
    }

    #[test]
    fn prefix_only_applies_to_relative_sources() {
        let opts = BinaryOptions {
            chunk_size: 8,
            path_prefix: Some(PathBuf::from("/data")),
        };
        assert_eq!(opts.resolve("in.bin"), PathBuf::from("/data/in.bin"));
        assert_eq!(opts.resolve("/abs/in.bin"), PathBuf::from("/abs/in.bin"));
        assert_eq!(
            BinaryOptions::default().resolve("in.bin"),
            PathBuf::from("in.bin")
        );
    }
}
