// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the binreader input framework.

use thiserror::Error;

/// The primary error type used across reader traits, the component registry,
/// and the plugin manager.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// The byte source could not be opened, stat'ed, or read.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The source content cannot be turned into records.
    #[error("format error: {message}")]
    Format { message: String },

    /// Invalid reader options, schema, or lifecycle misuse at open time.
    #[error("configuration error: {0}")]
    Config(String),

    /// A read or update was attempted on a reader with no bound source.
    #[error("reader is not open")]
    NotOpen,

    /// Requested component tag was not found in the registry.
    #[error("component not found: {tag}")]
    ComponentNotFound { tag: String },

    /// A component tag was registered twice.
    #[error("duplicate component tag: {tag}")]
    DuplicateComponent { tag: String },

    /// A plugin with the same configuration name was already loaded.
    #[error("duplicate plugin name: {name}")]
    DuplicatePlugin { name: String },
}

impl ReaderError {
    /// Wraps an I/O error together with the path it happened on.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        ReaderError::Io {
            path: path.into(),
            source,
        }
    }

    /// Shorthand for a [`ReaderError::Format`].
    pub fn format(message: impl Into<String>) -> Self {
        ReaderError::Format {
            message: message.into(),
        }
    }

    /// True for the IOError kind.
    pub fn is_io(&self) -> bool {
        matches!(self, ReaderError::Io { .. })
    }

    /// True for the FormatError kind.
    pub fn is_format(&self) -> bool {
        matches!(self, ReaderError::Format { .. })
    }
}
