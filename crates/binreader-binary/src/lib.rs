// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The "Binary" input reader and the plugin that registers it.
//!
//! The reader hands out the raw bytes of a file as a sequence of records,
//! each holding one string field of at most `chunk_size` bytes. The bytes
//! are not interpreted: no framing, endianness, or checksums.

pub mod options;
pub mod plugin;
pub mod reader;

pub use options::{BinaryOptions, DEFAULT_CHUNK_SIZE};
pub use plugin::{BinaryReaderPlugin, PLUGIN_DESCRIPTION, PLUGIN_NAME, READER_TAG};
pub use reader::BinaryReader;
