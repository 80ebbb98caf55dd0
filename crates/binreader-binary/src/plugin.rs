// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registration of the Binary reader with the host.

use binreader_core::{Component, Components, Configuration, Plugin};

use crate::reader::BinaryReader;

/// Tag the reader is registered under.
pub const READER_TAG: &str = "Binary";

/// Plugin name in the host's namespace.
pub const PLUGIN_NAME: &str = "Zeek::BinaryReader";

pub const PLUGIN_DESCRIPTION: &str = "Binary input reader";

/// Plugin exposing [`BinaryReader`] under the "Binary" tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryReaderPlugin;

impl Plugin for BinaryReaderPlugin {
    fn configure(&self, components: &mut Components) -> Configuration {
        components.add(Component::reader(READER_TAG, BinaryReader::instantiate));
        Configuration::new(PLUGIN_NAME, PLUGIN_DESCRIPTION)
            .with_version(env!("CARGO_PKG_VERSION"))
    }
}
