// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in plugin catalog.
//!
//! Plugins are compiled in; there is no discovery of shared objects. The
//! host loads this list explicitly during startup.

use binreader_binary::BinaryReaderPlugin;
use binreader_core::Plugin;

/// Returns every compiled-in plugin, in load order.
///
/// The catalog currently contains a single plugin:
/// - Zeek::BinaryReader (reader tag "Binary")
pub fn builtin_plugins() -> Vec<Box<dyn Plugin>> {
    vec![Box::new(BinaryReaderPlugin)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::PluginManager;

    #[test]
    fn catalog_loads_cleanly() {
        let plugins = builtin_plugins();
        assert_eq!(plugins.len(), 1);

        let mut manager = PluginManager::new();
        manager.load_all(&plugins).unwrap();
        assert_eq!(manager.plugins().len(), 1);
        assert_eq!(manager.plugins()[0].configuration.name, "Zeek::BinaryReader");
        assert_eq!(manager.registry().len(), 1);
    }
}
