// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host side of the plugin contract.
//!
//! Plugins are compiled in and handed to a [`PluginManager`], which calls
//! their `configure` once, merges the components they add into a
//! [`ComponentRegistry`], and keeps their reported configuration. Readers
//! are then instantiated by tag and drained into a sink with [`pump`].

pub mod catalog;
pub mod manager;
pub mod pump;
pub mod registry;

pub use catalog::builtin_plugins;
pub use manager::{LoadedPlugin, PluginManager};
pub use pump::pump;
pub use registry::ComponentRegistry;
