// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manager: the host side of the configure protocol.

use std::collections::HashSet;

use binreader_core::{Components, Configuration, InputReader, Plugin, ReaderError};
use tracing::{debug, info};

use crate::registry::ComponentRegistry;

/// A plugin that has been configured and whose components are registered.
#[derive(Debug, Clone)]
pub struct LoadedPlugin {
    /// Configuration returned by the plugin.
    pub configuration: Configuration,
    /// Tags of the components this plugin contributed, in the order added.
    pub components: Vec<String>,
}

/// Loads plugins and owns the component registry they populate.
#[derive(Debug, Default)]
pub struct PluginManager {
    plugins: Vec<LoadedPlugin>,
    registry: ComponentRegistry,
}

impl PluginManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure `plugin` once and register its components.
    ///
    /// A plugin whose name is already loaded, or that adds a tag already
    /// present in the registry (or twice itself), is rejected as a whole:
    /// none of its components are registered.
    pub fn load(&mut self, plugin: &dyn Plugin) -> Result<&LoadedPlugin, ReaderError> {
        let mut staged = Components::new();
        let configuration = plugin.configure(&mut staged);
        debug!(
            plugin = %configuration.name,
            components = staged.len(),
            "plugin configured"
        );

        if self
            .plugins
            .iter()
            .any(|p| p.configuration.name == configuration.name)
        {
            return Err(ReaderError::DuplicatePlugin {
                name: configuration.name,
            });
        }

        let mut seen = HashSet::new();
        for component in staged.iter() {
            if self.registry.contains(component.tag()) || !seen.insert(component.tag()) {
                return Err(ReaderError::DuplicateComponent {
                    tag: component.tag().to_string(),
                });
            }
        }

        let mut tags = Vec::with_capacity(staged.len());
        for component in staged.into_vec() {
            tags.push(component.tag().to_string());
            self.registry.register(component)?;
        }

        info!(
            plugin = %configuration.name,
            description = %configuration.description,
            components = ?tags,
            "plugin loaded"
        );
        self.plugins.push(LoadedPlugin {
            configuration,
            components: tags,
        });
        let last = self.plugins.len() - 1;
        Ok(&self.plugins[last])
    }

    /// Load every plugin in order, stopping at the first failure.
    pub fn load_all(&mut self, plugins: &[Box<dyn Plugin>]) -> Result<(), ReaderError> {
        for plugin in plugins {
            self.load(plugin.as_ref())?;
        }
        Ok(())
    }

    /// Loaded plugins in load order.
    pub fn plugins(&self) -> &[LoadedPlugin] {
        &self.plugins
    }

    /// Look up a loaded plugin by its configuration name.
    pub fn plugin(&self, name: &str) -> Option<&LoadedPlugin> {
        self.plugins.iter().find(|p| p.configuration.name == name)
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Build a fresh reader registered under `tag`.
    pub fn instantiate(&self, tag: &str) -> Result<Box<dyn InputReader>, ReaderError> {
        self.registry.instantiate(tag)
    }
}
