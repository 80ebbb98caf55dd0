// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component registry mapping reader tags to factories.
//!
//! The `ComponentRegistry` stores `Component` descriptors keyed by tag. A
//! tag can be registered at most once.

use std::collections::HashMap;

use binreader_core::{Component, ComponentKind, InputReader, ReaderError};

/// The host's table of registered components.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    entries: HashMap<String, Component>,
}

impl ComponentRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a component. Fails if the tag is already taken.
    pub fn register(&mut self, component: Component) -> Result<(), ReaderError> {
        if self.entries.contains_key(component.tag()) {
            return Err(ReaderError::DuplicateComponent {
                tag: component.tag().to_string(),
            });
        }
        self.entries.insert(component.tag().to_string(), component);
        Ok(())
    }

    /// True if `tag` is registered.
    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Get a component by tag.
    pub fn get(&self, tag: &str) -> Option<&Component> {
        self.entries.get(tag)
    }

    /// All components of the given kind, sorted by tag.
    pub fn get_by_kind(&self, kind: ComponentKind) -> Vec<&Component> {
        let mut matching: Vec<&Component> = self
            .entries
            .values()
            .filter(|c| c.kind() == kind)
            .collect();
        matching.sort_by(|a, b| a.tag().cmp(b.tag()));
        matching
    }

    /// List all components, sorted by tag.
    pub fn list_all(&self) -> Vec<&Component> {
        let mut entries: Vec<&Component> = self.entries.values().collect();
        entries.sort_by(|a, b| a.tag().cmp(b.tag()));
        entries
    }

    /// Build a fresh reader from the factory registered under `tag`.
    pub fn instantiate(&self, tag: &str) -> Result<Box<dyn InputReader>, ReaderError> {
        self.get(tag)
            .map(Component::instantiate)
            .ok_or_else(|| ReaderError::ComponentNotFound {
                tag: tag.to_string(),
            })
    }

    /// Returns the number of registered components.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no components are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
