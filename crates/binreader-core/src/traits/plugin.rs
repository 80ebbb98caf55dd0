// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The plugin contract between compiled-in plugins and the host.
//!
//! A plugin is configured exactly once by the host. During `configure` it
//! adds its components to the staging [`Components`] set and returns its
//! static [`Configuration`]. Validation of what it added (duplicate tags,
//! duplicate plugin names) is the host's job.

use crate::traits::reader::InputReader;
use crate::types::ComponentKind;

/// Zero-argument constructor producing a fresh reader instance.
pub type ReaderFactory = fn() -> Box<dyn InputReader>;

/// Static metadata a plugin reports to the host at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Unique name within the host's plugin namespace (e.g. "Zeek::BinaryReader").
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Optional plugin version; unset unless a plugin reports one.
    pub version: Option<semver::Version>,
}

impl Configuration {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            version: None,
        }
    }

    /// Attach a version string such as `env!("CARGO_PKG_VERSION")`.
    /// A string that is not valid semver leaves the version unset.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = semver::Version::parse(version).ok();
        self
    }
}

/// A component descriptor: a kind tag bound to a reader factory.
#[derive(Clone)]
pub struct Component {
    tag: String,
    kind: ComponentKind,
    factory: ReaderFactory,
}

impl Component {
    /// Describe a reader component under `tag`.
    pub fn reader(tag: impl Into<String>, factory: ReaderFactory) -> Self {
        Self {
            tag: tag.into(),
            kind: ComponentKind::Reader,
            factory,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Build a new, independent instance.
    pub fn instantiate(&self) -> Box<dyn InputReader> {
        (self.factory)()
    }
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("tag", &self.tag)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Components a plugin adds during `configure`, in insertion order.
#[derive(Debug, Default)]
pub struct Components {
    added: Vec<Component>,
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component. Duplicate tags are accepted here and rejected by the host.
    pub fn add(&mut self, component: Component) {
        self.added.push(component);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.added.iter()
    }

    pub fn len(&self) -> usize {
        self.added.len()
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
    }

    pub fn into_vec(self) -> Vec<Component> {
        self.added
    }
}

/// A compiled-in plugin.
///
/// The host calls [`Plugin::configure`] exactly once per load.
pub trait Plugin: Send + Sync {
    /// Register this plugin's components and report its configuration.
    fn configure(&self, components: &mut Components) -> Configuration;
}
