// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by readers, the component registry, and the host.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How a reader treats its source after the first pass.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReaderMode {
    /// Read once; every explicit update rereads the whole source.
    #[default]
    Manual,
    /// Reread the whole source whenever it changes on disk.
    Reread,
    /// Tail the source, delivering only bytes appended since the last pass.
    Stream,
}

/// Identifies the kind of component in the component registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum ComponentKind {
    /// An input reader producing records from a byte source.
    Reader,
}

/// Type of a single field in a reader's record schema.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Count,
    Int,
    Bool,
}

/// A named, typed column in the record schema requested by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A single typed value in a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Raw bytes; not required to be valid UTF-8.
    String(Vec<u8>),
    Count(u64),
    Int(i64),
    Bool(bool),
}

impl Value {
    /// The schema type this value satisfies.
    pub fn field_type(&self) -> FieldType {
        match self {
            Value::String(_) => FieldType::String,
            Value::Count(_) => FieldType::Count,
            Value::Int(_) => FieldType::Int,
            Value::Bool(_) => FieldType::Bool,
        }
    }

    /// Returns the bytes of a string value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(bytes) => Some(bytes),
            _ => None,
        }
    }
}

/// One row produced by a reader, ordered like the requested fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub values: Vec<Value>,
}

impl Record {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Returns the bytes of the first value if it is a string.
    pub fn first_bytes(&self) -> Option<&[u8]> {
        self.values.first().and_then(Value::as_bytes)
    }
}

/// Everything a reader needs to bind itself to a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderInfo {
    /// Source location, usually a file path.
    pub source: String,
    pub mode: ReaderMode,
    /// Schema the host expects each record to follow.
    pub fields: Vec<Field>,
    /// Per-stream reader options (e.g. `chunk_size`), overriding reader defaults.
    pub options: BTreeMap<String, String>,
}

impl ReaderInfo {
    pub fn new(source: impl Into<String>, mode: ReaderMode, fields: Vec<Field>) -> Self {
        Self {
            source: source.into(),
            mode,
            fields,
            options: BTreeMap::new(),
        }
    }

    /// Builder-style option setter.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// What an update did to the reader's position, and so how the records of
/// the new pass must be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Nothing new to read.
    Unchanged,
    /// A full pass from the start; replaces everything delivered before.
    Snapshot,
    /// Only data appended since the previous pass.
    Append,
}

impl UpdateOutcome {
    /// Delivery semantics of the first pass right after `open`.
    pub fn initial(mode: ReaderMode) -> Self {
        match mode {
            ReaderMode::Manual | ReaderMode::Reread => UpdateOutcome::Snapshot,
            ReaderMode::Stream => UpdateOutcome::Append,
        }
    }
}
