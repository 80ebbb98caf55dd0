// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the binreader input framework.
//!
//! This crate provides the trait definitions, error types, and common types
//! shared by plugins, reader components, and the host that drives them.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ReaderError;
pub use types::{
    ComponentKind, Field, FieldType, ReaderInfo, ReaderMode, Record, UpdateOutcome, Value,
};

pub use traits::{
    Component, Components, Configuration, InputReader, Plugin, ReaderFactory, RecordSink,
};
