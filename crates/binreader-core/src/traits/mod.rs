// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions at the seams between plugins, readers, and the host.

pub mod plugin;
pub mod reader;
pub mod sink;

pub use plugin::{Component, Components, Configuration, Plugin, ReaderFactory};
pub use reader::InputReader;
pub use sink::RecordSink;
