// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for binreader integration tests.
//!
//! # Components
//!
//! - [`CollectingSink`] - Record sink that captures every delivery event
//! - [`SourceFile`] - Temporary on-disk byte source that tests can grow,
//!   rewrite, and truncate

pub mod sink;
pub mod source;

pub use sink::{CollectingSink, SinkEvent};
pub use source::SourceFile;
