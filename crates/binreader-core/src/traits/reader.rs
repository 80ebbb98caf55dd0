// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Input reader trait implemented by every reader component.

use crate::error::ReaderError;
use crate::types::{Record, ReaderInfo, UpdateOutcome};

/// A reader bound to one byte source at a time.
///
/// Lifecycle is `open -> read_next* -> close`, driven by the host. A pass is
/// the finite run of `read_next` calls until it returns `Ok(None)`; `open`
/// starts the first pass and `update` may start further ones depending on
/// the reader mode.
///
/// Readers are used by one consumer at a time and hold no internal locks.
pub trait InputReader: Send {
    /// Short tag of the reader implementation (e.g. "Binary").
    fn name(&self) -> &str;

    /// Bind the reader to `info.source` and start the first pass.
    fn open(&mut self, info: &ReaderInfo) -> Result<(), ReaderError>;

    /// Next record of the current pass, or `None` at end of source.
    fn read_next(&mut self) -> Result<Option<Record>, ReaderError>;

    /// Re-examine the source and start a new pass if the mode calls for one.
    fn update(&mut self) -> Result<UpdateOutcome, ReaderError>;

    /// Periodic tick from the host. Readers that never refresh on their own
    /// return [`UpdateOutcome::Unchanged`].
    fn heartbeat(&mut self) -> Result<UpdateOutcome, ReaderError>;

    /// Release the byte source. Calling it more than once is a no-op.
    fn close(&mut self) -> Result<(), ReaderError>;

    /// True while a source is bound.
    fn is_open(&self) -> bool;
}
