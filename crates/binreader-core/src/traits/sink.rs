// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Consumer side of a reader: where records end up.

use crate::error::ReaderError;
use crate::types::Record;

/// Receives the records of each pass.
///
/// Full passes arrive as a snapshot (`entry` per record, then
/// `end_snapshot`); tailing passes arrive record by record through `put`.
pub trait RecordSink {
    /// One record of a snapshot pass.
    fn entry(&mut self, record: Record);

    /// Marks the end of a snapshot; everything not re-sent since the last
    /// snapshot is gone.
    fn end_snapshot(&mut self);

    /// One incrementally appended record.
    fn put(&mut self, record: Record);

    /// Reports a delivery failure since the last call. Producers stop
    /// feeding a sink once this returns an error.
    fn check(&mut self) -> Result<(), ReaderError> {
        Ok(())
    }
}
