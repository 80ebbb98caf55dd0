// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Moves the records of one pass from a reader into a sink.

use binreader_core::{InputReader, ReaderError, RecordSink, UpdateOutcome};
use tracing::debug;

/// Drain the current pass of `reader` into `sink`.
///
/// `outcome` is what `open` (via [`UpdateOutcome::initial`]), `update`, or
/// `heartbeat` reported for the pass. Returns the number of records
/// delivered. On error the records delivered so far stay delivered, and a
/// snapshot is left unterminated. A sink that fails [`RecordSink::check`]
/// ends the pass with that error.
pub fn pump(
    reader: &mut dyn InputReader,
    outcome: UpdateOutcome,
    sink: &mut dyn RecordSink,
) -> Result<usize, ReaderError> {
    let mut delivered = 0;
    match outcome {
        UpdateOutcome::Unchanged => {}
        UpdateOutcome::Snapshot => {
            while let Some(record) = reader.read_next()? {
                sink.entry(record);
                sink.check()?;
                delivered += 1;
            }
            sink.end_snapshot();
            sink.check()?;
        }
        UpdateOutcome::Append => {
            while let Some(record) = reader.read_next()? {
                sink.put(record);
                sink.check()?;
                delivered += 1;
            }
        }
    }
    debug!(reader = reader.name(), ?outcome, delivered, "pass drained");
    Ok(delivered)
}
