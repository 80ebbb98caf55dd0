// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record sink that remembers everything it was sent.

use binreader_core::{Record, RecordSink};

/// One call made on a [`CollectingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    /// Snapshot entry; holds the record's first string value.
    Entry(Vec<u8>),
    EndSnapshot,
    /// Incremental record; holds the record's first string value.
    Put(Vec<u8>),
}

/// Captures sink calls in order and tracks the current table contents.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Vec<SinkEvent>,
    pending: Vec<Vec<u8>>,
    table: Vec<Vec<u8>>,
    snapshots: usize,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call received, in order.
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Records currently visible to a consumer: the last completed
    /// snapshot followed by everything put since.
    pub fn table(&self) -> &[Vec<u8>] {
        &self.table
    }

    /// The visible records concatenated back into one byte string.
    pub fn concatenated(&self) -> Vec<u8> {
        self.table.concat()
    }

    /// Number of completed snapshots.
    pub fn snapshots(&self) -> usize {
        self.snapshots
    }
}

fn bytes_of(record: &Record) -> Vec<u8> {
    record.first_bytes().map(<[u8]>::to_vec).unwrap_or_default()
}

impl RecordSink for CollectingSink {
    fn entry(&mut self, record: Record) {
        let bytes = bytes_of(&record);
        self.pending.push(bytes.clone());
        self.events.push(SinkEvent::Entry(bytes));
    }

    fn end_snapshot(&mut self) {
        self.table = std::mem::take(&mut self.pending);
        self.snapshots += 1;
        self.events.push(SinkEvent::EndSnapshot);
    }

    fn put(&mut self, record: Record) {
        let bytes = bytes_of(&record);
        self.table.push(bytes.clone());
        self.events.push(SinkEvent::Put(bytes));
    }
}
