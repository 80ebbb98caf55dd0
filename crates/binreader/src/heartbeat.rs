// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic refresh of an open reader.
//!
//! Every tick calls [`InputReader::heartbeat`] and drains whatever pass it
//! started into the sink. Reread readers deliver a fresh snapshot when the
//! file changed; stream readers deliver appended chunks.

use std::time::Duration;

use binreader_core::{InputReader, ReaderError, RecordSink, UpdateOutcome};
use binreader_plugin::pump;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Counters reported when the loop stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeartbeatStats {
    /// Ticks that ran.
    pub beats: u64,
    /// Ticks that started a new pass.
    pub refreshes: u64,
    /// Records delivered across all passes.
    pub records: usize,
}

/// Run heartbeats every `period` until `cancel` fires, the reader fails, or
/// the sink stops accepting records.
pub async fn run_heartbeat(
    reader: &mut dyn InputReader,
    sink: &mut dyn RecordSink,
    period: Duration,
    cancel: CancellationToken,
) -> Result<HeartbeatStats, ReaderError> {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut stats = HeartbeatStats::default();

    info!(reader = reader.name(), period_ms = period.as_millis() as u64, "heartbeat started");
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                stats.beats += 1;
                let outcome = reader.heartbeat()?;
                if outcome != UpdateOutcome::Unchanged {
                    stats.refreshes += 1;
                    let delivered = pump(reader, outcome, sink)?;
                    stats.records += delivered;
                    debug!(?outcome, delivered, "heartbeat refreshed reader");
                }
            }
        }
    }
    info!(
        beats = stats.beats,
        refreshes = stats.refreshes,
        records = stats.records,
        "heartbeat stopped"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use binreader_binary::BinaryReader;
    use binreader_core::{Field, FieldType, ReaderInfo, ReaderMode};
    use binreader_test_utils::{CollectingSink, SinkEvent, SourceFile};
    use std::io::{self, Write};
    use tokio::time::sleep;

    use crate::output::PrintSink;

    const PERIOD: Duration = Duration::from_millis(100);

    fn open(source: &SourceFile, mode: ReaderMode) -> BinaryReader {
        let mut reader = BinaryReader::new();
        let info = ReaderInfo::new(
            source.path_str(),
            mode,
            vec![Field::new("chunk", FieldType::String)],
        )
        .with_option("chunk_size", "4");
        reader.open(&info).unwrap();
        reader
    }

    #[tokio::test(start_paused = true)]
    async fn stream_heartbeat_picks_up_appends() {
        let source = SourceFile::with_bytes(b"");
        let mut reader = open(&source, ReaderMode::Stream);
        let mut sink = CollectingSink::new();
        let cancel = CancellationToken::new();

        let driver = run_heartbeat(&mut reader, &mut sink, PERIOD, cancel.clone());
        let script = async {
            sleep(Duration::from_millis(150)).await;
            source.append(b"abcdef");
            sleep(Duration::from_millis(200)).await;
            cancel.cancel();
        };
        let (stats, ()) = tokio::join!(driver, script);
        let stats = stats.unwrap();

        assert!(stats.beats >= 3);
        assert_eq!(stats.refreshes, 1);
        assert_eq!(stats.records, 2);
        assert_eq!(
            sink.events(),
            &[
                SinkEvent::Put(b"abcd".to_vec()),
                SinkEvent::Put(b"ef".to_vec()),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn reread_heartbeat_sends_snapshot_on_change() {
        let source = SourceFile::with_bytes(b"old");
        let mut reader = open(&source, ReaderMode::Reread);
        let mut sink = CollectingSink::new();
        let cancel = CancellationToken::new();

        let driver = run_heartbeat(&mut reader, &mut sink, PERIOD, cancel.clone());
        let script = async {
            sleep(Duration::from_millis(250)).await;
            source.rewrite(b"newer");
            sleep(Duration::from_millis(300)).await;
            cancel.cancel();
        };
        let (stats, ()) = tokio::join!(driver, script);
        let stats = stats.unwrap();

        assert_eq!(stats.refreshes, 1);
        assert_eq!(sink.snapshots(), 1);
        assert_eq!(sink.concatenated(), b"newer");
    }

    #[tokio::test(start_paused = true)]
    async fn manual_heartbeat_never_refreshes() {
        let source = SourceFile::with_bytes(b"data");
        let mut reader = open(&source, ReaderMode::Manual);
        let mut sink = CollectingSink::new();
        let cancel = CancellationToken::new();

        let driver = run_heartbeat(&mut reader, &mut sink, PERIOD, cancel.clone());
        let script = async {
            sleep(Duration::from_millis(350)).await;
            cancel.cancel();
        };
        let (stats, ()) = tokio::join!(driver, script);
        let stats = stats.unwrap();

        assert!(stats.beats >= 3);
        assert_eq!(stats.refreshes, 0);
        assert!(sink.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn reader_failure_stops_the_loop() {
        let source = SourceFile::with_bytes(b"0123456789");
        let mut reader = open(&source, ReaderMode::Stream);
        while reader.read_next().unwrap().is_some() {}
        source.truncate(2);

        let mut sink = CollectingSink::new();
        let err = run_heartbeat(&mut reader, &mut sink, PERIOD, CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.is_format());
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn closed_output_stops_the_loop() {
        let source = SourceFile::with_bytes(b"");
        let mut reader = open(&source, ReaderMode::Stream);
        let mut sink = PrintSink::new(ClosedPipe, false);
        let cancel = CancellationToken::new();

        let driver = run_heartbeat(&mut reader, &mut sink, PERIOD, cancel.clone());
        let script = async {
            for _ in 0..50 {
                source.append(b"more");
                sleep(PERIOD).await;
            }
            cancel.cancel();
        };
        let (result, ()) = tokio::join!(driver, script);

        // Cancellation would have ended the loop with Ok.
        let err = result.unwrap_err();
        assert!(err.is_io());
        assert!(err.to_string().contains("<stdout>"));
    }
}
