// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text rendering of records for the `read` command.

use std::io::{self, Write};

use binreader_core::{ReaderError, Record, RecordSink, Value};

/// Name used for write errors in [`ReaderError::Io`].
pub const OUTPUT_NAME: &str = "<stdout>";

/// Writes one line per record: `<index>\t<kind>\t<len>[\t<hex>]`.
///
/// The index restarts at zero for every snapshot. After the first write
/// error nothing more is written. The error is handed out once, by
/// [`RecordSink::check`] or by [`PrintSink::finish`].
pub struct PrintSink<W: Write> {
    out: W,
    hex: bool,
    index: usize,
    failed: bool,
    error: Option<io::Error>,
}

impl<W: Write> PrintSink<W> {
    pub fn new(out: W, hex: bool) -> Self {
        Self {
            out,
            hex,
            index: 0,
            failed: false,
            error: None,
        }
    }

    /// Flush and report the first write error, if any.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn fail(&mut self, e: io::Error) {
        self.failed = true;
        self.error = Some(e);
    }

    fn line(&mut self, kind: &str, record: &Record) {
        if self.failed {
            return;
        }
        let mut text = format!("{}\t{kind}", self.index);
        for value in &record.values {
            match value {
                Value::String(bytes) if self.hex => {
                    text.push_str(&format!("\t{}\t{}", bytes.len(), hex::encode(bytes)));
                }
                Value::String(bytes) => text.push_str(&format!("\t{}", bytes.len())),
                Value::Count(n) => text.push_str(&format!("\t{n}")),
                Value::Int(n) => text.push_str(&format!("\t{n}")),
                Value::Bool(b) => text.push_str(&format!("\t{b}")),
            }
        }
        self.index += 1;
        if let Err(e) = writeln!(self.out, "{text}") {
            self.fail(e);
        }
    }
}

impl<W: Write> RecordSink for PrintSink<W> {
    fn entry(&mut self, record: Record) {
        self.line("entry", &record);
    }

    fn end_snapshot(&mut self) {
        if !self.failed {
            if let Err(e) = writeln!(self.out, "# end of snapshot ({} records)", self.index) {
                self.fail(e);
            }
        }
        self.index = 0;
    }

    fn put(&mut self, record: Record) {
        self.line("put", &record);
    }

    fn check(&mut self) -> Result<(), ReaderError> {
        match self.error.take() {
            Some(e) => Err(ReaderError::io(OUTPUT_NAME, e)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(bytes: &[u8]) -> Record {
        Record::new(vec![Value::String(bytes.to_vec())])
    }

    fn rendered(sink: PrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.finish().unwrap()).unwrap()
    }

    #[test]
    fn snapshot_lines_and_footer() {
        let mut sink = PrintSink::new(Vec::new(), false);
        sink.entry(chunk(b"abcd"));
        sink.entry(chunk(b"ef"));
        sink.end_snapshot();
        sink.entry(chunk(b"g"));
        assert_eq!(
            rendered(sink),
            "0\tentry\t4\n1\tentry\t2\n# end of snapshot (2 records)\n0\tentry\t1\n"
        );
    }

    #[test]
    fn hex_output() {
        let mut sink = PrintSink::new(Vec::new(), true);
        sink.put(chunk(&[0x00, 0xff, 0x10]));
        assert_eq!(rendered(sink), "0\tput\t3\t00ff10\n");
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_surface_on_finish() {
        let mut sink = PrintSink::new(Broken, false);
        sink.put(chunk(b"x"));
        sink.put(chunk(b"y"));
        let err = sink.finish().err().unwrap();
        assert_eq!(err.to_string(), "pipe closed");
    }

    #[test]
    fn check_reports_the_write_error_once() {
        let mut sink = PrintSink::new(Broken, false);
        sink.check().unwrap();
        sink.put(chunk(b"x"));
        let err = sink.check().unwrap_err();
        assert!(err.is_io());
        assert!(err.to_string().contains("pipe closed"));

        sink.put(chunk(b"y"));
        sink.check().unwrap();
        assert!(sink.finish().is_ok());
    }
}
