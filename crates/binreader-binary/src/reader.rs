// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Binary reader.
//!
//! A pass reads the file from the current offset to end of file in
//! `chunk_size` pieces. What starts a new pass depends on the mode:
//!
//! - **manual**: every `update` reopens the file and rereads it from the start.
//! - **reread**: `update` reopens and rereads only when the file's
//!   modification time or length changed.
//! - **stream**: `update` keeps the open handle and continues from where the
//!   last pass stopped, so only appended bytes are delivered.

use std::fs::{File, Metadata};
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use binreader_core::{
    Field, FieldType, InputReader, ReaderError, ReaderInfo, ReaderMode, Record, UpdateOutcome,
    Value,
};
use tracing::{debug, info};

use crate::options::BinaryOptions;

/// Most bytes reserved before a chunk is read.
const PREALLOC_LIMIT: usize = 64 * 1024;
use crate::plugin::READER_TAG;

/// Reads raw chunks of a file as single-field string records.
#[derive(Debug, Default)]
pub struct BinaryReader {
    defaults: BinaryOptions,
    source: Option<OpenSource>,
}

/// State of a bound source. Dropping it closes the file.
#[derive(Debug)]
struct OpenSource {
    path: PathBuf,
    mode: ReaderMode,
    chunk_size: usize,
    file: File,
    /// Bytes consumed from `file` so far.
    position: u64,
    /// Fingerprint taken when the file was last (re)opened.
    stamp: Stamp,
}

/// What reread mode compares to decide whether the file changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stamp {
    modified: Option<SystemTime>,
    len: u64,
}

impl Stamp {
    fn of(metadata: &Metadata) -> Self {
        Self {
            modified: metadata.modified().ok(),
            len: metadata.len(),
        }
    }
}

impl BinaryReader {
    /// A closed reader using the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// A closed reader whose defaults come from host configuration.
    /// Per-stream options given to `open` still take precedence.
    pub fn with_defaults(defaults: BinaryOptions) -> Self {
        Self {
            defaults,
            source: None,
        }
    }

    /// Factory registered with the host.
    pub fn instantiate() -> Box<dyn InputReader> {
        Box::new(Self::new())
    }

    /// Chunk size of the bound source.
    pub fn chunk_size(&self) -> Option<usize> {
        self.source.as_ref().map(|s| s.chunk_size)
    }

    /// Resolved path of the bound source.
    pub fn path(&self) -> Option<&Path> {
        self.source.as_ref().map(|s| s.path.as_path())
    }

    fn source_mut(&mut self) -> Result<&mut OpenSource, ReaderError> {
        self.source.as_mut().ok_or(ReaderError::NotOpen)
    }
}

/// The reader delivers exactly one string column.
fn check_schema(fields: &[Field]) -> Result<(), ReaderError> {
    match fields {
        [field] if field.ty == FieldType::String => Ok(()),
        [field] => Err(ReaderError::Config(format!(
            "field `{}` has type {}; the binary reader only produces string fields",
            field.name, field.ty
        ))),
        _ => Err(ReaderError::Config(format!(
            "the binary reader needs exactly one string field, got {}",
            fields.len()
        ))),
    }
}

fn open_file(path: &Path) -> Result<(File, Metadata), ReaderError> {
    let display = path.display().to_string();
    let file = File::open(path).map_err(|e| ReaderError::io(&display, e))?;
    let metadata = file.metadata().map_err(|e| ReaderError::io(&display, e))?;
    if !metadata.is_file() {
        return Err(ReaderError::io(
            display,
            std::io::Error::new(ErrorKind::InvalidInput, "not a regular file"),
        ));
    }
    Ok((file, metadata))
}

impl OpenSource {
    fn display(&self) -> String {
        self.path.display().to_string()
    }

    /// Reopen the path from the start; picks up replaced files too.
    fn reopen(&mut self) -> Result<(), ReaderError> {
        let (file, metadata) = open_file(&self.path)?;
        self.file = file;
        self.position = 0;
        self.stamp = Stamp::of(&metadata);
        Ok(())
    }

    fn current_len(&self) -> Result<u64, ReaderError> {
        self.file
            .metadata()
            .map(|m| m.len())
            .map_err(|e| ReaderError::io(self.display(), e))
    }

    fn truncated(&self, len: u64) -> ReaderError {
        ReaderError::format(format!(
            "source {} truncated to {len} bytes after {} bytes were read",
            self.display(),
            self.position
        ))
    }

    /// Read up to one chunk. Short only at end of file. The buffer grows
    /// with the bytes read, so a large `chunk_size` costs nothing up front.
    fn read_chunk(&mut self) -> Result<Vec<u8>, ReaderError> {
        let limit = u64::try_from(self.chunk_size).unwrap_or(u64::MAX);
        let mut buf = Vec::with_capacity(self.chunk_size.min(PREALLOC_LIMIT));
        let read = (&mut self.file).take(limit).read_to_end(&mut buf);
        read.map_err(|e| ReaderError::io(self.display(), e))?;
        Ok(buf)
    }
}

impl InputReader for BinaryReader {
    fn name(&self) -> &str {
        READER_TAG
    }

    fn open(&mut self, info: &ReaderInfo) -> Result<(), ReaderError> {
        if let Some(source) = &self.source {
            return Err(ReaderError::Config(format!(
                "reader is already open on {}",
                source.display()
            )));
        }
        check_schema(&info.fields)?;
        let options = self.defaults.merged(&info.options)?;
        let path = options.resolve(&info.source);
        let (file, metadata) = open_file(&path)?;

        info!(
            source = %path.display(),
            mode = %info.mode,
            chunk_size = options.chunk_size,
            len = metadata.len(),
            "binary reader opened"
        );
        self.source = Some(OpenSource {
            path,
            mode: info.mode,
            chunk_size: options.chunk_size,
            file,
            position: 0,
            stamp: Stamp::of(&metadata),
        });
        Ok(())
    }

    fn read_next(&mut self) -> Result<Option<Record>, ReaderError> {
        let source = self.source_mut()?;
        let chunk = source.read_chunk()?;
        if chunk.is_empty() {
            let len = source.current_len()?;
            if len < source.position {
                return Err(source.truncated(len));
            }
            return Ok(None);
        }
        source.position += chunk.len() as u64;
        Ok(Some(Record::new(vec![Value::String(chunk)])))
    }

    fn update(&mut self) -> Result<UpdateOutcome, ReaderError> {
        let source = self.source_mut()?;
        let outcome = match source.mode {
            ReaderMode::Manual => {
                source.reopen()?;
                UpdateOutcome::Snapshot
            }
            ReaderMode::Reread => {
                let metadata = std::fs::metadata(&source.path)
                    .map_err(|e| ReaderError::io(source.display(), e))?;
                if Stamp::of(&metadata) == source.stamp {
                    UpdateOutcome::Unchanged
                } else {
                    source.reopen()?;
                    UpdateOutcome::Snapshot
                }
            }
            ReaderMode::Stream => {
                let len = source.current_len()?;
                if len < source.position {
                    return Err(source.truncated(len));
                }
                if len > source.position {
                    UpdateOutcome::Append
                } else {
                    UpdateOutcome::Unchanged
                }
            }
        };
        debug!(
            source = %source.path.display(),
            mode = %source.mode,
            ?outcome,
            "binary reader updated"
        );
        Ok(outcome)
    }

    fn heartbeat(&mut self) -> Result<UpdateOutcome, ReaderError> {
        let mode = self.source_mut()?.mode;
        match mode {
            ReaderMode::Manual => Ok(UpdateOutcome::Unchanged),
            ReaderMode::Reread | ReaderMode::Stream => self.update(),
        }
    }

    fn close(&mut self) -> Result<(), ReaderError> {
        if let Some(source) = self.source.take() {
            debug!(
                source = %source.path.display(),
                bytes_read = source.position,
                "binary reader closed"
            );
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.source.is_some()
    }
}
