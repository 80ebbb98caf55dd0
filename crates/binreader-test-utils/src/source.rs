// SPDX-FileCopyrightText: 2026 Binreader Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temporary byte sources for reader tests.
//!
//! Helpers panic on I/O failure; they only run inside tests.

use std::cell::Cell;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

/// A file inside its own temporary directory, removed on drop.
pub struct SourceFile {
    dir: TempDir,
    path: PathBuf,
    last_mtime: Cell<SystemTime>,
}

impl SourceFile {
    /// Create `input.bin` holding `bytes`.
    pub fn with_bytes(bytes: &[u8]) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("input.bin");
        std::fs::write(&path, bytes).expect("write source file");
        Self {
            dir,
            path,
            last_mtime: Cell::new(SystemTime::UNIX_EPOCH),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn path_str(&self) -> String {
        self.path.display().to_string()
    }

    /// The directory holding the source.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// A path next to the source that does not exist.
    pub fn missing_path(&self) -> PathBuf {
        self.dir.path().join("missing.bin")
    }

    /// Append bytes at the end of the source.
    pub fn append(&self, bytes: &[u8]) {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .expect("open source for append");
        file.write_all(bytes).expect("append to source");
    }

    /// Replace the whole content and push the modification time forward so
    /// the change is visible even on coarse-grained filesystems.
    pub fn rewrite(&self, bytes: &[u8]) {
        std::fs::write(&self.path, bytes).expect("rewrite source");
        self.bump_mtime();
    }

    /// Shrink the source to `len` bytes.
    pub fn truncate(&self, len: u64) {
        let file = OpenOptions::new()
            .write(true)
            .open(&self.path)
            .expect("open source for truncate");
        file.set_len(len).expect("truncate source");
    }

    /// Move the modification time forward, strictly past any earlier bump.
    pub fn bump_mtime(&self) {
        let file = File::options()
            .write(true)
            .open(&self.path)
            .expect("open source for touch");
        let later = SystemTime::now().max(self.last_mtime.get()) + Duration::from_secs(2);
        file.set_modified(later).expect("set modification time");
        self.last_mtime.set(later);
    }
}
