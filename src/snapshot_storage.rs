//! Byte-level backends holding one collection snapshot each.
//!
//! A backend knows nothing about records: it reads and replaces the whole
//! serialized collection. [`JsonFileStorage`] is the durable backend;
//! [`MemoryStorage`] stands in for it in tests and embedded use.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use log::debug;
use tempfile::NamedTempFile;

/// Storage for a single serialized collection.
///
/// Implementations must make one `write_snapshot` call all-or-nothing, but are
/// not required to serialize concurrent writers against each other.
pub trait SnapshotStorage: Send + Sync {
    fn read_snapshot(&self) -> io::Result<Vec<u8>>;

    fn write_snapshot(&self, bytes: &[u8]) -> io::Result<()>;

    /// Where the snapshot lives, for log messages.
    fn location(&self) -> String;
}

/// A collection backed by one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl SnapshotStorage for JsonFileStorage {
    fn read_snapshot(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }

    fn write_snapshot(&self, bytes: &[u8]) -> io::Result<()> {
        // Each write gets its own temp file beside the target, renamed over it
        // once complete. A dropped temp file is removed.
        let mut temp = NamedTempFile::new_in(self.parent_dir())?;
        temp.write_all(bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|err| err.error)?;
        debug!("Wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// A collection held in process memory.
///
/// Starts out with no snapshot, so the first read fails the way a missing
/// file does.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    bytes: Mutex<Option<Vec<u8>>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Mutex::new(Some(bytes.into())),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent write fail with a permission error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of bytes currently stored, if any snapshot exists.
    pub fn snapshot_len(&self) -> Option<usize> {
        self.bytes.lock().ok().and_then(|guard| guard.as_ref().map(Vec::len))
    }
}

impl SnapshotStorage for MemoryStorage {
    fn read_snapshot(&self) -> io::Result<Vec<u8>> {
        let guard = self
            .bytes
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory snapshot lock poisoned"))?;
        guard
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no snapshot written yet"))
    }

    fn write_snapshot(&self, bytes: &[u8]) -> io::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "simulated write failure"));
        }
        let mut guard = self
            .bytes
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory snapshot lock poisoned"))?;
        *guard = Some(bytes.to_vec());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
