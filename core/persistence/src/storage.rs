//! FILENAME: core/persistence/src/storage.rs
//! PURPOSE: Where the dataset bytes live.
//! CONTEXT: The initializer only talks to `DatasetStorage`, so tests can swap
//! the filesystem for an in-memory buffer or a store whose writes fail.

use crate::{read_dataset, to_csv_bytes, PersistenceError};
use engine::Dataset;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

const LOCK_RETRIES: usize = 20;
const LOCK_RETRY_SLEEP: Duration = Duration::from_millis(50);

/// Distinguishes temporary files of concurrent writers in one process.
static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

// ============================================================================
// STORAGE TRAIT
// ============================================================================

pub trait DatasetStorage {
    /// Human-readable location used in log messages.
    fn location(&self) -> String;

    fn exists(&self) -> bool;

    fn read(&self) -> Result<Dataset, PersistenceError>;

    fn write(&self, dataset: &Dataset) -> Result<(), PersistenceError>;

    /// Serializes concurrent initializers. The default store needs no lock.
    fn lock(&self) -> Result<StorageLock, PersistenceError> {
        Ok(StorageLock::none())
    }
}

/// Held for the duration of an initialization; released on drop.
#[derive(Debug)]
pub struct StorageLock {
    file: Option<File>,
}

impl StorageLock {
    pub fn none() -> Self {
        StorageLock { file: None }
    }

    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }
}

impl Drop for StorageLock {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            if let Err(e) = FileExt::unlock(&file) {
                log::warn!("failed to release dataset lock: {}", e);
            }
        }
    }
}

// ============================================================================
// FILE STORAGE
// ============================================================================

/// A CSV file on disk, guarded by an advisory lock on `<path>.lock`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    }

    fn ensure_parent(&self) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl DatasetStorage for FileStorage {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn read(&self) -> Result<Dataset, PersistenceError> {
        read_dataset(File::open(&self.path)?)
    }

    /// Writes to a temporary sibling and renames it into place, so readers
    /// never observe a partially written file. The temporary file is removed
    /// when any step fails.
    fn write(&self, dataset: &Dataset) -> Result<(), PersistenceError> {
        self.ensure_parent()?;
        let bytes = to_csv_bytes(dataset)?;

        let tmp_path = self.sibling(&format!(
            ".{}.{}.tmp",
            std::process::id(),
            TMP_SEQ.fetch_add(1, Ordering::SeqCst)
        ));
        let result = File::create(&tmp_path)
            .and_then(|mut tmp| {
                tmp.write_all(&bytes)?;
                tmp.sync_all()
            })
            .and_then(|()| fs::rename(&tmp_path, &self.path));

        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }

    /// Takes the advisory lock, retrying for a bounded time. Never blocks
    /// indefinitely: a lock held elsewhere yields `LockUnavailable`.
    fn lock(&self) -> Result<StorageLock, PersistenceError> {
        self.ensure_parent()?;
        let lock_path = self.sibling(".lock");
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        for _ in 0..LOCK_RETRIES {
            match file.try_lock_exclusive() {
                Ok(()) => return Ok(StorageLock { file: Some(file) }),
                Err(_) => thread::sleep(LOCK_RETRY_SLEEP),
            }
        }

        Err(PersistenceError::LockUnavailable(lock_path.display().to_string()))
    }
}

// ============================================================================
// MEMORY STORAGE
// ============================================================================

/// Keeps the CSV bytes in memory. `failing_writes` simulates a read-only store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    bytes: Mutex<Option<Vec<u8>>>,
    failing_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        MemoryStorage {
            bytes: Mutex::new(Some(bytes)),
            failing_writes: false,
        }
    }

    pub fn failing_writes() -> Self {
        MemoryStorage {
            bytes: Mutex::new(None),
            failing_writes: true,
        }
    }

    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.bytes.lock().ok().and_then(|guard| guard.clone())
    }
}

impl DatasetStorage for MemoryStorage {
    fn location(&self) -> String {
        "<memory>".to_string()
    }

    fn exists(&self) -> bool {
        self.bytes().is_some()
    }

    fn read(&self) -> Result<Dataset, PersistenceError> {
        let bytes = self.bytes().ok_or_else(|| {
            PersistenceError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no dataset stored",
            ))
        })?;
        read_dataset(bytes.as_slice())
    }

    fn write(&self, dataset: &Dataset) -> Result<(), PersistenceError> {
        if self.failing_writes {
            return Err(PersistenceError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "storage is read-only",
            )));
        }
        let bytes = to_csv_bytes(dataset)?;
        let mut guard = self.bytes.lock().map_err(|_| {
            PersistenceError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "memory storage poisoned",
            ))
        })?;
        *guard = Some(bytes);
        Ok(())
    }
}
