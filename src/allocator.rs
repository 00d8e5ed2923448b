//! Series id allocator
//!
//! A single persisted counter holds the next id available for a recurring
//! series. It starts at [`DEFAULT_SERIES_ID`] and only ever moves forward.
//! Every access holds the counter lock, so `allocate` is one critical
//! section covering read, increment and write.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::codec;
use crate::error::{Error, Result};
use crate::lock::{self, FileLock};
use crate::task::{DEFAULT_SERIES_ID, ONE_OFF_POOL_MAX};

/// Persisted "next available series id" counter
#[derive(Debug, Clone)]
pub struct SeriesAllocator {
    path: PathBuf,
    lock_path: PathBuf,
    lock_timeout_ms: u64,
}

impl SeriesAllocator {
    pub fn new(path: PathBuf, lock_path: PathBuf, lock_timeout_ms: u64) -> Self {
        Self {
            path,
            lock_path,
            lock_timeout_ms,
        }
    }

    /// Next id that `allocate` would issue
    ///
    /// Creates the counter file with its default on first access.
    pub fn current(&self) -> Result<u32> {
        let _lock = self.lock()?;
        self.read_or_init()
    }

    /// Move the counter to `value`
    ///
    /// Fails with [`Error::CounterRegression`] if `value` is below the
    /// current counter.
    pub fn set_current(&self, value: u32) -> Result<()> {
        let _lock = self.lock()?;
        let current = self.read_or_init()?;
        if value < current {
            return Err(Error::CounterRegression {
                current,
                requested: value,
            });
        }
        self.write(value)
    }

    /// Issue a fresh series id and advance the counter by one
    pub fn allocate(&self) -> Result<u32> {
        let _lock = self.lock()?;
        let id = self.read_or_init()?;
        let next = id.checked_add(1).ok_or_else(|| {
            Error::InvalidArgument("series id space exhausted".to_string())
        })?;
        self.write(next)?;
        info!(series_id = id, next, "Allocated series id");
        Ok(id)
    }

    fn lock(&self) -> Result<FileLock> {
        FileLock::acquire(&self.lock_path, self.lock_timeout_ms)
    }

    fn read_or_init(&self) -> Result<u32> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Initialising series counter");
                self.write(DEFAULT_SERIES_ID)?;
                return Ok(DEFAULT_SERIES_ID);
            }
            Err(err) => return Err(Error::Io(err)),
        };

        let value = codec::decode_counter(&bytes, &self.path)?;
        if value <= ONE_OFF_POOL_MAX {
            return Err(Error::CorruptStore {
                path: self.path.clone(),
                reason: format!("series counter {value} overlaps the one-off id pool"),
            });
        }
        Ok(value)
    }

    fn write(&self, value: u32) -> Result<()> {
        let content = codec::encode_counter(value)?;
        lock::write_atomic(&self.path, content.as_bytes())
    }
}
