//! Advisory exclusive lock around one read-resolve-persist pass.
//!
//! Without it, two invocations that overlap both read the old content and the
//! last one to flush silently discards the other's change. The lock is a
//! `flock`-style lock held on a duplicate of the store file handle, so it
//! covers the same open file and is released when the guard drops.

use std::fs::File;
use std::io;

use fs2::FileExt;
use tracing::{trace, warn};

use crate::{StoreError, StoreResult};

/// Guard holding an exclusive advisory lock on the preference file.
#[derive(Debug)]
pub struct ExclusiveLock {
    handle: File,
}

impl ExclusiveLock {
    /// Block until the exclusive lock on `file` is acquired.
    pub fn acquire(file: &File) -> StoreResult<Self> {
        let handle = file.try_clone().map_err(StoreError::Lock)?;
        handle.lock_exclusive().map_err(StoreError::Lock)?;
        trace!("preference file locked");
        Ok(Self { handle })
    }

    /// Acquire the lock without waiting; [`StoreError::Locked`] if it is held elsewhere.
    pub fn try_acquire(file: &File) -> StoreResult<Self> {
        let handle = file.try_clone().map_err(StoreError::Lock)?;
        match handle.try_lock_exclusive() {
            Ok(()) => Ok(Self { handle }),
            Err(err) if is_contended(&err) => Err(StoreError::Locked),
            Err(err) => Err(StoreError::Lock(err)),
        }
    }
}

impl Drop for ExclusiveLock {
    fn drop(&mut self) {
        if let Err(err) = FileExt::unlock(&self.handle) {
            warn!(error = %err, "failed to release preference file lock");
        }
    }
}

fn is_contended(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}
