//! Rewriting the backing file to match the store.
//!
//! The file is overwritten in place from offset 0 and only then truncated to
//! the new length. Truncating first would leave an empty file behind if the
//! process died between the two steps; truncating afterwards keeps a shorter
//! rewrite from leaving stale bytes of the old content at the end.

use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

use tracing::debug;

use crate::{PreferenceStore, StoreError, StoreResult};

/// A read-write handle the preference file can be loaded from and flushed to.
pub trait StoreFile: Read + Write + Seek {
    /// Cut (or extend) the underlying storage to exactly `len` bytes.
    fn truncate_to(&mut self, len: u64) -> io::Result<()>;

    /// Push written bytes down to durable storage. No-op by default.
    fn sync_contents(&mut self) -> io::Result<()> { Ok(()) }
}

impl StoreFile for File {
    fn truncate_to(&mut self, len: u64) -> io::Result<()> { self.set_len(len) }

    fn sync_contents(&mut self) -> io::Result<()> { self.sync_data() }
}

impl StoreFile for Cursor<Vec<u8>> {
    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        let len = usize::try_from(len).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        self.get_mut().resize(len, 0);
        Ok(())
    }
}

/// Overwrite `file` so it holds exactly the serialized `store`.
///
/// Seek to start, write everything, flush, sync, then truncate to the written
/// length. Any failure is returned as [`StoreError::PersistenceFailed`]; the
/// file may then be partially written and `store` is left as it is.
pub fn flush<F: StoreFile + ?Sized>(file: &mut F, store: &PreferenceStore) -> StoreResult<()> {
    let text = store.to_text();
    write_then_truncate(file, text.as_bytes()).map_err(StoreError::PersistenceFailed)?;
    debug!(bytes = text.len(), entries = store.len(), "preference file flushed");
    Ok(())
}

fn write_then_truncate<F: StoreFile + ?Sized>(file: &mut F, bytes: &[u8]) -> io::Result<()> {
    file.seek(SeekFrom::Start(0))?;
    file.write_all(bytes)?;
    file.flush()?;
    file.sync_contents()?;
    file.truncate_to(bytes.len() as u64)
}
