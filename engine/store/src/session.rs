//! One invocation's pass over the preference file.
//!
//! Every function here reads the whole file from offset 0, parses it into a
//! fresh [`PreferenceStore`], applies at most one change and flushes only if
//! something changed. The caller decides whether to hold an
//! [`ExclusiveLock`](crate::ExclusiveLock) for the duration.

use std::io::SeekFrom;

use tracing::{debug, info};
use types::Association;

use crate::{flush, resolve, PreferenceStore, StoreError, StoreFile, StoreResult};

/// Read and parse the current content of `file`.
pub fn load<F: StoreFile + ?Sized>(file: &mut F) -> StoreResult<PreferenceStore> {
    file.seek(SeekFrom::Start(0)).map_err(StoreError::Read)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(StoreError::Read)?;
    let store = PreferenceStore::from_bytes(&bytes);
    debug!(bytes = bytes.len(), entries = store.len(), "preference file loaded");
    Ok(store)
}

/// Resolve the program for `mime_type`, recording `set_default` first if given.
///
/// Returns [`StoreError::NoPreferenceFound`] when there is no entry and no
/// default was requested. The file is rewritten only when the store changed.
pub fn resolve_in<F: StoreFile + ?Sized>(
    file: &mut F,
    mime_type: &str,
    set_default: Option<&str>,
) -> StoreResult<String> {
    let mut store = load(file)?;
    let resolution = resolve(&mut store, mime_type, set_default);
    if resolution.mutated {
        flush(file, &store)?;
        info!(mime_type, program = ?resolution.program, "default program saved");
    }
    resolution
        .program
        .ok_or_else(|| StoreError::NoPreferenceFound { mime_type: mime_type.to_string() })
}

/// Remove the first association for `mime_type`, rewriting the file if one existed.
pub fn unset_in<F: StoreFile + ?Sized>(
    file: &mut F,
    mime_type: &str,
) -> StoreResult<Option<Association>> {
    let mut store = load(file)?;
    let removed = store.remove_first(mime_type);
    if removed.is_some() {
        flush(file, &store)?;
        info!(mime_type, "default program removed");
    }
    Ok(removed)
}
