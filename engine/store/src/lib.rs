#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! mimelaunch preference store
//!
//! The preference file is a flat `mime_type=program` text file rebuilt into an
//! in-memory [`PreferenceStore`] on every invocation. This crate provides:
//! - [`codec`]: tolerant parsing and serialization of the file text
//! - [`PreferenceStore`]: the ordered, first-match-wins collection
//! - [`resolver`]: the lookup / upsert decision
//! - [`persister`]: the write-then-truncate rewrite of the backing file
//! - [`session`]: one full read → resolve → persist pass over an open file
//! - [`lock`]: an optional advisory lock around that pass

use thiserror::Error;

pub mod codec;
pub mod lock;
pub mod persister;
pub mod preference_store;
pub mod resolver;
pub mod session;

pub use lock::ExclusiveLock;
pub use persister::{flush, StoreFile};
pub use preference_store::PreferenceStore;
pub use resolver::{resolve, Resolution};
pub use types::Association;

/// Errors raised while reading, resolving or rewriting the preference file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The preference file could not be read.
    #[error("failed to read preference file: {0}")]
    Read(#[source] std::io::Error),
    /// Writing, syncing or truncating the preference file failed.
    #[error("failed to persist preference file: {0}")]
    PersistenceFailed(#[source] std::io::Error),
    /// Taking or releasing the advisory lock failed.
    #[error("failed to lock preference file: {0}")]
    Lock(#[source] std::io::Error),
    /// Another process holds the lock and a non-blocking attempt was made.
    #[error("preference file is locked by another process")]
    Locked,
    /// No association exists for the type and no default was requested.
    #[error("no default program configured for `{mime_type}`")]
    NoPreferenceFound {
        /// The MIME type that was looked up.
        mime_type: String,
    },
}

/// Result alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;
