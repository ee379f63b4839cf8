#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Core data types for mimelaunch
//!
//! This crate defines the record shared by every layer of the workspace: the
//! [`Association`] between a MIME type and the program chosen to open it.
//! Parsing, storage and persistence of associations live in `mimelaunch-store`.

/// The mime-type → program record.
pub mod association;

/// Re-export the `Association` type for convenience.
pub use association::Association;
