// SPDX-License-Identifier: CC0-1.0

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Config path resolution for mimelaunch.
//!
//! This module locates the per-user config directory from an explicit
//! [`ConfigEnv`] snapshot, creates it with owner-only permissions when needed,
//! and opens files inside it for reading and writing.

pub mod path_utils;

// Re-export for convenience
pub use path_utils::*;
