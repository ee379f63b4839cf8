// SPDX-License-Identifier: CC0-1.0

//! mimelaunch umbrella crate.
//!
//! This crate primarily serves as the workspace root.
//!
//! The preference store lives in `engine/store`, the external collaborators
//! (MIME sniffing, process launching) in `adapters`, and the command-line
//! front end in `cli/orchestrator`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![warn(deprecated_in_future)]
#![doc(test(attr(warn(unused))))]

/// Miscellaneous metadata about the mimelaunch workspace.
pub mod mimelaunch_meta {
    /// Version string for the umbrella crate, as reported by Cargo.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
