//! The mime-type → program record stored one-per-line in the preference file.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One MIME type mapped to the program that should open it.
///
/// Both fields are stored already trimmed. Neither may contain `=` or a
/// newline if the association is expected to survive a write/read cycle of
/// the preference file; this is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Association {
    /// MIME type used as the lookup key, e.g. `text/plain`.
    pub mime_type: String,
    /// Program launched for files of `mime_type`.
    pub program: String,
}

impl Association {
    /// Create an association from anything string-like.
    pub fn new(mime_type: impl Into<String>, program: impl Into<String>) -> Self {
        Self { mime_type: mime_type.into(), program: program.into() }
    }

    /// Whether this association is keyed by exactly `mime_type` (case-sensitive).
    pub fn matches(&self, mime_type: &str) -> bool { self.mime_type == mime_type }
}

/// Renders the on-disk form `mime_type=program`, without the trailing newline.
impl fmt::Display for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.mime_type, self.program)
    }
}
