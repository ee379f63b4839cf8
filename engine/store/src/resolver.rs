//! Lookup / upsert decision over a [`PreferenceStore`].

use tracing::debug;
use types::Association;

use crate::PreferenceStore;

/// Outcome of [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Program to open the file with, `None` when nothing is configured.
    pub program: Option<String>,
    /// Whether the store changed and must be written back.
    pub mutated: bool,
}

impl Resolution {
    fn found(program: impl Into<String>, mutated: bool) -> Self {
        Self { program: Some(program.into()), mutated }
    }

    fn missing() -> Self { Self { program: None, mutated: false } }
}

/// Decide which program handles `mime_type`, updating the store on request.
///
/// `set_default` carries the program to record as the new default:
///
/// | existing entry | `set_default` | result                                  |
/// |----------------|---------------|-----------------------------------------|
/// | yes            | `Some(p)`     | first entry's program replaced by `p`   |
/// | yes            | `None`        | first entry's program, unchanged store  |
/// | no             | `Some(p)`     | `mime_type=p` appended                  |
/// | no             | `None`        | no program, unchanged store             |
///
/// Existing duplicates are never cleaned up, and an upsert never adds one.
pub fn resolve(
    store: &mut PreferenceStore,
    mime_type: &str,
    set_default: Option<&str>,
) -> Resolution {
    match (store.find(mime_type), set_default) {
        (Some(index), Some(program)) => {
            debug!(mime_type, program, index, "replacing default program");
            store.replace_program_at(index, program);
            Resolution::found(program, true)
        }
        (Some(index), None) => Resolution::found(store.entries()[index].program.as_str(), false),
        (None, Some(program)) => {
            debug!(mime_type, program, "adding default program");
            store.append(Association::new(mime_type, program));
            Resolution::found(program, true)
        }
        (None, None) => Resolution::missing(),
    }
}
