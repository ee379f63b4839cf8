//! In-memory preference store.

use types::Association;

use crate::codec;

/// Ordered collection of associations, first match wins.
///
/// Order is file order for parsed entries and append order for new ones.
/// Duplicate MIME types are tolerated: only the first is ever returned by
/// [`find`](Self::find) and therefore only the first is ever updated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceStore {
    entries: Vec<Association>,
}

impl PreferenceStore {
    /// Create an empty store.
    pub fn new() -> Self { Self::default() }

    /// Build a store from the text of a preference file.
    pub fn from_text(text: &str) -> Self { Self { entries: codec::parse(text) } }

    /// Build a store from the raw bytes of a preference file.
    pub fn from_bytes(bytes: &[u8]) -> Self { Self { entries: codec::parse_bytes(bytes) } }

    /// Serialize the store back to preference file text.
    pub fn to_text(&self) -> String { codec::serialize(&self.entries) }

    /// Index of the first association whose MIME type equals `mime_type` exactly.
    pub fn find(&self, mime_type: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.matches(mime_type))
    }

    /// Program of the first association for `mime_type`.
    pub fn program_for(&self, mime_type: &str) -> Option<&str> {
        self.find(mime_type).map(|index| self.entries[index].program.as_str())
    }

    /// Append an association at the end, without checking for an existing key.
    pub fn append(&mut self, association: Association) { self.entries.push(association); }

    /// Replace the program of the association at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds; indices come from [`find`](Self::find).
    pub fn replace_program_at(&mut self, index: usize, program: impl Into<String>) {
        self.entries[index].program = program.into();
    }

    /// Remove and return the association at `index`, keeping the order of the rest.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> Association { self.entries.remove(index) }

    /// Remove the first association for `mime_type`, if any.
    ///
    /// Later duplicates stay in place and become visible to lookups.
    pub fn remove_first(&mut self, mime_type: &str) -> Option<Association> {
        self.find(mime_type).map(|index| self.remove_at(index))
    }

    /// Read-only view of every association, in order.
    pub fn entries(&self) -> &[Association] { &self.entries }

    /// Iterate associations in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Association> { self.entries.iter() }

    /// Number of associations, duplicates included.
    pub fn len(&self) -> usize { self.entries.len() }

    /// Whether the store holds no associations.
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl From<Vec<Association>> for PreferenceStore {
    fn from(entries: Vec<Association>) -> Self { Self { entries } }
}

impl<'a> IntoIterator for &'a PreferenceStore {
    type Item = &'a Association;
    type IntoIter = std::slice::Iter<'a, Association>;

    fn into_iter(self) -> Self::IntoIter { self.entries.iter() }
}
