//! Metadata filters for search and delete operations

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// An exact-match conjunction over metadata fields.
///
/// Serializes to the store's filter object, e.g. `{"notebookId": "n1"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetadataFilter(BTreeMap<String, String>);

impl MetadataFilter {
    /// An empty filter. Valid for search (no constraint) but rejected for
    /// deletes; see [`DeleteSelector`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on a notebook id
    pub fn notebook(notebook_id: impl Into<String>) -> Self {
        Self::new().with("notebookId", notebook_id)
    }

    /// Filter on a source document id
    pub fn source(source_id: impl Into<String>) -> Self {
        Self::new().with("sourceId", source_id)
    }

    /// Add an exact-match condition
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Whether the filter has no conditions
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a condition value by field name
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }
}

/// Selector for delete operations.
///
/// Wiping the entire index requires the explicit `All` variant; an empty
/// metadata filter never falls through to delete-all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteSelector {
    /// Unconditional wipe of every record
    All,
    /// Delete records matching an exact-match metadata filter
    Filter(MetadataFilter),
}

impl DeleteSelector {
    /// Delete everything in a notebook
    pub fn notebook(notebook_id: impl Into<String>) -> Self {
        Self::Filter(MetadataFilter::notebook(notebook_id))
    }

    /// Delete everything from a source document
    pub fn source(source_id: impl Into<String>) -> Self {
        Self::Filter(MetadataFilter::source(source_id))
    }

    /// Reject empty filters before any request reaches the store.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::All => Ok(()),
            Self::Filter(filter) if filter.is_empty() => Err(Error::InvalidFilter),
            Self::Filter(_) => Ok(()),
        }
    }
}
