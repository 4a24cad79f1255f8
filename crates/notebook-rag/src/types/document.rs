//! Document and chunk types with tenant-scoping metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An uploaded document awaiting ingestion.
///
/// Documents are transient: they are converted into chunks and discarded,
/// never persisted themselves.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    /// Original filename as uploaded
    pub filename: String,
    /// Declared content type from the multipart field, if any
    pub content_type: Option<String>,
    /// Raw file bytes
    pub bytes: Vec<u8>,
    /// Source document id; partition key together with `notebook_id`
    pub source_id: String,
    /// Owning notebook id; partition key together with `source_id`
    pub notebook_id: String,
}

/// Tenant-scoping metadata attached to every chunk.
///
/// `source_id` and `notebook_id` are the multi-tenant partition keys; they
/// are set once by the tagger and never changed afterwards. Field names
/// serialize to the index's wire keys (`sourceId`, `notebookId`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkMetadata {
    /// Source filename, used verbatim in citations
    pub source: String,
    /// Source document id
    pub source_id: String,
    /// Owning notebook id
    pub notebook_id: String,
    /// Upload timestamp
    pub upload_date: DateTime<Utc>,
    /// Page number (1-indexed), when the document is paginated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// A contiguous text segment derived from a document, the unit of
/// embedding and retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Text content
    pub text: String,
    /// Ordinal position within the document
    pub ordinal: u32,
    /// Character offsets within the page the chunk was cut from; consecutive
    /// chunks overlap by exactly the configured overlap
    pub char_start: usize,
    pub char_end: usize,
    /// Tenant-scoping metadata
    pub metadata: ChunkMetadata,
}
