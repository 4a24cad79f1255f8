//! Response types for the HTTP API

use serde::{Deserialize, Serialize};

/// Response from a successful document upload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Always "completed" for a successful ingestion
    pub status: String,
    /// Source document id
    pub source_id: String,
    /// Owning notebook id
    pub notebook_id: String,
    /// Number of pages extracted
    pub pages: u32,
    /// Number of chunks indexed
    pub chunks: usize,
    /// Number of upsert batches submitted
    pub batches: usize,
}

/// Response from the blocking chat endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The composed answer
    pub answer: String,
}

/// Response from the delete endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Always "deleted"
    pub status: String,
    /// Number of records removed
    pub deleted: u64,
}
