//! Vector index gateway trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::ChunkMetadata;

use super::filter::{DeleteSelector, MetadataFilter};

/// Hard upper bound on records per upsert call, respecting upstream
/// request-size limits. Callers split larger sets into sequential batches.
pub const MAX_UPSERT_BATCH: usize = 100;

/// A record to be stored in the vector index: embedding, chunk text, and
/// the tenant-scoping metadata it is filterable by.
#[derive(Debug, Clone)]
pub struct VectorRecord {
    /// Record id (chunk id)
    pub id: String,
    /// Embedding vector
    pub values: Vec<f32>,
    /// Chunk text
    pub text: String,
    /// Chunk metadata
    pub metadata: ChunkMetadata,
}

/// A search hit, ordered by descending similarity
#[derive(Debug, Clone)]
pub struct ScoredRecord {
    /// Chunk text
    pub text: String,
    /// Chunk metadata
    pub metadata: ChunkMetadata,
    /// Similarity score (higher is more similar)
    pub score: f32,
}

/// Acknowledgement of one upsert batch
#[derive(Debug, Clone)]
pub struct UpsertReceipt {
    /// Number of records the store accepted
    pub upserted: usize,
}

/// Abstraction over the external similarity-search store.
///
/// The gateway performs no automatic retry; retry policy belongs to the
/// caller. Store errors propagate as [`crate::Error::Index`] naming the
/// failed operation.
#[async_trait]
pub trait VectorIndexGateway: Send + Sync {
    /// Upsert one batch of records. Batches are independent (no cross-batch
    /// transaction) and bounded at [`MAX_UPSERT_BATCH`] records.
    async fn upsert(&self, batch: &[VectorRecord]) -> Result<UpsertReceipt>;

    /// Similarity search, constrained to records matching `filter`,
    /// returning at most `k` hits ordered by descending score.
    async fn search(
        &self,
        vector: &[f32],
        k: usize,
        filter: &MetadataFilter,
    ) -> Result<Vec<ScoredRecord>>;

    /// Delete records by selector, returning the number removed. An empty
    /// metadata filter is rejected with `InvalidFilter` before any request
    /// is sent.
    async fn delete(&self, selector: &DeleteSelector) -> Result<u64>;
}
