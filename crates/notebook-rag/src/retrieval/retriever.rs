//! Retriever: embed the question, search the notebook's partition

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::index::{MetadataFilter, ScoredRecord, VectorIndexGateway};
use crate::providers::EmbeddingProvider;

/// Default number of chunks to retrieve per question
pub const DEFAULT_TOP_K: usize = 5;

/// Retrieves notebook-scoped chunks for a question.
///
/// Tenant isolation is enforced by the store-side filter: the search never
/// leaves the notebook's partition, so no client-side post-filtering is
/// needed.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndexGateway>,
    dimensions: usize,
}

impl Retriever {
    /// Create a retriever over the injected providers. `dimensions` is the
    /// index's vector dimension; query embeddings must match it.
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndexGateway>,
        dimensions: usize,
    ) -> Self {
        Self {
            embedder,
            index,
            dimensions,
        }
    }

    /// Retrieve up to `k` chunks from the given notebook. An empty result
    /// is valid: the notebook may have no matching content.
    pub async fn retrieve(
        &self,
        question: &str,
        notebook_id: &str,
        k: usize,
    ) -> Result<Vec<ScoredRecord>> {
        let embedding = self.embedder.embed(question).await?;
        if embedding.len() != self.dimensions {
            return Err(Error::embedding(format!(
                "query embedding dimension {} does not match the configured index dimension {}",
                embedding.len(),
                self.dimensions
            )));
        }

        let results = self
            .index
            .search(&embedding, k, &MetadataFilter::notebook(notebook_id))
            .await?;

        tracing::debug!(
            "Retrieved {} chunks for notebook {}",
            results.len(),
            notebook_id
        );

        Ok(results)
    }
}
