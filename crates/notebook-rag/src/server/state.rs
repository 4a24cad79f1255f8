//! Application state for the RAG server
//!
//! All external-service clients are constructed here, once, and injected
//! into the pipelines; nothing reaches for an ambient singleton. The state
//! is cheap to clone and shared across requests.

use std::sync::Arc;

use crate::config::RagConfig;
use crate::error::Result;
use crate::generation::AnswerComposer;
use crate::index::{HttpVectorIndex, VectorIndexGateway};
use crate::ingestion::IngestPipeline;
use crate::providers::{EmbeddingProvider, LlmProvider, OllamaClient, OllamaEmbedder, OllamaLlm};
use crate::query::QueryPipeline;
use crate::retrieval::Retriever;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Ingestion pipeline (one run per upload)
    ingest: IngestPipeline,
    /// Query pipeline (one run per question)
    query: QueryPipeline,
    /// Vector index gateway, also used directly by the delete endpoints
    index: Arc<dyn VectorIndexGateway>,
}

impl AppState {
    /// Create application state with the default providers: an Ollama
    /// client for embeddings and generation, and the HTTP vector index
    /// gateway.
    pub fn new(config: RagConfig) -> Result<Self> {
        tracing::info!("Initializing RAG application state...");

        let ollama = Arc::new(OllamaClient::new(&config.llm)?);
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(OllamaEmbedder::new(
            Arc::clone(&ollama),
            config.embeddings.dimensions,
        ));
        let llm: Arc<dyn LlmProvider> = Arc::new(OllamaLlm::new(
            ollama,
            config.llm.generate_model.clone(),
        ));
        let index: Arc<dyn VectorIndexGateway> = Arc::new(HttpVectorIndex::new(&config.index)?);

        tracing::info!(
            "Providers initialized (embed: {}, llm: {}, index: {})",
            config.llm.embed_model,
            config.llm.generate_model,
            config.index.base_url
        );

        Self::with_providers(config, embedder, llm, index)
    }

    /// Create application state from explicit providers; used by tests to
    /// run the pipelines against fakes.
    pub fn with_providers(
        config: RagConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
        index: Arc<dyn VectorIndexGateway>,
    ) -> Result<Self> {
        let ingest = IngestPipeline::new(&config, Arc::clone(&embedder), Arc::clone(&index))?;
        let retriever = Retriever::new(embedder, Arc::clone(&index), config.embeddings.dimensions);
        let query = QueryPipeline::new(retriever, AnswerComposer::new(llm));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                ingest,
                query,
                index,
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the ingestion pipeline
    pub fn ingest(&self) -> &IngestPipeline {
        &self.inner.ingest
    }

    /// Get the query pipeline
    pub fn query(&self) -> &QueryPipeline {
        &self.inner.query
    }

    /// Get the vector index gateway
    pub fn index(&self) -> &Arc<dyn VectorIndexGateway> {
        &self.inner.index
    }
}
