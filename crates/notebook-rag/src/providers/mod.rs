//! Provider abstractions for the external embedding and generation services
//!
//! Clients are constructed explicitly and injected (no ambient singletons),
//! so pipelines can be exercised against fakes.

pub mod embedding;
pub mod llm;
pub mod ollama;

pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use ollama::{OllamaClient, OllamaEmbedder, OllamaLlm};
