//! notebook-rag: Notebook-scoped RAG backend with PDF ingestion and cited answers
//!
//! This crate provides a retrieval-augmented generation backend. PDF documents
//! are chunked, tagged with their notebook and source ids, embedded, and stored
//! in an external vector index; questions are answered by retrieving
//! notebook-scoped chunks and asking a generation model for a grounded,
//! cited answer, either as one response or as a token stream.

pub mod config;
pub mod error;
pub mod generation;
pub mod index;
pub mod ingestion;
pub mod providers;
pub mod query;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use types::{
    chat::{ChatMessage, ChatRequest, ChatStreamRequest},
    document::{Chunk, ChunkMetadata, DocumentUpload},
    response::{ChatResponse, DeleteResponse, UploadResponse},
};
