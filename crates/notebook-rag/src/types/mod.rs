//! Core types for the RAG system

pub mod chat;
pub mod document;
pub mod response;

pub use chat::{ChatMessage, ChatRequest, ChatStreamRequest};
pub use document::{Chunk, ChunkMetadata, DocumentUpload};
pub use response::{ChatResponse, DeleteResponse, UploadResponse};
