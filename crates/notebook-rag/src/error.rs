//! Error types for the RAG system

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for RAG operations
pub type Result<T> = std::result::Result<T, Error>;

/// RAG system errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bad or missing request fields, rejected before any side effect
    #[error("Validation error: {0}")]
    Validation(String),

    /// Document text extraction error
    #[error("Failed to parse '{filename}': {message}")]
    Parse { filename: String, message: String },

    /// Chunking configuration error (overlap must be smaller than size)
    #[error("Invalid chunking config: overlap {chunk_overlap} must be less than size {chunk_size}")]
    ChunkConfig {
        chunk_size: usize,
        chunk_overlap: usize,
    },

    /// Vector index error, tagged with the gateway operation that failed
    #[error("Vector index error during {op}: {message}")]
    Index { op: &'static str, message: String },

    /// A delete was requested with an empty filter; wiping the whole index
    /// requires the explicit delete-all path
    #[error("Empty delete filter rejected; use the explicit delete-all operation to wipe the index")]
    InvalidFilter,

    /// Embedding service error
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Generation model error
    #[error("LLM error: {0}")]
    Llm(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a parse error
    pub fn parse(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create a vector index error for the given gateway operation
    pub fn index(op: &'static str, message: impl Into<String>) -> Self {
        Self::Index {
            op,
            message: message.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create an LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error", msg.clone()),
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            Error::Parse { filename, message } => (
                StatusCode::BAD_REQUEST,
                "parse_error",
                format!("Failed to parse '{}': {}", filename, message),
            ),
            Error::ChunkConfig { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "chunk_config_error",
                self.to_string(),
            ),
            Error::Index { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "index_error",
                self.to_string(),
            ),
            Error::InvalidFilter => (
                StatusCode::BAD_REQUEST,
                "invalid_filter",
                self.to_string(),
            ),
            Error::Embedding(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "embedding_error", msg.clone())
            }
            Error::Llm(msg) => (StatusCode::SERVICE_UNAVAILABLE, "llm_error", msg.clone()),
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                err.to_string(),
            ),
            Error::Json(err) => (StatusCode::BAD_REQUEST, "json_error", err.to_string()),
            Error::Http(err) => (StatusCode::BAD_GATEWAY, "http_error", err.to_string()),
            Error::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
