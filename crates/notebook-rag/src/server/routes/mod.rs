//! HTTP routes for the RAG server

pub mod chat;
pub mod documents;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, post},
    Router,
};

use crate::server::state::AppState;

/// Build all routes
pub fn routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Ingestion - with a body limit for multipart uploads
        .route(
            "/upload",
            post(upload::upload_document).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Question answering
        .route("/chat", post(chat::chat))
        .route("/chat-stream", post(chat::chat_stream))
        // Index deletion; the bare /documents route is the explicit wipe
        .route("/documents", delete(documents::delete_all_documents))
        .route(
            "/documents/notebooks/:notebook_id",
            delete(documents::delete_notebook_documents),
        )
        .route(
            "/documents/sources/:source_id",
            delete(documents::delete_source_documents),
        )
}
