//! Index deletion endpoints
//!
//! All three map to the gateway's delete operation. Only the bare
//! /documents route reaches the explicit delete-all path; the scoped routes
//! always carry a filter.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{Error, Result};
use crate::index::DeleteSelector;
use crate::server::state::AppState;
use crate::types::DeleteResponse;

/// DELETE /documents - Wipe the entire index
pub async fn delete_all_documents(
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>> {
    let deleted = state.index().delete(&DeleteSelector::All).await?;

    tracing::warn!("Deleted ALL {} records from the vector index", deleted);

    Ok(Json(DeleteResponse {
        status: "deleted".to_string(),
        deleted,
    }))
}

/// DELETE /documents/notebooks/:notebook_id - Delete a notebook's records
pub async fn delete_notebook_documents(
    State(state): State<AppState>,
    Path(notebook_id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if notebook_id.trim().is_empty() {
        return Err(Error::validation("notebookId is required"));
    }

    let deleted = state
        .index()
        .delete(&DeleteSelector::notebook(notebook_id.as_str()))
        .await?;

    tracing::info!("Deleted {} records for notebook {}", deleted, notebook_id);

    Ok(Json(DeleteResponse {
        status: "deleted".to_string(),
        deleted,
    }))
}

/// DELETE /documents/sources/:source_id - Delete a source's records
pub async fn delete_source_documents(
    State(state): State<AppState>,
    Path(source_id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if source_id.trim().is_empty() {
        return Err(Error::validation("sourceId is required"));
    }

    let deleted = state
        .index()
        .delete(&DeleteSelector::source(source_id.as_str()))
        .await?;

    tracing::info!("Deleted {} records for source {}", deleted, source_id);

    Ok(Json(DeleteResponse {
        status: "deleted".to_string(),
        deleted,
    }))
}
