//! Document upload endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{DocumentUpload, UploadResponse};

/// POST /upload - Ingest one PDF into a notebook
///
/// Multipart fields: `file` (the PDF), `notebookId`, `sourceId`. All three
/// are mandatory and validated before any side effect.
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let start = Instant::now();

    let mut filename: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut bytes: Option<Vec<u8>> = None;
    let mut notebook_id: Option<String> = None;
    let mut source_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::validation(format!("Failed to read multipart field: {}", e)))?
    {
        match field.name().unwrap_or("") {
            "file" => {
                filename = field.file_name().map(str::to_string);
                content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| Error::validation(format!("Failed to read file: {}", e)))?;
                bytes = Some(data.to_vec());
            }
            "notebookId" => {
                notebook_id = Some(field.text().await.map_err(|e| {
                    Error::validation(format!("Failed to read notebookId: {}", e))
                })?);
            }
            "sourceId" => {
                source_id = Some(field.text().await.map_err(|e| {
                    Error::validation(format!("Failed to read sourceId: {}", e))
                })?);
            }
            other => {
                tracing::debug!("Ignoring unknown multipart field: {}", other);
            }
        }
    }

    let bytes = bytes.ok_or_else(|| Error::validation("No file provided"))?;
    let upload = DocumentUpload {
        filename: filename.ok_or_else(|| Error::validation("Uploaded file has no filename"))?,
        content_type,
        bytes,
        source_id: source_id.ok_or_else(|| Error::validation("sourceId is required"))?,
        notebook_id: notebook_id.ok_or_else(|| Error::validation("notebookId is required"))?,
    };

    tracing::info!(
        "Upload: '{}' ({} bytes) into notebook {}",
        upload.filename,
        upload.bytes.len(),
        upload.notebook_id
    );

    let report = state.ingest().ingest(upload).await?;

    tracing::info!(
        "Upload completed in {:.1}s: {} chunks in {} batches",
        start.elapsed().as_secs_f64(),
        report.chunks,
        report.batches
    );

    Ok(Json(UploadResponse {
        status: "completed".to_string(),
        source_id: report.source_id,
        notebook_id: report.notebook_id,
        pages: report.pages,
        chunks: report.chunks,
        batches: report.batches,
    }))
}
