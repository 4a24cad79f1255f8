//! Metadata tagging for chunks
//!
//! Tagging is a pure function: it attaches the tenant-scoping metadata to a
//! chunk and nothing else. Parser-local metadata (temp paths, producer
//! strings) never crosses this step because [`crate::types::ChunkMetadata`]
//! is a closed schema. The upload timestamp is supplied by the caller so a
//! fixed clock can be injected in tests.

use chrono::{DateTime, Utc};

use crate::types::{Chunk, ChunkMetadata};

use super::chunker::ChunkPiece;

/// Tenant-scoping context shared by every chunk of one ingestion run
#[derive(Debug, Clone)]
pub struct TagContext {
    /// Source document id
    pub source_id: String,
    /// Owning notebook id
    pub notebook_id: String,
    /// Original filename, used verbatim in citations
    pub filename: String,
    /// Upload timestamp, captured once per run
    pub uploaded_at: DateTime<Utc>,
}

/// Tag a chunk piece with its document's metadata. Never mutates the text.
pub fn tag_chunk(piece: ChunkPiece, page: Option<u32>, ordinal: u32, ctx: &TagContext) -> Chunk {
    Chunk {
        text: piece.text,
        ordinal,
        char_start: piece.char_start,
        char_end: piece.char_end,
        metadata: ChunkMetadata {
            source: ctx.filename.clone(),
            source_id: ctx.source_id.clone(),
            notebook_id: ctx.notebook_id.clone(),
            upload_date: ctx.uploaded_at,
            page,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn context() -> TagContext {
        TagContext {
            source_id: "s1".to_string(),
            notebook_id: "n1".to_string(),
            filename: "report.pdf".to_string(),
            uploaded_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).single().expect("timestamp"),
        }
    }

    #[test]
    fn tagging_sets_partition_keys_without_touching_text() {
        let piece = ChunkPiece {
            text: "chunk body".to_string(),
            char_start: 10,
            char_end: 20,
        };

        let chunk = tag_chunk(piece, Some(2), 7, &context());

        assert_eq!(chunk.text, "chunk body");
        assert_eq!(chunk.ordinal, 7);
        assert_eq!(chunk.char_start, 10);
        assert_eq!(chunk.char_end, 20);
        assert_eq!(chunk.metadata.source, "report.pdf");
        assert_eq!(chunk.metadata.source_id, "s1");
        assert_eq!(chunk.metadata.notebook_id, "n1");
        assert_eq!(chunk.metadata.page, Some(2));
    }

    #[test]
    fn injected_timestamp_is_used_verbatim() {
        let ctx = context();
        let piece = ChunkPiece {
            text: "t".to_string(),
            char_start: 0,
            char_end: 1,
        };

        let chunk = tag_chunk(piece, None, 0, &ctx);
        assert_eq!(chunk.metadata.upload_date, ctx.uploaded_at);
        assert_eq!(chunk.metadata.page, None);
    }

    #[test]
    fn metadata_serializes_to_wire_keys_only() {
        let chunk = tag_chunk(
            ChunkPiece {
                text: "t".to_string(),
                char_start: 0,
                char_end: 1,
            },
            Some(1),
            0,
            &context(),
        );

        let json = serde_json::to_value(&chunk.metadata).expect("serialize");
        let keys: Vec<&str> = json
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();

        assert_eq!(
            keys,
            vec!["notebookId", "page", "source", "sourceId", "uploadDate"]
        );
    }
}
