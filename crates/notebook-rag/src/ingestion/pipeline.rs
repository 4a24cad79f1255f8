//! Ingestion pipeline orchestration
//!
//! One run per uploaded document: validate → parse → chunk → tag → embed →
//! upsert in sequential batches. Batch i is submitted only after batch i-1
//! returns, and a batch failure aborts the run without rolling back the
//! batches that already committed; the error says how many did.

use std::sync::Arc;
use uuid::Uuid;

use crate::config::RagConfig;
use crate::error::{Error, Result};
use crate::index::{VectorIndexGateway, VectorRecord, MAX_UPSERT_BATCH};
use crate::providers::EmbeddingProvider;
use crate::types::{Chunk, DocumentUpload};

use super::chunker::TextChunker;
use super::parser::PdfParser;
use super::tagger::{tag_chunk, TagContext};

/// Outcome of a completed ingestion run
#[derive(Debug, Clone)]
pub struct IngestReport {
    /// Source document id
    pub source_id: String,
    /// Owning notebook id
    pub notebook_id: String,
    /// Pages extracted from the document
    pub pages: u32,
    /// Chunks indexed
    pub chunks: usize,
    /// Upsert batches submitted
    pub batches: usize,
}

/// Main ingestion pipeline
pub struct IngestPipeline {
    chunker: TextChunker,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndexGateway>,
    batch_size: usize,
    dimensions: usize,
}

impl IngestPipeline {
    /// Create a new ingestion pipeline from configuration and injected
    /// providers
    pub fn new(
        config: &RagConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndexGateway>,
    ) -> Result<Self> {
        Ok(Self {
            chunker: TextChunker::new(config.chunking.chunk_size, config.chunking.chunk_overlap)?,
            embedder,
            index,
            batch_size: config.index.upsert_batch_size.clamp(1, MAX_UPSERT_BATCH),
            dimensions: config.embeddings.dimensions,
        })
    }

    /// Ingest one uploaded document
    pub async fn ingest(&self, upload: DocumentUpload) -> Result<IngestReport> {
        validate_upload(&upload)?;

        let parsed = PdfParser::extract_pages(&upload.filename, &upload.bytes)?;
        tracing::info!(
            "Parsed '{}': {} pages with text ({} total)",
            upload.filename,
            parsed.pages.len(),
            parsed.total_pages
        );

        self.ingest_pages(upload, parsed.pages, parsed.total_pages)
            .await
    }

    /// Chunk, tag, embed, and upsert already-extracted pages
    async fn ingest_pages(
        &self,
        upload: DocumentUpload,
        pages: Vec<super::parser::ParsedPage>,
        total_pages: u32,
    ) -> Result<IngestReport> {
        validate_upload(&upload)?;

        let ctx = TagContext {
            source_id: upload.source_id.clone(),
            notebook_id: upload.notebook_id.clone(),
            filename: upload.filename.clone(),
            uploaded_at: chrono::Utc::now(),
        };

        let mut chunks: Vec<Chunk> = Vec::new();
        for page in &pages {
            for piece in self.chunker.split(&page.text) {
                let ordinal = chunks.len() as u32;
                chunks.push(tag_chunk(piece, Some(page.number), ordinal, &ctx));
            }
        }

        if chunks.is_empty() {
            return Ok(IngestReport {
                source_id: upload.source_id,
                notebook_id: upload.notebook_id,
                pages: total_pages,
                chunks: 0,
                batches: 0,
            });
        }

        let records = self.embed_chunks(chunks).await?;

        let total_batches = records.len().div_ceil(self.batch_size);
        for (i, batch) in records.chunks(self.batch_size).enumerate() {
            self.index.upsert(batch).await.map_err(|e| {
                tracing::error!(
                    "Upsert batch {}/{} failed for '{}': {}",
                    i + 1,
                    total_batches,
                    upload.filename,
                    e
                );
                Error::index(
                    "upsert",
                    format!(
                        "batch {}/{} failed: {} ({} earlier batches remain indexed)",
                        i + 1,
                        total_batches,
                        e,
                        i
                    ),
                )
            })?;
        }

        tracing::info!(
            "Ingested '{}' into notebook {}: {} chunks in {} batches",
            upload.filename,
            upload.notebook_id,
            records.len(),
            total_batches
        );

        Ok(IngestReport {
            source_id: upload.source_id,
            notebook_id: upload.notebook_id,
            pages: total_pages,
            chunks: records.len(),
            batches: total_batches,
        })
    }

    /// Embed tagged chunks and pair them into index records
    async fn embed_chunks(&self, chunks: Vec<Chunk>) -> Result<Vec<VectorRecord>> {
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        if embeddings.len() != chunks.len() {
            return Err(Error::embedding(format!(
                "expected {} embeddings, got {}",
                chunks.len(),
                embeddings.len()
            )));
        }

        chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, values)| {
                if values.len() != self.dimensions {
                    return Err(Error::embedding(format!(
                        "embedding dimension {} does not match the configured index dimension {}",
                        values.len(),
                        self.dimensions
                    )));
                }
                Ok(VectorRecord {
                    id: Uuid::new_v4().to_string(),
                    values,
                    text: chunk.text,
                    metadata: chunk.metadata,
                })
            })
            .collect()
    }
}

/// Boundary validation: mandatory ids and PDF-only uploads, checked by
/// extension/declared content type rather than content sniffing.
fn validate_upload(upload: &DocumentUpload) -> Result<()> {
    if upload.source_id.trim().is_empty() {
        return Err(Error::validation("sourceId is required"));
    }
    if upload.notebook_id.trim().is_empty() {
        return Err(Error::validation("notebookId is required"));
    }
    if !is_pdf(upload) {
        return Err(Error::validation("Only PDF files are supported"));
    }
    Ok(())
}

fn is_pdf(upload: &DocumentUpload) -> bool {
    if upload
        .content_type
        .as_deref()
        .is_some_and(|ct| ct == mime_guess::mime::APPLICATION_PDF.essence_str())
    {
        return true;
    }
    mime_guess::from_path(&upload.filename)
        .first()
        .is_some_and(|mime| mime == mime_guess::mime::APPLICATION_PDF)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::config::RagConfig;
    use crate::index::{
        DeleteSelector, MetadataFilter, ScoredRecord, UpsertReceipt, VectorIndexGateway,
    };
    use crate::providers::EmbeddingProvider;

    struct FakeEmbedder {
        dimensions: usize,
    }

    #[async_trait]
    impl EmbeddingProvider for FakeEmbedder {
        async fn embed(&self, text: &str) -> crate::error::Result<Vec<f32>> {
            // Deterministic vector derived from the text length
            Ok(vec![text.len() as f32; self.dimensions])
        }

        fn dimensions(&self) -> usize {
            self.dimensions
        }

        fn name(&self) -> &str {
            "fake"
        }
    }

    #[derive(Default)]
    struct RecordingIndex {
        batches: Mutex<Vec<Vec<VectorRecord>>>,
        fail_on_batch: Option<usize>,
    }

    #[async_trait]
    impl VectorIndexGateway for RecordingIndex {
        async fn upsert(&self, batch: &[VectorRecord]) -> crate::error::Result<UpsertReceipt> {
            let mut batches = self.batches.lock().expect("lock");
            if self.fail_on_batch == Some(batches.len()) {
                return Err(Error::index("upsert", "store unavailable"));
            }
            batches.push(batch.to_vec());
            Ok(UpsertReceipt {
                upserted: batch.len(),
            })
        }

        async fn search(
            &self,
            _vector: &[f32],
            _k: usize,
            _filter: &MetadataFilter,
        ) -> crate::error::Result<Vec<ScoredRecord>> {
            Ok(Vec::new())
        }

        async fn delete(&self, selector: &DeleteSelector) -> crate::error::Result<u64> {
            selector.validate()?;
            Ok(0)
        }
    }

    fn test_config(batch_size: usize) -> RagConfig {
        let mut config = RagConfig::default();
        config.chunking.chunk_size = 100;
        config.chunking.chunk_overlap = 20;
        config.embeddings.dimensions = 4;
        config.index.upsert_batch_size = batch_size;
        config
    }

    fn pipeline_with(
        config: &RagConfig,
        index: Arc<RecordingIndex>,
        dims: usize,
    ) -> IngestPipeline {
        IngestPipeline::new(
            config,
            Arc::new(FakeEmbedder { dimensions: dims }),
            index,
        )
        .expect("pipeline")
    }

    fn upload(filename: &str, source_id: &str, notebook_id: &str) -> DocumentUpload {
        DocumentUpload {
            filename: filename.to_string(),
            content_type: Some("application/pdf".to_string()),
            bytes: Vec::new(),
            source_id: source_id.to_string(),
            notebook_id: notebook_id.to_string(),
        }
    }

    #[tokio::test]
    async fn missing_source_id_is_rejected_before_any_side_effect() {
        let index = Arc::new(RecordingIndex::default());
        let pipeline = pipeline_with(&test_config(100), Arc::clone(&index), 4);

        let err = pipeline
            .ingest(upload("doc.pdf", "", "n1"))
            .await
            .expect_err("must reject");
        assert!(matches!(err, Error::Validation(_)));
        assert!(index.batches.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn non_pdf_upload_is_rejected() {
        let index = Arc::new(RecordingIndex::default());
        let pipeline = pipeline_with(&test_config(100), Arc::clone(&index), 4);

        let mut bad = upload("notes.txt", "s1", "n1");
        bad.content_type = Some("text/plain".to_string());

        let err = pipeline.ingest(bad).await.expect_err("must reject");
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn every_chunk_carries_the_request_partition_keys() {
        let index = Arc::new(RecordingIndex::default());
        let config = test_config(100);
        let pipeline = pipeline_with(&config, Arc::clone(&index), 4);

        let pages = vec![
            crate::ingestion::ParsedPage {
                number: 1,
                text: "First page sentence one. First page sentence two. ".repeat(8),
            },
            crate::ingestion::ParsedPage {
                number: 2,
                text: "Second page content goes here. ".repeat(8),
            },
        ];
        let report = pipeline
            .ingest_pages(upload("report.pdf", "s1", "n1"), pages, 2)
            .await
            .expect("ingest");

        assert!(report.chunks >= 1);
        assert_eq!(report.pages, 2);

        let batches = index.batches.lock().expect("lock");
        let records: Vec<&VectorRecord> = batches.iter().flatten().collect();
        assert_eq!(records.len(), report.chunks);
        for record in &records {
            assert_eq!(record.metadata.source_id, "s1");
            assert_eq!(record.metadata.notebook_id, "n1");
            assert_eq!(record.metadata.source, "report.pdf");
            assert!(matches!(record.metadata.page, Some(1) | Some(2)));
        }
    }

    #[tokio::test]
    async fn upserts_are_batched_and_ordered() {
        let index = Arc::new(RecordingIndex::default());
        let config = test_config(2);
        let pipeline = pipeline_with(&config, Arc::clone(&index), 4);

        let page_text = "A sentence that keeps going for a while to force chunks. ".repeat(12);
        let pages = vec![crate::ingestion::ParsedPage {
            number: 1,
            text: page_text.clone(),
        }];
        let report = pipeline
            .ingest_pages(upload("report.pdf", "s1", "n1"), pages, 1)
            .await
            .expect("ingest");

        let batches = index.batches.lock().expect("lock");
        assert_eq!(batches.len(), report.batches);
        assert!(batches.len() > 1);
        for batch in batches.iter() {
            assert!(batch.len() <= 2);
        }

        // Records arrive in chunk order across batches
        let expected: Vec<String> = crate::ingestion::TextChunker::new(100, 20)
            .expect("chunker")
            .split(&page_text)
            .into_iter()
            .map(|piece| piece.text)
            .collect();
        let flattened: Vec<String> = batches
            .iter()
            .flatten()
            .map(|r| r.text.clone())
            .collect();
        assert_eq!(flattened, expected);
    }

    #[tokio::test]
    async fn batch_failure_reports_what_committed() {
        let index = Arc::new(RecordingIndex {
            batches: Mutex::new(Vec::new()),
            fail_on_batch: Some(1),
        });
        let config = test_config(2);
        let pipeline = pipeline_with(&config, Arc::clone(&index), 4);

        let pages = vec![crate::ingestion::ParsedPage {
            number: 1,
            text: "Another long page of sentences to get several chunks out. ".repeat(12),
        }];
        let err = pipeline
            .ingest_pages(upload("report.pdf", "s1", "n1"), pages, 1)
            .await
            .expect_err("must fail");

        match err {
            Error::Index { op, message } => {
                assert_eq!(op, "upsert");
                assert!(message.contains("batch 2/"));
                assert!(message.contains("1 earlier batches remain indexed"));
            }
            other => panic!("unexpected error: {:?}", other),
        }

        // The first batch committed and stays committed
        assert_eq!(index.batches.lock().expect("lock").len(), 1);
    }

    #[tokio::test]
    async fn dimension_mismatch_is_rejected() {
        let index = Arc::new(RecordingIndex::default());
        let config = test_config(100); // configured for 4 dimensions
        let pipeline = pipeline_with(&config, Arc::clone(&index), 8);

        let pages = vec![crate::ingestion::ParsedPage {
            number: 1,
            text: "Some content.".to_string(),
        }];
        let err = pipeline
            .ingest_pages(upload("report.pdf", "s1", "n1"), pages, 1)
            .await
            .expect_err("must fail");

        assert!(matches!(err, Error::Embedding(_)));
        assert!(index.batches.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn empty_pages_complete_with_zero_chunks() {
        let index = Arc::new(RecordingIndex::default());
        let pipeline = pipeline_with(&test_config(100), Arc::clone(&index), 4);

        let report = pipeline
            .ingest_pages(upload("report.pdf", "s1", "n1"), Vec::new(), 0)
            .await
            .expect("ingest");

        assert_eq!(report.chunks, 0);
        assert_eq!(report.batches, 0);
        assert!(index.batches.lock().expect("lock").is_empty());
    }
}
