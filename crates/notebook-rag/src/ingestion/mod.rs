//! Document ingestion: PDF parsing, chunking, tagging, and indexing

mod chunker;
mod parser;
mod pipeline;
mod tagger;

pub use chunker::{ChunkPiece, TextChunker};
pub use parser::{ParsedDocument, ParsedPage, PdfParser};
pub use pipeline::{IngestPipeline, IngestReport};
pub use tagger::{tag_chunk, TagContext};
