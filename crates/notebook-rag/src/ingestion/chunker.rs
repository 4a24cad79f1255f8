//! Text chunking with fixed size and overlap
//!
//! Chunks cover the input with no gaps and consecutive chunks share exactly
//! the configured overlap, so stripping the leading overlap from every chunk
//! after the first reconstructs the input. Cut points prefer paragraph,
//! sentence, then word boundaries before falling back to a hard cut.

use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Error, Result};

/// A chunk of text cut from a larger input, with its character span
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkPiece {
    /// Chunk text
    pub text: String,
    /// Character offset of the first character (inclusive)
    pub char_start: usize,
    /// Character offset past the last character (exclusive)
    pub char_end: usize,
}

/// Text chunker with configurable size and overlap, measured in characters
#[derive(Debug, Clone)]
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextChunker {
    /// Create a new chunker. Overlap must be strictly less than size.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_overlap >= chunk_size {
            return Err(Error::ChunkConfig {
                chunk_size,
                chunk_overlap,
            });
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Split text into overlapping chunks. Empty input yields no chunks.
    pub fn split(&self, text: &str) -> Vec<ChunkPiece> {
        if text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every character boundary, plus the end of input,
        // so size and overlap count characters rather than bytes.
        let mut bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        bounds.push(text.len());
        let total = bounds.len() - 1;

        let mut pieces = Vec::new();
        let mut start = 0usize;

        loop {
            let hard_end = (start + self.chunk_size).min(total);
            let end = if hard_end < total {
                self.find_cut(text, &bounds, start, hard_end)
            } else {
                hard_end
            };

            pieces.push(ChunkPiece {
                text: text[bounds[start]..bounds[end]].to_string(),
                char_start: start,
                char_end: end,
            });

            if end == total {
                break;
            }
            start = end - self.chunk_overlap;
        }

        pieces
    }

    /// Pick the cut point for a non-final chunk, scanning the tail of the
    /// window for a boundary. Cuts never land before `floor`, which keeps
    /// every chunk advancing past the overlap region.
    fn find_cut(&self, text: &str, bounds: &[usize], start: usize, hard_end: usize) -> usize {
        let floor = start + (self.chunk_size / 2).max(self.chunk_overlap + 1);
        if floor >= hard_end {
            return hard_end;
        }

        let base = bounds[start];
        let floor_byte = bounds[floor];
        let window = &text[base..bounds[hard_end]];

        // Paragraph break: cut just after the last blank line.
        if let Some(pos) = window.rfind("\n\n") {
            let cut = base + pos + 2;
            if cut >= floor_byte {
                return byte_to_char(bounds, cut);
            }
        }

        // Sentence boundary per Unicode rules.
        let mut best = None;
        for (offset, _) in window.split_sentence_bound_indices() {
            if offset > 0 && base + offset >= floor_byte {
                best = Some(base + offset);
            }
        }
        if let Some(cut) = best {
            return byte_to_char(bounds, cut);
        }

        // Word boundary: cut just after the last whitespace character.
        for (offset, ch) in window.char_indices().rev() {
            let cut = base + offset + ch.len_utf8();
            if ch.is_whitespace() && cut >= floor_byte && cut < bounds[hard_end] {
                return byte_to_char(bounds, cut);
            }
            if cut < floor_byte {
                break;
            }
        }

        // No boundary in the window: hard cut.
        hard_end
    }
}

/// Map a byte offset back to its character index
fn byte_to_char(bounds: &[usize], byte: usize) -> usize {
    match bounds.binary_search(&byte) {
        Ok(i) => i,
        Err(i) => i,
    }
}
