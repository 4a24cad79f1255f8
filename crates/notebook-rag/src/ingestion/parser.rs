//! PDF text extraction with per-page output

use crate::error::{Error, Result};

/// Extracted text for a whole document, page by page
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Per-page text, in page order. Pages that contained no extractable
    /// text are dropped.
    pub pages: Vec<ParsedPage>,
    /// Total pages in the document, including empty ones
    pub total_pages: u32,
}

/// Text content of a single page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// Page number (1-indexed)
    pub number: u32,
    /// Cleaned text content
    pub text: String,
}

/// PDF parser over the pdf-extract / lopdf stack
pub struct PdfParser;

impl PdfParser {
    /// Extract per-page text from PDF bytes.
    ///
    /// Fails with a parse error when the document cannot be loaded or when
    /// no page yields any text (scanned or encrypted PDFs).
    pub fn extract_pages(filename: &str, data: &[u8]) -> Result<ParsedDocument> {
        let raw_pages = pdf_extract::extract_text_from_mem_by_pages(data)
            .map_err(|e| Error::parse(filename, e.to_string()))?;

        let total_pages = Self::count_pages(data).unwrap_or(raw_pages.len() as u32);

        let pages: Vec<ParsedPage> = raw_pages
            .into_iter()
            .enumerate()
            .filter_map(|(i, raw)| {
                let text = normalize_extracted_text(&raw);
                if text.is_empty() {
                    None
                } else {
                    Some(ParsedPage {
                        number: i as u32 + 1,
                        text,
                    })
                }
            })
            .collect();

        if pages.is_empty() {
            return Err(Error::parse(
                filename,
                "no extractable text; the PDF may be scanned or encrypted",
            ));
        }

        Ok(ParsedDocument { pages, total_pages })
    }

    /// Page count straight from the PDF catalog
    fn count_pages(data: &[u8]) -> Option<u32> {
        lopdf::Document::load_mem(data)
            .ok()
            .map(|doc| doc.get_pages().len() as u32)
    }
}

/// Clean up extracted text: drop null bytes, normalize glyphs that PDF
/// fonts commonly emit, and collapse blank-only lines.
fn normalize_extracted_text(raw: &str) -> String {
    let replaced = raw
        .replace('\0', "")
        .replace('\u{00A0}', " ")
        .replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl");

    replaced
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
