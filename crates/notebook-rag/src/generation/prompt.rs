//! Prompt templates for RAG generation

use crate::index::ScoredRecord;

/// Marker sent in place of retrieved context when the notebook has no
/// matching content. The model owns the refusal wording, so the prompt is
/// sent even then.
pub const EMPTY_CONTEXT: &str = "(no relevant context was found in this notebook)";

/// Prompt builder for RAG queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Format retrieved chunks into a context block: chunk texts joined by
    /// blank lines, each followed by its bracketed source annotation.
    pub fn build_context(results: &[ScoredRecord]) -> String {
        results
            .iter()
            .map(|record| {
                format!(
                    "{}\n{}",
                    record.text,
                    Self::format_source_annotation(record)
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Bracketed source annotation for one chunk:
    /// `[Source: <filename>, Page <page>]`, page omitted when absent.
    fn format_source_annotation(record: &ScoredRecord) -> String {
        match record.metadata.page {
            Some(page) => format!("[Source: {}, Page {}]", record.metadata.source, page),
            None => format!("[Source: {}]", record.metadata.source),
        }
    }

    /// System instruction: grounding, citations, polite refusal.
    pub fn system_prompt() -> &'static str {
        "You are a document-grounded assistant for a user's notebook.\n\
         \n\
         Rules you must follow:\n\
         1. Answer ONLY from the context provided in the user message. Never \
         use outside knowledge.\n\
         2. Cite the document name, and the page and line when available, for \
         every claim, using the bracketed annotations in the context.\n\
         3. If the context is insufficient to answer, say so politely instead \
         of guessing."
    }

    /// User turn: formatted context plus the literal question, with a
    /// request for markdown output. Empty context becomes an explicit
    /// marker rather than a locally short-circuited answer.
    pub fn user_prompt(context: &str, question: &str) -> String {
        let context = if context.is_empty() {
            EMPTY_CONTEXT
        } else {
            context
        };

        format!(
            "CONTEXT:\n{context}\n\nQUESTION: {question}\n\nAnswer in markdown.",
            context = context,
            question = question
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChunkMetadata;
    use chrono::Utc;

    fn record(text: &str, page: Option<u32>) -> ScoredRecord {
        ScoredRecord {
            text: text.to_string(),
            metadata: ChunkMetadata {
                source: "report.pdf".to_string(),
                source_id: "s1".to_string(),
                notebook_id: "n1".to_string(),
                upload_date: Utc::now(),
                page,
            },
            score: 0.9,
        }
    }

    #[test]
    fn context_annotates_each_chunk_with_its_source() {
        let context = PromptBuilder::build_context(&[
            record("First chunk.", Some(1)),
            record("Second chunk.", None),
        ]);

        assert_eq!(
            context,
            "First chunk.\n[Source: report.pdf, Page 1]\n\n\
             Second chunk.\n[Source: report.pdf]"
        );
    }

    #[test]
    fn empty_retrieval_produces_the_explicit_marker() {
        let context = PromptBuilder::build_context(&[]);
        assert!(context.is_empty());

        let prompt = PromptBuilder::user_prompt(&context, "What is X?");
        assert!(prompt.contains(EMPTY_CONTEXT));
        assert!(prompt.contains("QUESTION: What is X?"));
    }

    #[test]
    fn user_prompt_carries_the_literal_question_and_markdown_request() {
        let prompt = PromptBuilder::user_prompt("some context", "How does Y work?");
        assert!(prompt.contains("CONTEXT:\nsome context"));
        assert!(prompt.contains("QUESTION: How does Y work?"));
        assert!(prompt.contains("markdown"));
    }

    #[test]
    fn system_prompt_mandates_grounding_citations_and_refusal() {
        let system = PromptBuilder::system_prompt();
        assert!(system.contains("ONLY from the context"));
        assert!(system.contains("Cite the document name"));
        assert!(system.contains("politely"));
    }
}
