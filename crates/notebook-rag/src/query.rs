//! Query pipeline: retrieve, then compose
//!
//! One run per user question, blocking or streaming. Nothing is persisted;
//! chat history is accepted at the HTTP boundary but does not reach
//! retrieval or prompting.

use futures_util::stream::BoxStream;

use crate::error::Result;
use crate::generation::AnswerComposer;
use crate::retrieval::Retriever;

/// Orchestrates the retrieval-augmented answering flow
pub struct QueryPipeline {
    retriever: Retriever,
    composer: AnswerComposer,
}

impl QueryPipeline {
    /// Create a pipeline over the injected providers
    pub fn new(retriever: Retriever, composer: AnswerComposer) -> Self {
        Self {
            retriever,
            composer,
        }
    }

    /// Answer a question from the given notebook, returning the complete
    /// answer
    pub async fn answer(&self, question: &str, notebook_id: &str, k: usize) -> Result<String> {
        let retrieved = self.retriever.retrieve(question, notebook_id, k).await?;
        self.composer.compose(question, &retrieved).await
    }

    /// Answer a question as a lazy stream of text fragments
    pub async fn answer_stream(
        &self,
        question: &str,
        notebook_id: &str,
        k: usize,
    ) -> Result<BoxStream<'static, Result<String>>> {
        let retrieved = self.retriever.retrieve(question, notebook_id, k).await?;
        self.composer.compose_stream(question, &retrieved).await
    }
}
