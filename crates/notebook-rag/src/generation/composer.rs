//! Answer composition over retrieved chunks

use futures_util::stream::BoxStream;
use std::sync::Arc;

use crate::error::Result;
use crate::index::ScoredRecord;
use crate::providers::LlmProvider;

use super::prompt::PromptBuilder;

/// Composes a grounded, cited answer from retrieved chunks.
///
/// Citations come only from chunk metadata; the composer never invents
/// them. When retrieval is empty the prompt is still sent, with an explicit
/// no-context marker, so the refusal wording stays model-owned.
pub struct AnswerComposer {
    llm: Arc<dyn LlmProvider>,
}

impl AnswerComposer {
    /// Create a composer over the injected generation provider
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Compose a complete answer
    pub async fn compose(&self, question: &str, retrieved: &[ScoredRecord]) -> Result<String> {
        let context = PromptBuilder::build_context(retrieved);
        let user = PromptBuilder::user_prompt(&context, question);
        self.llm.generate(PromptBuilder::system_prompt(), &user).await
    }

    /// Compose an answer as a lazy stream of text fragments. Dropping the
    /// stream stops fragment production and releases the model call.
    pub async fn compose_stream(
        &self,
        question: &str,
        retrieved: &[ScoredRecord],
    ) -> Result<BoxStream<'static, Result<String>>> {
        let context = PromptBuilder::build_context(retrieved);
        let user = PromptBuilder::user_prompt(&context, question);
        self.llm
            .generate_stream(PromptBuilder::system_prompt(), &user)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use futures_util::StreamExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::generation::EMPTY_CONTEXT;
    use crate::types::ChunkMetadata;

    /// Fake LLM that records the prompts it was called with
    #[derive(Default)]
    struct RecordingLlm {
        calls: Mutex<Vec<(String, String)>>,
        fragments_produced: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl LlmProvider for RecordingLlm {
        async fn generate(&self, system: &str, user: &str) -> Result<String> {
            self.calls
                .lock()
                .expect("lock")
                .push((system.to_string(), user.to_string()));
            Ok("a grounded answer".to_string())
        }

        async fn generate_stream(
            &self,
            system: &str,
            user: &str,
        ) -> Result<BoxStream<'static, Result<String>>> {
            self.calls
                .lock()
                .expect("lock")
                .push((system.to_string(), user.to_string()));

            // Unbounded lazy fragment source; the counter observes how many
            // fragments were actually produced.
            let counter = Arc::clone(&self.fragments_produced);
            let stream = futures_util::stream::unfold(0u32, move |i| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Some((Ok(format!("fragment-{}", i)), i + 1))
                }
            });
            Ok(stream.boxed())
        }

        fn name(&self) -> &str {
            "recording"
        }

        fn model(&self) -> &str {
            "fake-model"
        }
    }

    fn record(text: &str) -> ScoredRecord {
        ScoredRecord {
            text: text.to_string(),
            metadata: ChunkMetadata {
                source: "guide.pdf".to_string(),
                source_id: "s1".to_string(),
                notebook_id: "n1".to_string(),
                upload_date: Utc::now(),
                page: Some(3),
            },
            score: 0.8,
        }
    }

    #[tokio::test]
    async fn compose_sends_context_and_question_to_the_model() {
        let llm = Arc::new(RecordingLlm::default());
        let composer = AnswerComposer::new(Arc::clone(&llm) as Arc<dyn LlmProvider>);

        let answer = composer
            .compose("What is X?", &[record("X is defined here.")])
            .await
            .expect("compose");
        assert_eq!(answer, "a grounded answer");

        let calls = llm.calls.lock().expect("lock");
        let (system, user) = &calls[0];
        assert!(system.contains("ONLY from the context"));
        assert!(user.contains("X is defined here."));
        assert!(user.contains("[Source: guide.pdf, Page 3]"));
        assert!(user.contains("QUESTION: What is X?"));
    }

    #[tokio::test]
    async fn empty_retrieval_still_invokes_the_model_with_the_marker() {
        let llm = Arc::new(RecordingLlm::default());
        let composer = AnswerComposer::new(Arc::clone(&llm) as Arc<dyn LlmProvider>);

        let answer = composer.compose("What is X?", &[]).await.expect("compose");
        assert_eq!(answer, "a grounded answer");

        let calls = llm.calls.lock().expect("lock");
        assert_eq!(calls.len(), 1, "the model must be invoked even with no context");
        assert!(calls[0].1.contains(EMPTY_CONTEXT));
    }

    #[tokio::test]
    async fn dropping_the_stream_stops_fragment_production() {
        let llm = Arc::new(RecordingLlm::default());
        let composer = AnswerComposer::new(Arc::clone(&llm) as Arc<dyn LlmProvider>);

        let stream = composer
            .compose_stream("What is X?", &[record("context")])
            .await
            .expect("stream");

        // Consume two fragments, then drop the stream like a disconnected
        // client would.
        let taken: Vec<Result<String>> = stream.take(2).collect().await;
        assert_eq!(taken.len(), 2);

        assert_eq!(
            llm.fragments_produced.load(Ordering::SeqCst),
            2,
            "no fragments may be produced after the consumer is gone"
        );
    }
}
