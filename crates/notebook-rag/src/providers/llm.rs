//! LLM provider trait

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::error::Result;

/// Trait for generation-model access.
///
/// Prompts arrive as a system instruction plus a user turn; generation runs
/// at the configured temperature (zero for citation answers).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a complete answer
    async fn generate(&self, system: &str, user: &str) -> Result<String>;

    /// Generate an answer as a lazy stream of text fragments.
    ///
    /// The stream is finite and non-restartable; dropping it releases the
    /// underlying model call.
    async fn generate_stream(
        &self,
        system: &str,
        user: &str,
    ) -> Result<BoxStream<'static, Result<String>>>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// The model being used
    fn model(&self) -> &str;
}
