use async_trait::async_trait;

use super::error::ProviderError;

/// A language model that turns a prompt into generated text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate at most `max_output_tokens` tokens for `prompt`.
    ///
    /// A response without any text content yields an empty string rather than an error.
    async fn complete(&self, prompt: &str, max_output_tokens: u32) -> Result<String, ProviderError>;

    /// Name used in logs.
    fn name(&self) -> &str {
        "completion-provider"
    }
}
