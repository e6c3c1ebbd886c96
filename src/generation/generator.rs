use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, instrument, warn};

use crate::config::settings::LlmConfig;

use super::draft::Draft;
use super::error::{GenerationError, ProviderError};
use super::post_process::{clean_body, clean_title, CleanedBody, CleanedDraft};
use super::prompt::{build_prompt, build_title_prompt, ProjectContext};
use super::provider::CompletionProvider;
use super::tone::Tone;

pub const DEFAULT_BODY_MAX_TOKENS: u32 = 200;
pub const DEFAULT_TITLE_MAX_TOKENS: u32 = 30;
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 30;

/// Per-call ceilings for the two completion calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationConfig {
    pub body_max_tokens: u32,
    pub title_max_tokens: u32,
    pub call_timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            body_max_tokens: DEFAULT_BODY_MAX_TOKENS,
            title_max_tokens: DEFAULT_TITLE_MAX_TOKENS,
            call_timeout: Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS),
        }
    }
}

impl From<&LlmConfig> for GenerationConfig {
    fn from(config: &LlmConfig) -> Self {
        Self {
            body_max_tokens: config.body_max_tokens,
            title_max_tokens: config.title_max_tokens,
            call_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

/// Drafts a task in two dependent completion calls: the body first, then a
/// title derived from the cleaned body.
///
/// Holds no per-request state, so one instance is shared by all handlers.
#[derive(Clone)]
pub struct DraftGenerator {
    provider: Arc<dyn CompletionProvider>,
    config: GenerationConfig,
}

impl DraftGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>, config: GenerationConfig) -> Self {
        Self { provider, config }
    }

    #[instrument(skip(self, project, tone, hint), fields(provider = %self.provider.name(), tone = %tone))]
    pub async fn generate_draft(
        &self,
        project: &ProjectContext,
        tone: Tone,
        hint: Option<&str>,
    ) -> Result<Draft, GenerationError> {
        let prompt = build_prompt(project, tone, hint);

        let body = self.draft_body(&prompt).await?;
        let title = self.draft_title(&body).await?;

        info!(
            title_length = title.len(),
            description_length = body.description.len(),
            url_count = body.urls.len(),
            "Generated task draft"
        );

        Ok(Draft::from(CleanedDraft {
            title,
            description: body.description,
            urls: body.urls,
        }))
    }

    /// First step: generate the task body and pull its links out.
    pub async fn draft_body(&self, prompt: &str) -> Result<CleanedBody, GenerationError> {
        let raw_body = self
            .complete_bounded(prompt, self.config.body_max_tokens, "body")
            .await?;

        let body = clean_body(&raw_body);
        if body.description.is_empty() {
            warn!(
                raw_length = raw_body.len(),
                "Provider returned no usable task body"
            );
            return Err(GenerationError::EmptyBody);
        }

        Ok(body)
    }

    /// Second step: derive a title from the cleaned body. An empty title is
    /// returned as is; defaulting it is up to the caller.
    pub async fn draft_title(&self, body: &CleanedBody) -> Result<String, GenerationError> {
        let prompt = build_title_prompt(&body.description);
        let raw_title = self
            .complete_bounded(&prompt, self.config.title_max_tokens, "title")
            .await?;

        Ok(clean_title(&raw_title))
    }

    async fn complete_bounded(
        &self,
        prompt: &str,
        max_output_tokens: u32,
        step: &'static str,
    ) -> Result<String, GenerationError> {
        let call = self.provider.complete(prompt, max_output_tokens);

        let result = match tokio::time::timeout(self.config.call_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.config.call_timeout.as_secs())),
        };

        result.map_err(|e| {
            error!(step = %step, error = %e, "Completion call failed");
            GenerationError::Provider(e)
        })
    }
}
