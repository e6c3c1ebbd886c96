/// Failure of a single completion call against the language-model provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("completion call timed out after {0}s")]
    Timeout(u64),
    #[error("request to provider failed: {0}")]
    Transport(String),
    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

/// Everything that can abort a generation request.
///
/// The first four variants are caller mistakes and are detected before any
/// provider call is issued. `Provider` and `EmptyBody` are upstream failures.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("project id is required")]
    MissingProjectId,
    #[error("invalid project id: {0}")]
    InvalidProjectId(String),
    #[error("project not found")]
    ProjectNotFound,
    #[error("project does not belong to the requesting user")]
    Unauthorized,
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("provider returned an empty task body")]
    EmptyBody,
}

