pub mod ai_handlers;
pub mod health;
pub mod project_handlers;
pub mod task_handlers;
pub mod user_handlers;
pub mod waitlist_handlers;

use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Parse an id taken from the URL path.
pub(crate) fn parse_path_id(raw: &str, what: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::BadRequest(format!("Invalid {} ID: {}", what, raw)))
}

/// Treat missing and whitespace-only strings alike.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
