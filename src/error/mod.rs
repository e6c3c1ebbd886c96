use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;

use crate::generation::GenerationError;

#[derive(Debug)]
pub enum AppError {
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    BadRequest(String),
    Configuration(String),
    Validation(String),
    External(String),
}

#[derive(Serialize, Deserialize)]
struct ErrorResponse {
    success: bool,
    code: u16,
    message: String,
    error_type: String,
}

impl AppError {
    fn error_type(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Forbidden(_) => "forbidden",
            AppError::NotFound(_) => "not_found",
            AppError::BadRequest(_) => "bad_request",
            AppError::Configuration(_) => "configuration_error",
            AppError::Validation(_) => "validation_error",
            AppError::External(_) => "external_service_error",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthorized(e) => write!(f, "Unauthorized: {}", e),
            AppError::Forbidden(e) => write!(f, "Forbidden: {}", e),
            AppError::NotFound(e) => write!(f, "Not found: {}", e),
            AppError::BadRequest(e) => write!(f, "Bad request: {}", e),
            AppError::Configuration(e) => write!(f, "Configuration error: {}", e),
            AppError::Validation(e) => write!(f, "Validation error: {}", e),
            AppError::External(e) => write!(f, "External service error: {}", e),
        }
    }
}

impl StdError for AppError {}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        let error_response = ErrorResponse {
            success: false,
            code: status_code.as_u16(),
            message: self.to_string(),
            error_type: self.error_type().to_string(),
        };

        HttpResponse::build(status_code).json(error_response)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::External(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<GenerationError> for AppError {
    fn from(error: GenerationError) -> Self {
        match error {
            GenerationError::MissingProjectId => {
                AppError::Validation("Project ID is required".to_string())
            }
            GenerationError::InvalidProjectId(id) => {
                AppError::Validation(format!("Invalid project ID: {}", id))
            }
            GenerationError::ProjectNotFound => AppError::NotFound("Project not found".to_string()),
            GenerationError::Unauthorized => {
                AppError::Forbidden("Project does not belong to the current user".to_string())
            }
            // Provider sub-causes are logged by the generator and never reach the caller
            GenerationError::Provider(_) | GenerationError::EmptyBody => {
                AppError::External("Failed to generate AI task".to_string())
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::ProviderError;

    #[test]
    fn test_generation_errors_split_into_client_and_upstream_failures() {
        let client_side = [
            GenerationError::MissingProjectId,
            GenerationError::InvalidProjectId("abc".to_string()),
            GenerationError::ProjectNotFound,
            GenerationError::Unauthorized,
        ];
        for error in client_side {
            let status = AppError::from(error).status_code();
            assert!(status.is_client_error(), "expected 4xx, got {}", status);
        }

        let upstream = [
            GenerationError::Provider(ProviderError::Timeout(30)),
            GenerationError::EmptyBody,
        ];
        for error in upstream {
            let status = AppError::from(error).status_code();
            assert_eq!(status, StatusCode::BAD_GATEWAY);
        }
    }

    #[test]
    fn test_provider_details_are_not_exposed() {
        let error = GenerationError::Provider(ProviderError::Status {
            status: 429,
            body: "quota exceeded for org-secret".to_string(),
        });
        let message = AppError::from(error).to_string();
        assert!(message.contains("Failed to generate AI task"));
        assert!(!message.contains("org-secret"));
    }
}
