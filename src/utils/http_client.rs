use reqwest::Client;
use std::time::Duration;

use crate::error::AppError;

/// Shared HTTP client for provider calls.
///
/// `request_timeout` bounds a whole request, including reading the body.
pub fn new_api_client(request_timeout: Duration) -> Result<Client, AppError> {
    Client::builder()
        .timeout(request_timeout)
        .connect_timeout(Duration::from_secs(10))
        // Below the provider's keep-alive so stale pooled connections are not reused
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))
}
