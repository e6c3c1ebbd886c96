pub mod settings;

use tracing::info;

pub use settings::{AppSettings, LlmConfig};

/// Initialize application configuration
pub fn init_config() -> Result<AppSettings, crate::error::AppError> {
    info!("Initializing application configuration from environment");
    AppSettings::from_env()
}
