//! Inspiration Server Library
//!
//! Project and task tracking with AI-drafted task suggestions. Exported for
//! the server binary and the integration tests.

pub mod clients;
pub mod config;
pub mod db;
pub mod error;
pub mod generation;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::AppSettings;
pub use error::AppError;
