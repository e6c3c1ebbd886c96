pub mod inspiration_service;

pub use inspiration_service::InspirationService;
