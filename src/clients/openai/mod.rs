pub mod client;
pub mod structs;

pub use client::OpenAIClient;
pub use structs::*;
