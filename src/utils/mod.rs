pub mod email;
pub mod http_client;
