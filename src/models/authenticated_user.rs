use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::error::AppError;

/// Header the upstream session layer sets to the signed-in user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(user) = req.extensions().get::<AuthenticatedUser>() {
            return ready(Ok(*user));
        }

        let result = match req.headers().get(USER_ID_HEADER) {
            Some(value) => value
                .to_str()
                .ok()
                .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
                .map(|user_id| AuthenticatedUser { user_id })
                .ok_or_else(|| AppError::Unauthorized("Malformed user identity".to_string())),
            None => {
                log::debug!("No user identity on request to {}", req.path());
                Err(AppError::Unauthorized("Not authenticated".to_string()))
            }
        };

        ready(result)
    }
}
