use actix_web::{post, web, HttpResponse};
use log::info;
use serde::{Deserialize, Serialize};

use crate::db::repositories::{JoinOutcome, WaitlistRepository};
use crate::error::{AppError, AppResult};
use crate::utils::email::is_valid_email;

#[derive(Debug, Deserialize)]
pub struct JoinWaitlistRequest {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinWaitlistResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub already_exists: bool,
    pub message: String,
}

/// Public signup; no identity required
#[post("")]
pub async fn join_waitlist(
    payload: web::Json<JoinWaitlistRequest>,
    waitlist: web::Data<WaitlistRepository>,
) -> AppResult<HttpResponse> {
    let email = payload
        .into_inner()
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::BadRequest("Email is required".to_string()))?;

    if !is_valid_email(&email) {
        return Err(AppError::Validation("Email address is not valid".to_string()));
    }

    match waitlist.join(&email) {
        JoinOutcome::AlreadyListed(_) => Ok(HttpResponse::Ok().json(JoinWaitlistResponse {
            success: true,
            already_exists: true,
            message: "You're already on our waitlist! We'll notify you when spots open up."
                .to_string(),
        })),
        JoinOutcome::Joined(entry) => {
            info!("Waitlist signup {}", entry.id);
            Ok(HttpResponse::Created().json(JoinWaitlistResponse {
                success: true,
                already_exists: false,
                message: "Welcome to the waitlist! We'll notify you when spots open up."
                    .to_string(),
            }))
        }
    }
}
