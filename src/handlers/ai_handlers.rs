//! AI task drafting endpoints.
//!
//! `generate-task` only returns a draft. Saving it is a separate call, either
//! `POST /api/tasks` with the draft fields or `accept-draft` below.

use actix_web::{post, web, HttpResponse};
use log::info;
use serde::Deserialize;

use crate::db::repositories::{ProjectRepository, TaskRepository};
use crate::error::{AppError, AppResult};
use crate::generation::{to_task_input, Draft, Tone};
use crate::models::{ApiResponse, AuthenticatedUser, NewTask};
use crate::services::inspiration_service::{parse_project_id, InspirationService};

use super::task_handlers::create_owned_task;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTaskRequest {
    pub project_id: Option<String>,
    pub tone: Option<String>,
    /// Older clients name the tone after the board block they clicked.
    pub block_type: Option<String>,
    pub hint: Option<String>,
}

impl GenerateTaskRequest {
    /// `tone` wins when a client sends both fields.
    pub fn requested_tone(&self) -> Tone {
        Tone::from(self.tone.as_deref().or(self.block_type.as_deref()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptDraftRequest {
    pub project_id: Option<String>,
    pub draft: Draft,
}

#[post("/generate-task")]
pub async fn generate_task(
    user: AuthenticatedUser,
    payload: web::Json<GenerateTaskRequest>,
    inspiration_service: web::Data<InspirationService>,
) -> AppResult<HttpResponse> {
    let payload = payload.into_inner();
    let tone = payload.requested_tone();

    info!("Generating {} task draft for user {}", tone, user.user_id);

    let draft = inspiration_service
        .generate(
            user.user_id,
            payload.project_id.as_deref(),
            tone,
            payload.hint.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(draft)))
}

/// Persist an accepted draft as a pending, AI-generated task
#[post("/accept-draft")]
pub async fn accept_draft(
    user: AuthenticatedUser,
    payload: web::Json<AcceptDraftRequest>,
    projects: web::Data<ProjectRepository>,
    tasks: web::Data<TaskRepository>,
) -> AppResult<HttpResponse> {
    let payload = payload.into_inner();
    let project_id = parse_project_id(payload.project_id.as_deref())?;

    if payload.draft.title.trim().is_empty() {
        return Err(AppError::BadRequest("Draft title is required".to_string()));
    }

    let input = to_task_input(&payload.draft, project_id);
    let task = create_owned_task(&projects, &tasks, &user, project_id, NewTask::from(input))?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(task)))
}
