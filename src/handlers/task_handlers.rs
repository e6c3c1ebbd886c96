use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::repositories::{ProjectRepository, TaskRepository};
use crate::error::{AppError, AppResult};
use crate::models::{ApiResponse, AuthenticatedUser, NewTask, Task, TaskStatus, TaskUpdate};

use super::{non_blank, parse_path_id};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksQuery {
    pub project_id: Option<String>,
}

/// Accepts both hand-written tasks and the payload shaped from an AI draft.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<String>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_ai_generated: Option<bool>,
    pub urls: Option<Vec<String>>,
}

fn required_project_id(raw: Option<String>) -> AppResult<Uuid> {
    let raw = non_blank(raw)
        .ok_or_else(|| AppError::BadRequest("Project ID is required".to_string()))?;
    parse_path_id(&raw, "project")
}

/// Persist a task under a project the caller owns.
pub(crate) fn create_owned_task(
    projects: &ProjectRepository,
    tasks: &TaskRepository,
    user: &AuthenticatedUser,
    project_id: Uuid,
    new_task: NewTask,
) -> AppResult<Task> {
    let task = projects
        .with_owned(&project_id, &user.user_id, |_| tasks.create(project_id, new_task))
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
    info!(
        "Created task {} in project {} (ai_generated: {})",
        task.id, project_id, task.is_ai_generated
    );
    Ok(task)
}

/// Load a task and make sure its project belongs to the caller.
fn owned_task(
    projects: &ProjectRepository,
    tasks: &TaskRepository,
    user: &AuthenticatedUser,
    raw_id: &str,
) -> AppResult<Task> {
    let task_id = parse_path_id(raw_id, "task")?;
    let task = tasks
        .get(&task_id)
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

    if projects.find_owned(&task.project_id, &user.user_id).is_none() {
        return Err(AppError::Unauthorized("Unauthorized".to_string()));
    }

    Ok(task)
}

#[get("")]
pub async fn list_tasks(
    user: AuthenticatedUser,
    query: web::Query<TasksQuery>,
    projects: web::Data<ProjectRepository>,
    tasks: web::Data<TaskRepository>,
) -> AppResult<HttpResponse> {
    let project_id = required_project_id(query.into_inner().project_id)?;

    projects
        .find_owned(&project_id, &user.user_id)
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    debug!("Listing tasks of project {}", project_id);
    Ok(HttpResponse::Ok().json(ApiResponse::ok(tasks.list_for_project(&project_id))))
}

#[post("")]
pub async fn create_task(
    user: AuthenticatedUser,
    payload: web::Json<CreateTaskRequest>,
    projects: web::Data<ProjectRepository>,
    tasks: web::Data<TaskRepository>,
) -> AppResult<HttpResponse> {
    let payload = payload.into_inner();

    let Some(title) = non_blank(payload.title) else {
        return Err(AppError::BadRequest(
            "Title and project ID are required".to_string(),
        ));
    };
    let project_id = required_project_id(payload.project_id)
        .map_err(|_| AppError::BadRequest("Title and project ID are required".to_string()))?;

    let new_task = NewTask {
        title,
        description: payload.description,
        status: payload.status,
        is_ai_generated: payload.is_ai_generated.unwrap_or(false),
        urls: payload.urls.unwrap_or_default(),
        due_date: payload.due_date,
    };

    let task = create_owned_task(&projects, &tasks, &user, project_id, new_task)?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(task)))
}

#[get("/{id}")]
pub async fn get_task(
    user: AuthenticatedUser,
    path: web::Path<String>,
    projects: web::Data<ProjectRepository>,
    tasks: web::Data<TaskRepository>,
) -> AppResult<HttpResponse> {
    let task = owned_task(&projects, &tasks, &user, &path)?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(task)))
}

#[put("/{id}")]
pub async fn update_task(
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<TaskUpdate>,
    projects: web::Data<ProjectRepository>,
    tasks: web::Data<TaskRepository>,
) -> AppResult<HttpResponse> {
    let task = owned_task(&projects, &tasks, &user, &path)?;
    let update = payload.into_inner();

    if matches!(&update.title, Some(title) if title.trim().is_empty()) {
        return Err(AppError::BadRequest("Title cannot be empty".to_string()));
    }

    let updated = tasks
        .update(&task.id, update)
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(updated)))
}

#[delete("/{id}")]
pub async fn delete_task(
    user: AuthenticatedUser,
    path: web::Path<String>,
    projects: web::Data<ProjectRepository>,
    tasks: web::Data<TaskRepository>,
) -> AppResult<HttpResponse> {
    let task = owned_task(&projects, &tasks, &user, &path)?;
    tasks.delete(&task.id);
    info!("Deleted task {}", task.id);

    Ok(HttpResponse::Ok().json(ApiResponse::ok(serde_json::json!({}))))
}
