use actix_web::{delete, get, post, put, web, HttpResponse};
use log::{debug, info};
use serde::Deserialize;

use crate::db::repositories::{ProjectRepository, ProjectUpdate, TaskRepository};
use crate::error::{AppError, AppResult};
use crate::models::{ApiResponse, AuthenticatedUser, Project, ProjectType};

use super::{non_blank, parse_path_id};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<String>,
}

fn parse_project_type(raw: &str) -> AppResult<ProjectType> {
    raw.parse::<ProjectType>()
        .map_err(|_| AppError::BadRequest("Title and valid project type are required".to_string()))
}

/// List the caller's projects
#[get("")]
pub async fn list_projects(
    user: AuthenticatedUser,
    projects: web::Data<ProjectRepository>,
) -> AppResult<HttpResponse> {
    debug!("Listing projects for user: {}", user.user_id);
    Ok(HttpResponse::Ok().json(ApiResponse::ok(projects.list_for_user(&user.user_id))))
}

/// Create a project owned by the caller
#[post("")]
pub async fn create_project(
    user: AuthenticatedUser,
    payload: web::Json<CreateProjectRequest>,
    projects: web::Data<ProjectRepository>,
) -> AppResult<HttpResponse> {
    let payload = payload.into_inner();

    let (Some(title), Some(raw_type)) = (non_blank(payload.title), payload.project_type) else {
        return Err(AppError::BadRequest(
            "Title and valid project type are required".to_string(),
        ));
    };
    let project_type = parse_project_type(&raw_type)?;

    let project = projects.create(Project::new(
        user.user_id,
        title,
        non_blank(payload.description),
        project_type,
    ));
    info!("Created project {} for user {}", project.id, user.user_id);

    Ok(HttpResponse::Created().json(ApiResponse::ok(project)))
}

#[get("/{id}")]
pub async fn get_project(
    user: AuthenticatedUser,
    path: web::Path<String>,
    projects: web::Data<ProjectRepository>,
) -> AppResult<HttpResponse> {
    let project_id = parse_path_id(&path, "project")?;
    let project = projects
        .find_owned(&project_id, &user.user_id)
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(project)))
}

#[put("/{id}")]
pub async fn update_project(
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateProjectRequest>,
    projects: web::Data<ProjectRepository>,
) -> AppResult<HttpResponse> {
    let project_id = parse_path_id(&path, "project")?;
    let payload = payload.into_inner();

    let project_type = payload
        .project_type
        .as_deref()
        .map(parse_project_type)
        .transpose()?;

    if matches!(&payload.title, Some(title) if title.trim().is_empty()) {
        return Err(AppError::BadRequest("Title cannot be empty".to_string()));
    }

    let update = ProjectUpdate {
        title: non_blank(payload.title),
        description: payload.description.map(|d| non_blank(Some(d))),
        project_type,
    };

    let project = projects
        .update(&project_id, &user.user_id, update)
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(project)))
}

/// Delete a project together with its tasks
#[delete("/{id}")]
pub async fn delete_project(
    user: AuthenticatedUser,
    path: web::Path<String>,
    projects: web::Data<ProjectRepository>,
    tasks: web::Data<TaskRepository>,
) -> AppResult<HttpResponse> {
    let project_id = parse_path_id(&path, "project")?;

    // Project first, then tasks: inserts hold the project entry, so nothing
    // can be added for it once it is gone.
    projects
        .delete(&project_id, &user.user_id)
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
    let removed = tasks.delete_for_project(&project_id);
    info!("Deleted project {} and {} task(s)", project_id, removed);

    Ok(HttpResponse::Ok().json(ApiResponse::ok(serde_json::json!({}))))
}
