use actix_web::{get, web, HttpResponse};
use serde::Serialize;
use uuid::Uuid;

use crate::db::repositories::{ProjectRepository, TaskRepository};
use crate::error::AppResult;
use crate::models::{ApiResponse, AuthenticatedUser, Task, TaskStatus};

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub user_id: Uuid,
    pub total_projects: usize,
    pub pending_tasks: usize,
    pub in_progress_tasks: usize,
    pub completed_tasks: usize,
    pub ai_generated_tasks: usize,
}

fn tally(user_id: Uuid, total_projects: usize, tasks: &[Task]) -> UserStats {
    let with_status = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count();

    UserStats {
        user_id,
        total_projects,
        pending_tasks: with_status(TaskStatus::Pending),
        in_progress_tasks: with_status(TaskStatus::InProgress),
        completed_tasks: with_status(TaskStatus::Completed),
        ai_generated_tasks: tasks.iter().filter(|t| t.is_ai_generated).count(),
    }
}

#[get("/stats")]
pub async fn get_user_stats(
    user: AuthenticatedUser,
    projects: web::Data<ProjectRepository>,
    tasks: web::Data<TaskRepository>,
) -> AppResult<HttpResponse> {
    let project_ids: Vec<Uuid> = projects
        .list_for_user(&user.user_id)
        .into_iter()
        .map(|p| p.id)
        .collect();
    let user_tasks = tasks.list_for_projects(&project_ids);

    Ok(HttpResponse::Ok().json(ApiResponse::ok(tally(
        user.user_id,
        project_ids.len(),
        &user_tasks,
    ))))
}
