use actix_web::web;
use crate::handlers;

/// Configures API routes that require a user identity.
/// Mounted under the "/api" scope in main.rs.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Project routes (/api/projects/*)
    cfg.service(
        web::scope("/projects")
            .service(handlers::project_handlers::list_projects)
            .service(handlers::project_handlers::create_project)
            .service(handlers::project_handlers::get_project)
            .service(handlers::project_handlers::update_project)
            .service(handlers::project_handlers::delete_project)
    );

    // Task routes (/api/tasks/*)
    cfg.service(
        web::scope("/tasks")
            .service(handlers::task_handlers::list_tasks)
            .service(handlers::task_handlers::create_task)
            .service(handlers::task_handlers::get_task)
            .service(handlers::task_handlers::update_task)
            .service(handlers::task_handlers::delete_task)
    );

    // AI drafting routes (/api/ai/*)
    cfg.service(
        web::scope("/ai")
            .service(handlers::ai_handlers::generate_task)
            .service(handlers::ai_handlers::accept_draft)
    );

    // User routes (/api/users/*)
    cfg.service(
        web::scope("/users")
            .service(handlers::user_handlers::get_user_stats)
    );
}

/// Configures public routes (not part of /api).
pub fn configure_public_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/waitlist")
            .service(handlers::waitlist_handlers::join_waitlist)
    );
}
