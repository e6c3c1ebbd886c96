pub mod project_repository;
pub mod task_repository;
pub mod waitlist_repository;

pub use project_repository::{ProjectRepository, ProjectUpdate};
pub use task_repository::TaskRepository;
pub use waitlist_repository::{JoinOutcome, WaitlistRepository};
