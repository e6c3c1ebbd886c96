pub mod api_response;
pub mod authenticated_user;
pub mod project;
pub mod task;
pub mod waitlist;

pub use api_response::ApiResponse;
pub use authenticated_user::AuthenticatedUser;
pub use project::{Project, ProjectType};
pub use task::{NewTask, Task, TaskStatus, TaskUpdate};
pub use waitlist::{WaitlistEntry, WaitlistStatus};
