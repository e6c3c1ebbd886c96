use async_trait::async_trait;
use uuid::Uuid;

use super::error::GenerationError;
use super::prompt::ProjectContext;

/// Resolves a project for generation with ownership already enforced.
///
/// Implementations report a missing project as `ProjectNotFound` and a
/// project owned by someone else as `Unauthorized`.
#[async_trait]
pub trait ProjectLookup: Send + Sync {
    async fn find_owned_project(
        &self,
        project_id: Uuid,
        owner_id: Uuid,
    ) -> Result<ProjectContext, GenerationError>;
}
