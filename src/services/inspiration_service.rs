use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::generation::{Draft, DraftGenerator, GenerationError, ProjectLookup, Tone};

/// Caller-facing entry point for task drafting.
///
/// Validates and resolves the project before any provider call is made,
/// then hands the project context to the draft generator.
#[derive(Clone)]
pub struct InspirationService {
    projects: Arc<dyn ProjectLookup>,
    generator: DraftGenerator,
}

/// Parse the raw project id from a request body.
pub fn parse_project_id(raw: Option<&str>) -> Result<Uuid, GenerationError> {
    let raw = raw
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(GenerationError::MissingProjectId)?;

    Uuid::parse_str(raw).map_err(|_| GenerationError::InvalidProjectId(raw.to_string()))
}

impl InspirationService {
    pub fn new(projects: Arc<dyn ProjectLookup>, generator: DraftGenerator) -> Self {
        Self {
            projects,
            generator,
        }
    }

    #[instrument(skip(self, project_id, hint), fields(user_id = %owner_id, tone = %tone))]
    pub async fn generate(
        &self,
        owner_id: Uuid,
        project_id: Option<&str>,
        tone: Tone,
        hint: Option<&str>,
    ) -> Result<Draft, GenerationError> {
        let project_id = parse_project_id(project_id)?;

        let project = self
            .projects
            .find_owned_project(project_id, owner_id)
            .await
            .inspect_err(|e| warn!(project_id = %project_id, error = %e, "Project lookup failed"))?;

        let draft = self.generator.generate_draft(&project, tone, hint).await?;

        info!(project_id = %project_id, url_count = draft.urls.len(), "Task draft ready");
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::ProjectRepository;
    use crate::generation::generator::tests::ScriptedProvider;
    use crate::generation::GenerationConfig;
    use crate::models::{Project, ProjectType};

    struct Fixture {
        service: InspirationService,
        provider: Arc<ScriptedProvider>,
        owner: Uuid,
        project_id: String,
    }

    fn fixture(provider: ScriptedProvider) -> Fixture {
        let repo = ProjectRepository::new();
        let owner = Uuid::new_v4();
        let project = repo.create(Project::new(
            owner,
            "Midnight Garden".to_string(),
            Some("a fantasy novella".to_string()),
            ProjectType::Freestyle,
        ));
        let provider = Arc::new(provider);
        let generator = DraftGenerator::new(provider.clone(), GenerationConfig::default());

        Fixture {
            service: InspirationService::new(Arc::new(repo), generator),
            provider,
            owner,
            project_id: project.id.to_string(),
        }
    }

    #[test]
    fn test_parse_project_id() {
        assert!(matches!(parse_project_id(None), Err(GenerationError::MissingProjectId)));
        assert!(matches!(parse_project_id(Some("  ")), Err(GenerationError::MissingProjectId)));
        assert!(matches!(parse_project_id(Some("P1")), Err(GenerationError::InvalidProjectId(_))));
        let id = Uuid::new_v4();
        assert_eq!(parse_project_id(Some(&id.to_string())).unwrap(), id);
    }

    #[tokio::test]
    async fn test_generate_for_owned_project() {
        let f = fixture(ScriptedProvider::replying("Map the garden at night.", "\"Night Map\""));
        let draft = f
            .service
            .generate(f.owner, Some(&f.project_id), Tone::Creative, Some("finish the short story"))
            .await
            .unwrap();

        assert_eq!(draft.title, "Night Map");
        assert_eq!(draft.description, "Map the garden at night.");
        assert!(draft.is_ai_generated);
    }

    #[tokio::test]
    async fn test_validation_happens_before_provider_calls() {
        let f = fixture(ScriptedProvider::replying("unused", "unused"));

        let missing = f.service.generate(f.owner, None, Tone::General, None).await;
        assert!(matches!(missing, Err(GenerationError::MissingProjectId)));

        let unknown = Uuid::new_v4().to_string();
        let not_found = f.service.generate(f.owner, Some(&unknown), Tone::General, None).await;
        assert!(matches!(not_found, Err(GenerationError::ProjectNotFound)));

        let foreign = f
            .service
            .generate(Uuid::new_v4(), Some(&f.project_id), Tone::General, None)
            .await;
        assert!(matches!(foreign, Err(GenerationError::Unauthorized)));

        assert!(f.provider.prompts().is_empty());
    }
}
