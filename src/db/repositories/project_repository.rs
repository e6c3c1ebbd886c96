use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::generation::{GenerationError, ProjectContext, ProjectLookup};
use crate::models::{Project, ProjectType};

#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub title: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub project_type: Option<ProjectType>,
}

/// Owner-scoped project store.
#[derive(Clone, Default)]
pub struct ProjectRepository {
    projects: Arc<DashMap<Uuid, Project>>,
}

impl ProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, project: Project) -> Project {
        self.projects.insert(project.id, project.clone());
        project
    }

    /// Projects of one user, oldest first.
    pub fn list_for_user(&self, user_id: &Uuid) -> Vec<Project> {
        let mut projects: Vec<Project> = self
            .projects
            .iter()
            .filter(|entry| entry.user_id == *user_id)
            .map(|entry| entry.value().clone())
            .collect();
        projects.sort_by_key(|p| p.created_at);
        projects
    }

    /// Look a project up regardless of owner.
    pub fn get(&self, project_id: &Uuid) -> Option<Project> {
        self.projects.get(project_id).map(|entry| entry.value().clone())
    }

    /// Look a project up only if `user_id` owns it.
    pub fn find_owned(&self, project_id: &Uuid, user_id: &Uuid) -> Option<Project> {
        self.get(project_id).filter(|p| p.user_id == *user_id)
    }

    pub fn update(&self, project_id: &Uuid, user_id: &Uuid, update: ProjectUpdate) -> Option<Project> {
        let mut entry = self.projects.get_mut(project_id)?;
        if entry.user_id != *user_id {
            return None;
        }

        if let Some(title) = update.title {
            entry.title = title;
        }
        if let Some(description) = update.description {
            entry.description = description;
        }
        if let Some(project_type) = update.project_type {
            entry.project_type = project_type;
        }
        entry.updated_at = Utc::now();

        Some(entry.value().clone())
    }

    /// Run `f` against an owned project while holding its entry.
    ///
    /// `delete` must take the same entry for writing, so a project cannot be
    /// removed between the ownership check and whatever `f` inserts for it.
    pub fn with_owned<R>(
        &self,
        project_id: &Uuid,
        user_id: &Uuid,
        f: impl FnOnce(&Project) -> R,
    ) -> Option<R> {
        let entry = self.projects.get(project_id)?;
        if entry.user_id != *user_id {
            return None;
        }
        Some(f(entry.value()))
    }

    pub fn delete(&self, project_id: &Uuid, user_id: &Uuid) -> Option<Project> {
        self.projects
            .remove_if(project_id, |_, p| p.user_id == *user_id)
            .map(|(_, project)| project)
    }
}

#[async_trait]
impl ProjectLookup for ProjectRepository {
    async fn find_owned_project(
        &self,
        project_id: Uuid,
        owner_id: Uuid,
    ) -> Result<ProjectContext, GenerationError> {
        match self.get(&project_id) {
            Some(project) if project.user_id == owner_id => Ok(project.context()),
            Some(_) => Err(GenerationError::Unauthorized),
            None => Err(GenerationError::ProjectNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn novella(user_id: Uuid) -> Project {
        Project::new(
            user_id,
            "Midnight Garden".to_string(),
            Some("a fantasy novella".to_string()),
            ProjectType::Freestyle,
        )
    }

    #[test]
    fn test_owner_scoping() {
        let repo = ProjectRepository::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let project = repo.create(novella(owner));

        assert!(repo.find_owned(&project.id, &owner).is_some());
        assert!(repo.find_owned(&project.id, &stranger).is_none());
        assert_eq!(repo.list_for_user(&owner).len(), 1);
        assert!(repo.list_for_user(&stranger).is_empty());
        assert!(repo.update(&project.id, &stranger, ProjectUpdate::default()).is_none());
        assert!(repo.delete(&project.id, &stranger).is_none());
        assert!(repo.delete(&project.id, &owner).is_some());
        assert!(repo.get(&project.id).is_none());
    }

    #[test]
    fn test_partial_update() {
        let repo = ProjectRepository::new();
        let owner = Uuid::new_v4();
        let project = repo.create(novella(owner));

        let updated = repo
            .update(
                &project.id,
                &owner,
                ProjectUpdate {
                    project_type: Some(ProjectType::Structured),
                    ..ProjectUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.project_type, ProjectType::Structured);
        assert_eq!(updated.title, "Midnight Garden");
    }

    #[test]
    fn test_description_can_be_cleared() {
        let repo = ProjectRepository::new();
        let owner = Uuid::new_v4();
        let project = repo.create(novella(owner));

        let updated = repo
            .update(
                &project.id,
                &owner,
                ProjectUpdate {
                    description: Some(None),
                    ..ProjectUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.description, None);
    }

    #[test]
    fn test_with_owned_runs_only_for_owner() {
        let repo = ProjectRepository::new();
        let owner = Uuid::new_v4();
        let project = repo.create(novella(owner));

        assert_eq!(repo.with_owned(&project.id, &owner, |p| p.title.clone()).as_deref(), Some("Midnight Garden"));
        assert!(repo.with_owned(&project.id, &Uuid::new_v4(), |_| ()).is_none());
        assert!(repo.with_owned(&Uuid::new_v4(), &owner, |_| ()).is_none());
    }

    #[test]
    fn test_delete_waits_for_pending_insert() {
        use std::sync::mpsc;
        use std::thread;
        use std::time::Duration;

        let repo = ProjectRepository::new();
        let owner = Uuid::new_v4();
        let project = repo.create(novella(owner));
        let inserted = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let (entered_tx, entered_rx) = mpsc::channel();

        let writer = {
            let repo = repo.clone();
            let inserted = inserted.clone();
            thread::spawn(move || {
                repo.with_owned(&project.id, &owner, |_| {
                    entered_tx.send(()).unwrap();
                    thread::sleep(Duration::from_millis(50));
                    inserted.store(true, std::sync::atomic::Ordering::SeqCst);
                })
            })
        };

        entered_rx.recv().unwrap();
        assert!(repo.delete(&project.id, &owner).is_some());
        assert!(inserted.load(std::sync::atomic::Ordering::SeqCst));
        assert!(writer.join().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_lookup_distinguishes_missing_and_foreign() {
        let repo = ProjectRepository::new();
        let owner = Uuid::new_v4();
        let project = repo.create(novella(owner));

        let context = repo.find_owned_project(project.id, owner).await.unwrap();
        assert_eq!(context.title, "Midnight Garden");

        assert!(matches!(
            repo.find_owned_project(project.id, Uuid::new_v4()).await,
            Err(GenerationError::Unauthorized)
        ));
        assert!(matches!(
            repo.find_owned_project(Uuid::new_v4(), owner).await,
            Err(GenerationError::ProjectNotFound)
        ));
    }
}
