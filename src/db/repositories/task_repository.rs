use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{NewTask, Task, TaskUpdate};

/// Task store. Ownership is checked against the parent project by callers.
#[derive(Clone, Default)]
pub struct TaskRepository {
    tasks: Arc<DashMap<Uuid, Task>>,
}

impl TaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, project_id: Uuid, new_task: NewTask) -> Task {
        let task = Task::new(project_id, new_task);
        self.tasks.insert(task.id, task.clone());
        task
    }

    pub fn get(&self, task_id: &Uuid) -> Option<Task> {
        self.tasks.get(task_id).map(|entry| entry.value().clone())
    }

    /// Tasks of one project, oldest first.
    pub fn list_for_project(&self, project_id: &Uuid) -> Vec<Task> {
        self.list_for_projects(std::slice::from_ref(project_id))
    }

    pub fn list_for_projects(&self, project_ids: &[Uuid]) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|entry| project_ids.contains(&entry.project_id))
            .map(|entry| entry.value().clone())
            .collect();
        tasks.sort_by_key(|t| t.created_at);
        tasks
    }

    pub fn update(&self, task_id: &Uuid, update: TaskUpdate) -> Option<Task> {
        let mut entry = self.tasks.get_mut(task_id)?;
        entry.apply(update);
        Some(entry.value().clone())
    }

    pub fn delete(&self, task_id: &Uuid) -> Option<Task> {
        self.tasks.remove(task_id).map(|(_, task)| task)
    }

    /// Drop every task of a project; returns how many were removed.
    pub fn delete_for_project(&self, project_id: &Uuid) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|_, task| task.project_id != *project_id);
        before - self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            ..NewTask::default()
        }
    }

    #[test]
    fn test_tasks_are_grouped_by_project() {
        let repo = TaskRepository::new();
        let garden = Uuid::new_v4();
        let other = Uuid::new_v4();
        repo.create(garden, new_task("one"));
        repo.create(garden, new_task("two"));
        repo.create(other, new_task("three"));

        assert_eq!(repo.list_for_project(&garden).len(), 2);
        assert_eq!(repo.list_for_projects(&[garden, other]).len(), 3);
        assert_eq!(repo.delete_for_project(&garden), 2);
        assert!(repo.list_for_project(&garden).is_empty());
        assert_eq!(repo.list_for_project(&other).len(), 1);
    }

    #[test]
    fn test_update_and_delete() {
        let repo = TaskRepository::new();
        let task = repo.create(Uuid::new_v4(), new_task("one"));

        let updated = repo
            .update(
                &task.id,
                TaskUpdate {
                    status: Some(TaskStatus::InProgress),
                    ..TaskUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.status, TaskStatus::InProgress);

        assert!(repo.delete(&task.id).is_some());
        assert!(repo.get(&task.id).is_none());
        assert!(repo.update(&task.id, TaskUpdate::default()).is_none());
    }
}
