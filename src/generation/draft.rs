use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{NewTask, TaskStatus};

use super::post_process::CleanedDraft;

/// AI-authored task suggestion. Never stored by the generator itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub is_ai_generated: bool,
}

impl From<CleanedDraft> for Draft {
    fn from(cleaned: CleanedDraft) -> Self {
        Self {
            title: cleaned.title,
            description: cleaned.description,
            urls: cleaned.urls,
            is_ai_generated: true,
        }
    }
}

/// Payload accepted by task creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreateInput {
    pub title: String,
    pub description: String,
    pub project_id: Uuid,
    pub status: TaskStatus,
    pub is_ai_generated: bool,
    pub urls: Vec<String>,
}

/// Shape an accepted draft for task creation. Suggested tasks always start out pending.
pub fn to_task_input(draft: &Draft, project_id: Uuid) -> TaskCreateInput {
    TaskCreateInput {
        title: draft.title.clone(),
        description: draft.description.clone(),
        project_id,
        status: TaskStatus::Pending,
        is_ai_generated: true,
        urls: draft.urls.clone(),
    }
}

impl From<TaskCreateInput> for NewTask {
    fn from(input: TaskCreateInput) -> Self {
        NewTask {
            title: input.title,
            description: Some(input.description),
            status: Some(input.status),
            is_ai_generated: input.is_ai_generated,
            urls: input.urls,
            due_date: None,
        }
    }
}
