use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::generation::ProjectContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Structured,
    Freestyle,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Structured => "structured",
            ProjectType::Freestyle => "freestyle",
        }
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "structured" => Ok(ProjectType::Structured),
            "freestyle" => Ok(ProjectType::Freestyle),
            other => Err(format!("unknown project type '{}'", other)),
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn new(
        user_id: Uuid,
        title: String,
        description: Option<String>,
        project_type: ProjectType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            project_type,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// The fields task drafting is allowed to see.
    pub fn context(&self) -> ProjectContext {
        ProjectContext {
            title: self.title.clone(),
            project_type: self.project_type,
            description: self.description.clone(),
        }
    }
}
