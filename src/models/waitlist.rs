use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitlistStatus {
    #[default]
    Pending,
    Invited,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub email: String,
    pub signup_date: DateTime<Utc>,
    pub status: WaitlistStatus,
}

impl WaitlistEntry {
    pub fn new(email: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            signup_date: Utc::now(),
            status: WaitlistStatus::Pending,
        }
    }
}
