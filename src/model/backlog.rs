use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A quick-captured item awaiting triage into a quadrant. Same shape as a
/// task minus quadrant, status, and completion stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacklogItem {
    pub id: Uuid,
    pub content: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub urls: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl BacklogItem {
    pub fn new(content: String) -> Self {
        BacklogItem {
            id: Uuid::new_v4(),
            content,
            labels: Vec::new(),
            urls: Vec::new(),
            created_at: Utc::now(),
        }
    }
}
