use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of the four priority quadrants of the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    #[serde(rename = "urgent-important")]
    UrgentImportant,
    #[serde(rename = "not-urgent-important")]
    NotUrgentImportant,
    #[serde(rename = "urgent-not-important")]
    UrgentNotImportant,
    #[serde(rename = "not-urgent-not-important")]
    NotUrgentNotImportant,
}

impl Quadrant {
    /// Derive the quadrant from the two priority axes
    pub fn derive(urgent: bool, important: bool) -> Quadrant {
        match (urgent, important) {
            (true, true) => Quadrant::UrgentImportant,
            (false, true) => Quadrant::NotUrgentImportant,
            (true, false) => Quadrant::UrgentNotImportant,
            (false, false) => Quadrant::NotUrgentNotImportant,
        }
    }

    /// The storage key for this quadrant
    pub fn key(self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "urgent-important",
            Quadrant::NotUrgentImportant => "not-urgent-important",
            Quadrant::UrgentNotImportant => "urgent-not-important",
            Quadrant::NotUrgentNotImportant => "not-urgent-not-important",
        }
    }

    /// Parse a storage key into a quadrant
    pub fn from_key(s: &str) -> Option<Quadrant> {
        match s {
            "urgent-important" => Some(Quadrant::UrgentImportant),
            "not-urgent-important" => Some(Quadrant::NotUrgentImportant),
            "urgent-not-important" => Some(Quadrant::UrgentNotImportant),
            "not-urgent-not-important" => Some(Quadrant::NotUrgentNotImportant),
            _ => None,
        }
    }

    /// Display name shown in board headers
    pub fn display_name(self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "DO FIRST",
            Quadrant::NotUrgentImportant => "SCHEDULE",
            Quadrant::UrgentNotImportant => "DELEGATE",
            Quadrant::NotUrgentNotImportant => "ELIMINATE",
        }
    }

    /// All quadrants in display order
    pub fn all() -> [Quadrant; 4] {
        [
            Quadrant::UrgentImportant,
            Quadrant::NotUrgentImportant,
            Quadrant::UrgentNotImportant,
            Quadrant::NotUrgentNotImportant,
        ]
    }
}

/// Task status while on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "todo")]
    Todo,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "done")]
    Done,
}

impl TaskStatus {
    /// Badge text shown next to a task
    pub fn badge(self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }
}

/// A task on the board (active) or in the archive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque unique id, assigned at creation
    pub id: Uuid,
    /// Free-text description, never empty
    pub content: String,
    /// Priority quadrant
    pub quadrant: Quadrant,
    /// Labels (without the `#` prefix), insertion order preserved
    #[serde(default)]
    pub labels: Vec<String>,
    /// Attached links, insertion order preserved
    #[serde(default)]
    pub urls: Vec<String>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    /// Set when the task is archived, cleared on restore
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new todo task in the given quadrant
    pub fn new(content: String, quadrant: Quadrant) -> Self {
        Task {
            id: Uuid::new_v4(),
            content,
            quadrant,
            labels: Vec::new(),
            urls: Vec::new(),
            status: TaskStatus::Todo,
            created_at: Utc::now(),
            completed_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_quadrant_table() {
        assert_eq!(Quadrant::derive(true, true), Quadrant::UrgentImportant);
        assert_eq!(Quadrant::derive(false, true), Quadrant::NotUrgentImportant);
        assert_eq!(Quadrant::derive(true, false), Quadrant::UrgentNotImportant);
        assert_eq!(
            Quadrant::derive(false, false),
            Quadrant::NotUrgentNotImportant
        );
    }

    #[test]
    fn test_quadrant_key_round_trip() {
        for q in Quadrant::all() {
            assert_eq!(Quadrant::from_key(q.key()), Some(q));
        }
        assert_eq!(Quadrant::from_key("somewhere-else"), None);
    }

    #[test]
    fn test_task_serde_wire_shape() {
        let task = Task::new("Buy milk".into(), Quadrant::UrgentImportant);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["content"], "Buy milk");
        assert_eq!(json["quadrant"], "urgent-important");
        assert_eq!(json["status"], "todo");
        // completedAt absent until archived
        assert!(json.get("completedAt").is_none());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        let s: TaskStatus = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(s, TaskStatus::Done);
    }
}
