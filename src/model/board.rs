use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::task::Task;

/// The canonical persisted task collections: the active board plus the
/// archive of completed tasks. Active order is significant (it drives
/// display order and is what reordering mutates).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    #[serde(default)]
    pub active_tasks: Vec<Task>,
    #[serde(default)]
    pub completed_tasks: Vec<Task>,
}

impl Board {
    /// Find an active task by id
    pub fn find_active(&self, id: Uuid) -> Option<&Task> {
        self.active_tasks.iter().find(|t| t.id == id)
    }

    /// Find an active task by id, mutable
    pub fn find_active_mut(&mut self, id: Uuid) -> Option<&mut Task> {
        self.active_tasks.iter_mut().find(|t| t.id == id)
    }

    /// Find an archived task by id
    pub fn find_completed(&self, id: Uuid) -> Option<&Task> {
        self.completed_tasks.iter().find(|t| t.id == id)
    }

    /// True if any collection on the board contains the id
    pub fn contains(&self, id: Uuid) -> bool {
        self.find_active(id).is_some() || self.find_completed(id).is_some()
    }

    /// Archived tasks, newest completion first. The stored order is
    /// insertion order; display re-sorts at read time.
    pub fn completed_recent_first(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.completed_tasks.iter().collect();
        tasks.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        tasks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Quadrant;
    use chrono::{Duration, Utc};

    #[test]
    fn test_find_and_contains() {
        let mut board = Board::default();
        let task = Task::new("One".into(), Quadrant::UrgentImportant);
        let id = task.id;
        board.active_tasks.push(task);

        assert!(board.contains(id));
        assert_eq!(board.find_active(id).unwrap().content, "One");
        assert!(board.find_completed(id).is_none());
        assert!(!board.contains(Uuid::new_v4()));
    }

    #[test]
    fn test_completed_recent_first() {
        let mut board = Board::default();
        let now = Utc::now();
        for (content, age_days) in [("old", 3), ("new", 0), ("mid", 1)] {
            let mut task = Task::new(content.into(), Quadrant::NotUrgentImportant);
            task.completed_at = Some(now - Duration::days(age_days));
            board.completed_tasks.push(task);
        }

        let sorted = board.completed_recent_first();
        let contents: Vec<&str> = sorted.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["new", "mid", "old"]);
        // Stored order untouched
        assert_eq!(board.completed_tasks[0].content, "old");
    }

    #[test]
    fn test_board_serde_camel_case() {
        let board = Board::default();
        let json = serde_json::to_value(&board).unwrap();
        assert!(json.get("activeTasks").is_some());
        assert!(json.get("completedTasks").is_some());
    }

    #[test]
    fn test_board_deserialize_missing_keys() {
        // Old or hand-edited files may omit a collection
        let board: Board = serde_json::from_str(r#"{"activeTasks": []}"#).unwrap();
        assert!(board.completed_tasks.is_empty());
    }
}
