use uuid::Uuid;

use crate::model::backlog::BacklogItem;
use crate::model::board::Board;
use crate::model::task::{Quadrant, Task, TaskStatus};

/// Error type for backlog operations
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BacklogError {
    #[error("backlog item content cannot be empty")]
    EmptyContent,
    #[error("backlog item not found: {0}")]
    NotFound(Uuid),
}

/// Capture an item into the backlog. Returns the assigned id.
pub fn capture(
    backlog: &mut Vec<BacklogItem>,
    content: String,
    labels: Vec<String>,
    urls: Vec<String>,
) -> Result<Uuid, BacklogError> {
    let content = content.trim().to_string();
    if content.is_empty() {
        return Err(BacklogError::EmptyContent);
    }

    let mut item = BacklogItem::new(content);
    item.labels = labels;
    item.urls = urls;
    let id = item.id;
    backlog.push(item);
    Ok(id)
}

/// Drop an item from the backlog. Returns whether anything was removed.
pub fn remove(backlog: &mut Vec<BacklogItem>, id: Uuid) -> bool {
    let before = backlog.len();
    backlog.retain(|i| i.id != id);
    backlog.len() != before
}

/// Triage a backlog item into a quadrant: it becomes a todo task at the end
/// of the board, keeping its id, labels, urls, and capture time. A failed
/// triage leaves the backlog untouched.
pub fn triage(
    backlog: &mut Vec<BacklogItem>,
    board: &mut Board,
    id: Uuid,
    quadrant: Quadrant,
) -> Result<(), BacklogError> {
    let idx = backlog
        .iter()
        .position(|i| i.id == id)
        .ok_or(BacklogError::NotFound(id))?;

    let item = backlog.remove(idx);
    board.active_tasks.push(Task {
        id: item.id,
        content: item.content,
        quadrant,
        labels: item.labels,
        urls: item.urls,
        status: TaskStatus::Todo,
        created_at: item.created_at,
        completed_at: None,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_backlog() -> Vec<BacklogItem> {
        let mut backlog = Vec::new();
        capture(&mut backlog, "Look into rust course".into(), vec!["learn".into()], vec![]).unwrap();
        capture(&mut backlog, "Fix bike light".into(), vec![], vec![]).unwrap();
        backlog
    }

    #[test]
    fn test_capture_rejects_empty() {
        let mut backlog = Vec::new();
        assert_eq!(
            capture(&mut backlog, "  ".into(), vec![], vec![]),
            Err(BacklogError::EmptyContent)
        );
        assert!(backlog.is_empty());
    }

    #[test]
    fn test_capture_appends() {
        let backlog = sample_backlog();
        assert_eq!(backlog.len(), 2);
        assert_eq!(backlog[0].content, "Look into rust course");
        assert_eq!(backlog[0].labels, vec!["learn"]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut backlog = sample_backlog();
        let id = backlog[0].id;
        assert!(remove(&mut backlog, id));
        assert!(!remove(&mut backlog, id));
        assert_eq!(backlog.len(), 1);
    }

    #[test]
    fn test_triage_moves_item_to_board() {
        let mut backlog = sample_backlog();
        let mut board = Board::default();
        let id = backlog[0].id;
        let captured_at = backlog[0].created_at;

        triage(&mut backlog, &mut board, id, Quadrant::NotUrgentImportant).unwrap();

        assert_eq!(backlog.len(), 1);
        let task = board.find_active(id).unwrap();
        assert_eq!(task.content, "Look into rust course");
        assert_eq!(task.quadrant, Quadrant::NotUrgentImportant);
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.created_at, captured_at);
        assert_eq!(task.labels, vec!["learn"]);
    }

    #[test]
    fn test_triage_unknown_id_preserves_backlog() {
        let mut backlog = sample_backlog();
        let mut board = Board::default();
        let ghost = Uuid::new_v4();
        let result = triage(&mut backlog, &mut board, ghost, Quadrant::UrgentImportant);
        assert_eq!(result, Err(BacklogError::NotFound(ghost)));
        assert_eq!(backlog.len(), 2);
        assert!(board.active_tasks.is_empty());
    }
}
