use chrono::Utc;
use uuid::Uuid;

use crate::model::board::Board;
use crate::model::task::{Quadrant, Task, TaskStatus};

/// Error type for task operations
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("task content cannot be empty")]
    EmptyContent,
    #[error("task not found: {0}")]
    NotFound(Uuid),
    #[error("another urgent-important task is already in progress")]
    InProgressLimit,
}

// ---------------------------------------------------------------------------
// Create / update / delete
// ---------------------------------------------------------------------------

/// A partial update to an active task. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub content: Option<String>,
    pub quadrant: Option<Quadrant>,
    pub labels: Option<Vec<String>>,
    pub urls: Option<Vec<String>>,
}

/// Create a task and append it to the board. Returns the assigned id.
pub fn create(
    board: &mut Board,
    content: String,
    quadrant: Quadrant,
    labels: Vec<String>,
    urls: Vec<String>,
) -> Result<Uuid, TaskError> {
    let content = content.trim().to_string();
    if content.is_empty() {
        return Err(TaskError::EmptyContent);
    }

    let mut task = Task::new(content, quadrant);
    task.labels = labels;
    task.urls = urls;
    let id = task.id;
    board.active_tasks.push(task);
    Ok(id)
}

/// Apply a partial update to an active task. Validates before mutating:
/// a rejected patch leaves the task exactly as it was.
pub fn update(board: &mut Board, id: Uuid, patch: TaskPatch) -> Result<(), TaskError> {
    let content = match patch.content {
        Some(c) => {
            let c = c.trim().to_string();
            if c.is_empty() {
                return Err(TaskError::EmptyContent);
            }
            Some(c)
        }
        None => None,
    };

    let task = board.find_active_mut(id).ok_or(TaskError::NotFound(id))?;
    if let Some(content) = content {
        task.content = content;
    }
    if let Some(quadrant) = patch.quadrant {
        task.quadrant = quadrant;
    }
    if let Some(labels) = patch.labels {
        task.labels = labels;
    }
    if let Some(urls) = patch.urls {
        task.urls = urls;
    }
    Ok(())
}

/// Permanently delete a task from whichever collection holds it.
/// Removing an absent id is a no-op; returns whether anything was removed.
pub fn remove(board: &mut Board, id: Uuid) -> bool {
    let before = board.active_tasks.len() + board.completed_tasks.len();
    board.active_tasks.retain(|t| t.id != id);
    board.completed_tasks.retain(|t| t.id != id);
    before != board.active_tasks.len() + board.completed_tasks.len()
}

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

/// Advance a task one step: todo → in-progress → done.
///
/// Entering in-progress in the urgent-important quadrant is limited to one
/// task at a time; a second attempt fails with `InProgressLimit` and leaves
/// every status unchanged. Reaching done moves the task to the archive.
/// Returns the status the task ended up in.
pub fn advance(board: &mut Board, id: Uuid) -> Result<TaskStatus, TaskError> {
    let task = board.find_active(id).ok_or(TaskError::NotFound(id))?;

    match task.status {
        TaskStatus::Todo => {
            if task.quadrant == Quadrant::UrgentImportant && has_in_progress(board, id) {
                return Err(TaskError::InProgressLimit);
            }
            let task = board.find_active_mut(id).ok_or(TaskError::NotFound(id))?;
            task.status = TaskStatus::InProgress;
            Ok(TaskStatus::InProgress)
        }
        TaskStatus::InProgress | TaskStatus::Done => {
            complete(board, id)?;
            Ok(TaskStatus::Done)
        }
    }
}

/// Step a task back: in-progress → todo. Reverting a todo task is a no-op.
pub fn revert(board: &mut Board, id: Uuid) -> Result<TaskStatus, TaskError> {
    let task = board.find_active_mut(id).ok_or(TaskError::NotFound(id))?;
    if task.status == TaskStatus::InProgress {
        task.status = TaskStatus::Todo;
    }
    Ok(task.status)
}

/// Archive a task directly, skipping any remaining in-progress step.
pub fn archive(board: &mut Board, id: Uuid) -> Result<(), TaskError> {
    if board.find_active(id).is_none() {
        return Err(TaskError::NotFound(id));
    }
    complete(board, id)
}

/// Bring an archived task back to the board as a todo.
pub fn restore(board: &mut Board, id: Uuid) -> Result<(), TaskError> {
    let idx = board
        .completed_tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or(TaskError::NotFound(id))?;

    let mut task = board.completed_tasks.remove(idx);
    task.status = TaskStatus::Todo;
    task.completed_at = None;
    board.active_tasks.push(task);
    Ok(())
}

/// True if any other urgent-important task on the board is in progress
fn has_in_progress(board: &Board, excluding: Uuid) -> bool {
    board.active_tasks.iter().any(|t| {
        t.id != excluding
            && t.quadrant == Quadrant::UrgentImportant
            && t.status == TaskStatus::InProgress
    })
}

/// Move a task from the board to the archive, stamping the completion time.
fn complete(board: &mut Board, id: Uuid) -> Result<(), TaskError> {
    let idx = board
        .active_tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or(TaskError::NotFound(id))?;

    let mut task = board.active_tasks.remove(idx);
    task.status = TaskStatus::Done;
    task.completed_at = Some(Utc::now());
    board.completed_tasks.push(task);
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
