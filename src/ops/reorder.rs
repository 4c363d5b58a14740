use uuid::Uuid;

use crate::model::task::{Quadrant, Task};
use crate::ops::filter::TaskFilter;
use crate::ops::task_ops::TaskError;

/// Reassign a task's quadrant and, when `visible_index` is given, splice it
/// so it lands at that position *within the filtered view* of the target
/// quadrant (0 = top).
///
/// Visible and storage indices diverge whenever a filter hides siblings:
/// the task is inserted immediately before whichever task currently sits at
/// `visible_index` in the filtered target quadrant. An index at or past the
/// visible count lands after the last task of the quadrant. Without an
/// index the task keeps its storage position.
pub fn move_to_quadrant(
    tasks: &mut Vec<Task>,
    id: Uuid,
    target: Quadrant,
    visible_index: Option<usize>,
    filter: &TaskFilter,
) -> Result<(), TaskError> {
    let from = tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or(TaskError::NotFound(id))?;

    let Some(visible_index) = visible_index else {
        tasks[from].quadrant = target;
        return Ok(());
    };

    let mut task = tasks.remove(from);
    task.quadrant = target;

    let at = splice_position(tasks, target, visible_index, filter);
    tasks.insert(at, task);
    Ok(())
}

/// Map a visible drop index back to a storage index over `tasks` (with the
/// moving task already taken out).
fn splice_position(
    tasks: &[Task],
    target: Quadrant,
    visible_index: usize,
    filter: &TaskFilter,
) -> usize {
    let visible: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.quadrant == target && filter.matches(t))
        .map(|(i, _)| i)
        .collect();

    if let Some(&at) = visible.get(visible_index) {
        return at;
    }

    // Past the visible end: after the quadrant's last task, or at the very
    // end if the quadrant is empty
    match tasks.iter().rposition(|t| t.quadrant == target) {
        Some(last) => last + 1,
        None => tasks.len(),
    }
}
