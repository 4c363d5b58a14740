use indexmap::IndexSet;

use crate::model::board::Board;
use crate::model::task::{Quadrant, Task};

/// Sentinel tag-filter value selecting only unlabeled tasks
pub const NO_TAGS_FILTER: &str = "__no_tags__";

/// The board view filter: an active tag set intersected with a
/// case-insensitive search query. Empty means match-all for both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub tags: IndexSet<String>,
    pub search: String,
}

impl TaskFilter {
    pub fn with_tags<I: IntoIterator<Item = String>>(tags: I) -> Self {
        TaskFilter {
            tags: tags.into_iter().collect(),
            search: String::new(),
        }
    }

    pub fn with_search(search: &str) -> Self {
        TaskFilter {
            tags: IndexSet::new(),
            search: search.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.search.is_empty()
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.tags_match(task) && self.search_matches(task)
    }

    fn tags_match(&self, task: &Task) -> bool {
        if self.tags.is_empty() {
            return true;
        }
        if self.tags.contains(NO_TAGS_FILTER) && task.labels.is_empty() {
            return true;
        }
        task.labels.iter().any(|l| self.tags.contains(l.as_str()))
    }

    fn search_matches(&self, task: &Task) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let query = self.search.to_lowercase();
        task.content.to_lowercase().contains(&query)
            || task
                .labels
                .iter()
                .any(|l| l.to_lowercase().contains(&query))
    }
}

/// Tasks of one quadrant passing the filter, in underlying board order
pub fn list_by_quadrant<'a>(
    board: &'a Board,
    quadrant: Quadrant,
    filter: &TaskFilter,
) -> Vec<&'a Task> {
    board
        .active_tasks
        .iter()
        .filter(|t| t.quadrant == quadrant && filter.matches(t))
        .collect()
}

/// Every label used on the board, in first-occurrence order. Drives the
/// tag-filter row in a UI.
pub fn collect_labels(board: &Board) -> IndexSet<String> {
    let mut labels = IndexSet::new();
    for task in &board.active_tasks {
        for label in &task.labels {
            labels.insert(label.clone());
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::task_ops::create;

    fn sample_board() -> Board {
        let mut board = Board::default();
        create(
            &mut board,
            "Buy milk".into(),
            Quadrant::UrgentImportant,
            vec!["errand".into()],
            vec![],
        )
        .unwrap();
        create(
            &mut board,
            "Buy eggs".into(),
            Quadrant::UrgentImportant,
            vec!["errand".into(), "food".into()],
            vec![],
        )
        .unwrap();
        create(
            &mut board,
            "Write report".into(),
            Quadrant::NotUrgentImportant,
            vec![],
            vec![],
        )
        .unwrap();
        board
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let board = sample_board();
        let filter = TaskFilter::default();
        assert_eq!(
            list_by_quadrant(&board, Quadrant::UrgentImportant, &filter).len(),
            2
        );
        assert_eq!(
            list_by_quadrant(&board, Quadrant::NotUrgentImportant, &filter).len(),
            1
        );
        assert!(list_by_quadrant(&board, Quadrant::UrgentNotImportant, &filter).is_empty());
    }

    #[test]
    fn test_search_case_insensitive_substring() {
        let board = sample_board();
        let filter = TaskFilter::with_search("MILK");
        let hits = list_by_quadrant(&board, Quadrant::UrgentImportant, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].content, "Buy milk");
    }

    #[test]
    fn test_search_matches_labels_too() {
        let board = sample_board();
        let filter = TaskFilter::with_search("food");
        let hits = list_by_quadrant(&board, Quadrant::UrgentImportant, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].content, "Buy eggs");
    }

    #[test]
    fn test_tag_filter_intersection() {
        let board = sample_board();
        let filter = TaskFilter::with_tags(["food".to_string()]);
        let hits = list_by_quadrant(&board, Quadrant::UrgentImportant, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].content, "Buy eggs");
    }

    #[test]
    fn test_no_tags_sentinel() {
        let board = sample_board();
        let filter = TaskFilter::with_tags([NO_TAGS_FILTER.to_string()]);
        assert!(list_by_quadrant(&board, Quadrant::UrgentImportant, &filter).is_empty());
        let hits = list_by_quadrant(&board, Quadrant::NotUrgentImportant, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].content, "Write report");
    }

    #[test]
    fn test_tags_and_search_combine() {
        let board = sample_board();
        let mut filter = TaskFilter::with_tags(["errand".to_string()]);
        filter.search = "eggs".into();
        let hits = list_by_quadrant(&board, Quadrant::UrgentImportant, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].content, "Buy eggs");
    }

    #[test]
    fn test_collect_labels_first_occurrence_order() {
        let board = sample_board();
        let collected = collect_labels(&board);
        let labels: Vec<&str> = collected.iter().map(|s| s.as_str()).collect();
        assert_eq!(labels, vec!["errand", "food"]);
    }
}
