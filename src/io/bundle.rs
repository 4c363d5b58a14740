use std::collections::HashSet;

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::backlog::BacklogItem;
use crate::model::board::Board;
use crate::model::prefs::{Drafts, Theme, UiPrefs};
use crate::model::task::Quadrant;

/// Current export format version
pub const BUNDLE_VERSION: u32 = 1;

/// Error type for bundle import. Any failure rejects the whole bundle;
/// nothing is applied until the entire document validates.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("could not parse bundle: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported bundle version: {0}")]
    UnsupportedVersion(u32),
    #[error("duplicate id in bundle: {0}")]
    DuplicateId(Uuid),
    #[error("task {0} has empty content")]
    EmptyContent(Uuid),
}

/// A full backup of the store: every collection plus view state, as one
/// JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub tasks: Board,
    #[serde(default)]
    pub backlog: Vec<BacklogItem>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub collapsed: IndexSet<String>,
    #[serde(default)]
    pub collapsed_quadrants: IndexSet<Quadrant>,
    #[serde(default)]
    pub drafts: Drafts,
}

/// Assemble a bundle from the current state.
pub fn export_bundle(
    board: &Board,
    backlog: &[BacklogItem],
    prefs: &UiPrefs,
    drafts: &Drafts,
) -> ExportBundle {
    ExportBundle {
        version: BUNDLE_VERSION,
        exported_at: Utc::now(),
        tasks: board.clone(),
        backlog: backlog.to_vec(),
        theme: prefs.theme,
        collapsed: prefs.collapsed.clone(),
        collapsed_quadrants: prefs.collapsed_quadrants.clone(),
        drafts: drafts.clone(),
    }
}

/// Serialize a bundle for download/backup.
pub fn to_json(bundle: &ExportBundle) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(bundle)
}

/// Parse and validate a bundle. The whole document is checked before any
/// of it is handed back, so a failed import can never half-apply.
pub fn import_bundle(json: &str) -> Result<ExportBundle, ImportError> {
    let bundle: ExportBundle = serde_json::from_str(json)?;
    validate(&bundle)?;
    Ok(bundle)
}

fn validate(bundle: &ExportBundle) -> Result<(), ImportError> {
    if bundle.version != BUNDLE_VERSION {
        return Err(ImportError::UnsupportedVersion(bundle.version));
    }

    let mut seen: HashSet<Uuid> = HashSet::new();
    let ids = bundle
        .tasks
        .active_tasks
        .iter()
        .chain(&bundle.tasks.completed_tasks)
        .map(|t| (t.id, t.content.as_str()))
        .chain(bundle.backlog.iter().map(|i| (i.id, i.content.as_str())));

    for (id, content) in ids {
        if !seen.insert(id) {
            return Err(ImportError::DuplicateId(id));
        }
        if content.trim().is_empty() {
            return Err(ImportError::EmptyContent(id));
        }
    }
    Ok(())
}

/// Split an imported bundle back into the state it replaces.
pub fn apply_bundle(bundle: ExportBundle) -> (Board, Vec<BacklogItem>, UiPrefs, Drafts) {
    let prefs = UiPrefs {
        theme: bundle.theme,
        collapsed: bundle.collapsed,
        collapsed_quadrants: bundle.collapsed_quadrants,
    };
    (bundle.tasks, bundle.backlog, prefs, bundle.drafts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::backlog_ops::capture;
    use crate::ops::task_ops::{archive, create};
    use pretty_assertions::assert_eq;

    fn sample_state() -> (Board, Vec<BacklogItem>, UiPrefs, Drafts) {
        let mut board = Board::default();
        create(
            &mut board,
            "Buy milk".into(),
            Quadrant::UrgentImportant,
            vec!["errand".into()],
            vec!["https://x.com/y".into()],
        )
        .unwrap();
        let done =
            create(&mut board, "Old chore".into(), Quadrant::UrgentNotImportant, vec![], vec![])
                .unwrap();
        archive(&mut board, done).unwrap();

        let mut backlog = Vec::new();
        capture(&mut backlog, "Someday idea".into(), vec![], vec![]).unwrap();

        let mut prefs = UiPrefs {
            theme: Theme::Dark,
            ..Default::default()
        };
        prefs.collapsed.insert("card-one".into());

        let mut drafts = Drafts::default();
        drafts.insert(Quadrant::NotUrgentImportant, "unfinished text".into());

        (board, backlog, prefs, drafts)
    }

    #[test]
    fn test_round_trip_reproduces_state() {
        let (board, backlog, prefs, drafts) = sample_state();
        let json = to_json(&export_bundle(&board, &backlog, &prefs, &drafts)).unwrap();

        let imported = import_bundle(&json).unwrap();
        let (board2, backlog2, prefs2, drafts2) = apply_bundle(imported);
        assert_eq!(board2, board);
        assert_eq!(backlog2, backlog);
        assert_eq!(prefs2, prefs);
        assert_eq!(drafts2, drafts);
    }

    #[test]
    fn test_import_malformed_json() {
        assert!(matches!(import_bundle("nope {"), Err(ImportError::Parse(_))));
    }

    #[test]
    fn test_import_missing_required_keys() {
        // Missing `tasks`/`version` keys must be a parse error, not a default
        assert!(matches!(
            import_bundle(r#"{"theme": "dark"}"#),
            Err(ImportError::Parse(_))
        ));
    }

    #[test]
    fn test_import_unsupported_version() {
        let (board, backlog, prefs, drafts) = sample_state();
        let mut bundle = export_bundle(&board, &backlog, &prefs, &drafts);
        bundle.version = 99;
        let json = to_json(&bundle).unwrap();
        assert!(matches!(
            import_bundle(&json),
            Err(ImportError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn test_import_duplicate_id_rejected() {
        let (mut board, backlog, prefs, drafts) = sample_state();
        let dup = board.active_tasks[0].clone();
        board.completed_tasks.push(dup);
        let json = to_json(&export_bundle(&board, &backlog, &prefs, &drafts)).unwrap();
        assert!(matches!(
            import_bundle(&json),
            Err(ImportError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_import_empty_content_rejected() {
        let (mut board, backlog, prefs, drafts) = sample_state();
        board.active_tasks[0].content = "   ".into();
        let json = to_json(&export_bundle(&board, &backlog, &prefs, &drafts)).unwrap();
        assert!(matches!(
            import_bundle(&json),
            Err(ImportError::EmptyContent(_))
        ));
    }

    #[test]
    fn test_optional_sections_default() {
        // A minimal bundle with only version/exportedAt/tasks still imports
        let json = format!(
            r#"{{"version": 1, "exportedAt": "{}", "tasks": {{}}}}"#,
            Utc::now().to_rfc3339()
        );
        let bundle = import_bundle(&json).unwrap();
        assert!(bundle.backlog.is_empty());
        assert_eq!(bundle.theme, Theme::Light);
        assert!(bundle.drafts.is_empty());
    }
}
