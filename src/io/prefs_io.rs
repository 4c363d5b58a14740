use std::fs;
use std::path::Path;

use crate::model::prefs::{Drafts, UiPrefs};

pub const PREFS_FILE: &str = "prefs.json";
pub const DRAFTS_FILE: &str = "drafts.json";

/// Read the view-state prefs. Missing or malformed files read as `None`;
/// prefs are ephemeral, so nothing is worth recovering here.
pub fn read_prefs(data_dir: &Path) -> Option<UiPrefs> {
    let content = fs::read_to_string(data_dir.join(PREFS_FILE)).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write the view-state prefs.
pub fn write_prefs(data_dir: &Path, prefs: &UiPrefs) -> Result<(), std::io::Error> {
    fs::create_dir_all(data_dir)?;
    let content = serde_json::to_string_pretty(prefs)?;
    fs::write(data_dir.join(PREFS_FILE), content)
}

/// Read the per-quadrant quick-add drafts.
pub fn read_drafts(data_dir: &Path) -> Option<Drafts> {
    let content = fs::read_to_string(data_dir.join(DRAFTS_FILE)).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write the per-quadrant quick-add drafts.
pub fn write_drafts(data_dir: &Path, drafts: &Drafts) -> Result<(), std::io::Error> {
    fs::create_dir_all(data_dir)?;
    let content = serde_json::to_string_pretty(drafts)?;
    fs::write(data_dir.join(DRAFTS_FILE), content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::prefs::Theme;
    use crate::model::task::Quadrant;
    use tempfile::TempDir;

    #[test]
    fn test_prefs_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut prefs = UiPrefs {
            theme: Theme::Dark,
            ..Default::default()
        };
        prefs.collapsed.insert("some-card-id".into());
        prefs.collapsed_quadrants.insert(Quadrant::NotUrgentNotImportant);

        write_prefs(dir.path(), &prefs).unwrap();
        let loaded = read_prefs(dir.path()).unwrap();
        assert_eq!(loaded, prefs);
    }

    #[test]
    fn test_missing_prefs_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_prefs(dir.path()).is_none());
        assert!(read_drafts(dir.path()).is_none());
    }

    #[test]
    fn test_malformed_prefs_is_none() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PREFS_FILE), "not json {{{").unwrap();
        assert!(read_prefs(dir.path()).is_none());
    }

    #[test]
    fn test_drafts_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut drafts = Drafts::default();
        drafts.insert(Quadrant::UrgentImportant, "half-typed thought".into());

        write_drafts(dir.path(), &drafts).unwrap();
        assert_eq!(read_drafts(dir.path()).unwrap(), drafts);
    }
}
