use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::model::task::Quadrant;

/// Color theme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    #[serde(rename = "light")]
    Light,
    #[serde(rename = "dark")]
    Dark,
}

impl Theme {
    pub fn from_key(s: &str) -> Option<Theme> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Ephemeral view state. Kept apart from the canonical task collections:
/// losing this file loses no tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiPrefs {
    #[serde(default)]
    pub theme: Theme,
    /// Ids of cards collapsed in the board view
    #[serde(default)]
    pub collapsed: IndexSet<String>,
    /// Quadrants collapsed to a header row
    #[serde(default)]
    pub collapsed_quadrants: IndexSet<Quadrant>,
}

/// Unsubmitted quick-add text, one draft per quadrant
pub type Drafts = IndexMap<Quadrant, String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefs_serde_defaults() {
        let prefs: UiPrefs = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs.theme, Theme::Light);
        assert!(prefs.collapsed.is_empty());
        assert!(prefs.collapsed_quadrants.is_empty());
    }

    #[test]
    fn test_theme_wire_names() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(Theme::from_key("light"), Some(Theme::Light));
        assert_eq!(Theme::from_key("sepia"), None);
    }

    #[test]
    fn test_drafts_round_trip() {
        let mut drafts = Drafts::default();
        drafts.insert(Quadrant::UrgentImportant, "call the bank".into());
        let json = serde_json::to_string(&drafts).unwrap();
        assert!(json.contains("urgent-important"));
        let back: Drafts = serde_json::from_str(&json).unwrap();
        assert_eq!(back, drafts);
    }
}
