//! RuleSet - optional rule strictness

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rule options a game is played under
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub name: String,
    /// Reject a simple move whenever any piece of the mover's color can jump,
    /// not only the piece being moved.
    pub global_forced_capture: bool,
}

impl RuleSet {
    /// Tournament strictness: capture is mandatory across the whole board
    pub fn tournament() -> Self {
        Self {
            name: "tournament".to_string(),
            global_forced_capture: true,
        }
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let rules = serde_json::from_str(&content)?;
        Ok(rules)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            name: "standard".to_string(),
            global_forced_capture: false,
        }
    }
}
