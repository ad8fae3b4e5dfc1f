//! Seed configuration for fresh stores.
//!
//! # Responsibility
//! - Hold the placeholder goal texts and default tag names used at first run.
//! - Allow hosts to override either list from serialized settings.
//!
//! # Invariants
//! - Missing fields fall back to the built-in defaults.
//! - Tag order keys follow list position, starting at 0.

use serde::{Deserialize, Serialize};

const DEFAULT_GOAL_TEXTS: [&str; 3] = [
    "Set 3 goals for this month",
    "Review the inbox weekly",
    "Write the month-end retro",
];

const DEFAULT_TAG_NAMES: [&str; 6] = ["Work", "Life", "Health", "Learning", "Family", "Hobby"];

/// Defaults applied when a store or a new release is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// One unachieved goal is created per entry in every new release.
    pub goal_texts: Vec<String>,
    /// Tags seeded once, at store construction.
    pub tag_names: Vec<String>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            goal_texts: DEFAULT_GOAL_TEXTS.iter().map(|s| s.to_string()).collect(),
            tag_names: DEFAULT_TAG_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
