//! Release month aggregate.
//!
//! # Responsibility
//! - Define the monthly planning unit with its owned goals and retro.
//! - Provide placeholder construction and in-aggregate goal lookups.
//!
//! # Invariants
//! - Goals and retro are owned by exactly one release, never shared.
//! - `year_month` uses the `YYYY-MM` format.
//! - `updated_at` is bumped by the caller before a wholesale replace.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a release month.
pub type ReleaseId = Uuid;

/// Stable identifier of a goal inside a release.
pub type GoalId = Uuid;

/// One planned calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseMonth {
    pub id: ReleaseId,
    /// `YYYY-MM` label; callers keep it unique across releases.
    pub year_month: String,
    pub theme: String,
    /// Display order is vector order.
    pub goals: Vec<Goal>,
    pub retro: Retro,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One monthly goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub text: String,
    pub is_achieved: bool,
}

/// Month-end reflection embedded in a release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retro {
    /// What went right.
    pub right_things: String,
    /// What went wrong.
    pub wrong_things: String,
    pub next_actions: String,
    pub one_line_summary: String,
}

impl Goal {
    /// Creates an unachieved goal with a generated ID.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            is_achieved: false,
        }
    }
}

impl ReleaseMonth {
    /// Creates a release with one unachieved goal per seed text, empty theme
    /// and empty retro.
    pub fn placeholder<S: AsRef<str>>(
        id: ReleaseId,
        year_month: impl Into<String>,
        goal_texts: &[S],
        now: i64,
    ) -> Self {
        Self {
            id,
            year_month: year_month.into(),
            theme: String::new(),
            goals: goal_texts
                .iter()
                .map(|text| Goal::new(text.as_ref()))
                .collect(),
            retro: Retro::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn goal(&self, goal_id: GoalId) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == goal_id)
    }

    pub fn goal_mut(&mut self, goal_id: GoalId) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|goal| goal.id == goal_id)
    }

    /// Number of goals flagged as achieved.
    pub fn achieved_goal_count(&self) -> usize {
        self.goals.iter().filter(|goal| goal.is_achieved).count()
    }

    /// Bumps `updated_at` ahead of a wholesale replace.
    pub fn touch(&mut self, now: i64) {
        self.updated_at = now;
    }
}
