//! Planner use-case service.
//!
//! # Responsibility
//! - Provide the entry points used by the inbox, month dashboard, retro and
//!   settings surfaces.
//! - Turn store no-ops into typed errors that a UI can report.
//! - Apply release edits as read-modify-write of the whole aggregate.
//!
//! # Invariants
//! - Every release edit bumps `updated_at` and goes through `replace_release`.
//! - Composite flows run inside one store lock.
//! - Triage and completion target the selected release.

use crate::clock::is_valid_year_month;
use crate::model::item::{Item, ItemId, ItemStatus};
use crate::model::release::{Goal, GoalId, ReleaseId, ReleaseMonth, Retro};
use crate::model::tag::{Tag, TagId};
use crate::store::domain_store::DomainStore;
use crate::store::shared_store::SharedStore;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for planner use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerServiceError {
    /// Item or goal text is blank after trim.
    BlankText,
    /// Tag name is blank after trim.
    BlankTagName,
    /// Month label is not `YYYY-MM`.
    InvalidYearMonth(String),
    /// Selected or requested release does not exist.
    ReleaseNotFound(ReleaseId),
    /// Target item does not exist.
    ItemNotFound(ItemId),
    /// Target goal does not exist in the selected release.
    GoalNotFound(GoalId),
    /// No release is selected.
    NoSelectedRelease,
}

impl Display for PlannerServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankText => write!(f, "text must not be blank"),
            Self::BlankTagName => write!(f, "tag name must not be blank"),
            Self::InvalidYearMonth(value) => {
                write!(f, "invalid year-month `{value}`; expected YYYY-MM")
            }
            Self::ReleaseNotFound(id) => write!(f, "release not found: {id}"),
            Self::ItemNotFound(id) => write!(f, "item not found: {id}"),
            Self::GoalNotFound(id) => write!(f, "goal not found: {id}"),
            Self::NoSelectedRelease => write!(f, "no release is selected"),
        }
    }
}

impl Error for PlannerServiceError {}

pub type PlannerResult<T> = Result<T, PlannerServiceError>;

/// Item projection with its tag name resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub item: Item,
    /// Empty when the item has no tag or the tag does not resolve.
    pub tag_name: String,
}

/// Everything the month dashboard renders for the selected release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthDashboard {
    pub release: ReleaseMonth,
    pub backlog: Vec<ItemRow>,
    pub done: Vec<ItemRow>,
    pub achieved_goals: usize,
    pub total_goals: usize,
    pub done_count: usize,
}

/// Month-end statistics shown above the retro editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetroSummary {
    pub release_id: ReleaseId,
    pub year_month: String,
    pub done_count: usize,
    pub achieved_goals: usize,
    pub total_goals: usize,
    pub retro: Retro,
}

/// Entry of the month picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthOption {
    pub release_id: ReleaseId,
    pub year_month: String,
    pub is_selected: bool,
}

/// Use-case facade over a shared domain store.
#[derive(Clone)]
pub struct PlannerService {
    store: SharedStore,
}

impl PlannerService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Underlying store handle, for subscriptions and raw queries.
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    // ---- inbox surface ----

    /// Captures one item into the inbox.
    pub fn capture(&self, text: &str, tag_id: Option<TagId>) -> PlannerResult<Item> {
        self.store.write(|store| {
            let item_id = store
                .add_inbox_item(text, tag_id)
                .ok_or(PlannerServiceError::BlankText)?;
            item_snapshot(store, item_id)
        })
    }

    /// Inbox rows, newest capture first.
    pub fn inbox(&self) -> Vec<ItemRow> {
        self.store
            .read(|store| to_rows(store, store.query_inbox_items()))
    }

    /// Schedules an item into the selected release backlog.
    pub fn triage_to_backlog(&self, item_id: ItemId) -> PlannerResult<Item> {
        self.move_into_selected(item_id, ItemStatus::Backlog)
    }

    /// Marks an item done within the selected release.
    pub fn complete_item(&self, item_id: ItemId) -> PlannerResult<Item> {
        self.move_into_selected(item_id, ItemStatus::Done)
    }

    // ---- month dashboard surface ----

    /// Snapshot of the selected release with its backlog and done lists.
    pub fn dashboard(&self) -> PlannerResult<MonthDashboard> {
        self.store.read(|store| -> PlannerResult<MonthDashboard> {
            let release = selected_release(store)?.clone();
            let backlog = to_rows(store, store.query_items(ItemStatus::Backlog, Some(release.id)));
            let done_items = store.query_items(ItemStatus::Done, Some(release.id));
            let done_count = done_items.len();
            Ok(MonthDashboard {
                achieved_goals: store.goal_completion_count(&release),
                total_goals: release.goals.len(),
                done_count,
                backlog,
                done: to_rows(store, done_items),
                release,
            })
        })
    }

    pub fn set_theme(&self, theme: &str) -> PlannerResult<ReleaseMonth> {
        self.edit_selected_release(|release| {
            release.theme = theme.to_string();
            Ok(())
        })
    }

    pub fn set_goal_text(&self, goal_id: GoalId, text: &str) -> PlannerResult<ReleaseMonth> {
        self.edit_selected_release(|release| {
            let goal = release
                .goal_mut(goal_id)
                .ok_or(PlannerServiceError::GoalNotFound(goal_id))?;
            goal.text = text.to_string();
            Ok(())
        })
    }

    /// Flips one goal's achieved flag.
    pub fn toggle_goal(&self, goal_id: GoalId) -> PlannerResult<ReleaseMonth> {
        self.edit_selected_release(|release| {
            let goal = release
                .goal_mut(goal_id)
                .ok_or(PlannerServiceError::GoalNotFound(goal_id))?;
            goal.is_achieved = !goal.is_achieved;
            Ok(())
        })
    }

    /// Appends an unachieved goal to the selected release.
    pub fn add_goal(&self, text: &str) -> PlannerResult<Goal> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(PlannerServiceError::BlankText);
        }
        let goal = Goal::new(trimmed);
        let created = goal.clone();
        self.edit_selected_release(move |release| {
            release.goals.push(goal);
            Ok(())
        })?;
        Ok(created)
    }

    /// Captures an item and schedules it into the selected backlog at once.
    pub fn add_backlog_item(&self, text: &str) -> PlannerResult<Item> {
        self.store.write(|store| {
            let release_id = selected_release(store)?.id;
            let item_id = store
                .add_inbox_item(text, None)
                .ok_or(PlannerServiceError::BlankText)?;
            store.move_item(item_id, ItemStatus::Backlog, Some(release_id));
            item_snapshot(store, item_id)
        })
    }

    /// Replaces the highlight note on an item.
    pub fn set_item_note(&self, item_id: ItemId, note: &str) -> PlannerResult<Item> {
        self.store.write(|store| {
            if !store.update_item_note(item_id, note) {
                return Err(PlannerServiceError::ItemNotFound(item_id));
            }
            item_snapshot(store, item_id)
        })
    }

    // ---- month switching ----

    /// Month picker entries in release insertion order.
    pub fn months(&self) -> Vec<MonthOption> {
        self.store.read(|store| {
            let selected = store.selected_release_id();
            store
                .releases()
                .iter()
                .map(|release| MonthOption {
                    release_id: release.id,
                    year_month: release.year_month.clone(),
                    is_selected: release.id == selected,
                })
                .collect()
        })
    }

    /// Selects the release labeled `year_month`, creating it when missing.
    pub fn open_month(&self, year_month: &str) -> PlannerResult<ReleaseId> {
        let normalized = year_month.trim();
        if !is_valid_year_month(normalized) {
            return Err(PlannerServiceError::InvalidYearMonth(normalized.to_string()));
        }

        let release_id = self.store.write(|store| {
            let release_id = store.create_release(normalized);
            store.select_release(release_id);
            release_id
        });
        info!(
            "event=month_open module=service status=ok year_month={} release_id={}",
            normalized, release_id
        );
        Ok(release_id)
    }

    /// Selects an existing release by id.
    pub fn select_month(&self, release_id: ReleaseId) -> PlannerResult<()> {
        self.store.write(|store| -> PlannerResult<()> {
            if store.release(release_id).is_none() {
                return Err(PlannerServiceError::ReleaseNotFound(release_id));
            }
            store.select_release(release_id);
            Ok(())
        })
    }

    // ---- retro surface ----

    /// Replaces all four retro fields of the selected release.
    pub fn save_retro(&self, retro: Retro) -> PlannerResult<ReleaseMonth> {
        self.edit_selected_release(move |release| {
            release.retro = retro;
            Ok(())
        })
    }

    pub fn retro_summary(&self) -> PlannerResult<RetroSummary> {
        self.store.read(|store| -> PlannerResult<RetroSummary> {
            let release = selected_release(store)?;
            Ok(RetroSummary {
                release_id: release.id,
                year_month: release.year_month.clone(),
                done_count: store.done_count(release),
                achieved_goals: store.goal_completion_count(release),
                total_goals: release.goals.len(),
                retro: release.retro.clone(),
            })
        })
    }

    // ---- settings surface ----

    /// Appends a tag at the end of the display order.
    pub fn add_tag(&self, name: &str) -> PlannerResult<Tag> {
        self.store
            .write(|store| store.add_tag(name))
            .ok_or(PlannerServiceError::BlankTagName)
    }

    /// Tags sorted by display order.
    pub fn tags(&self) -> Vec<Tag> {
        self.store.read(DomainStore::tags_sorted)
    }

    fn move_into_selected(&self, item_id: ItemId, status: ItemStatus) -> PlannerResult<Item> {
        self.store.write(|store| {
            let release_id = selected_release(store)?.id;
            if !store.move_item(item_id, status, Some(release_id)) {
                return Err(PlannerServiceError::ItemNotFound(item_id));
            }
            item_snapshot(store, item_id)
        })
    }

    fn edit_selected_release(
        &self,
        edit: impl FnOnce(&mut ReleaseMonth) -> PlannerResult<()>,
    ) -> PlannerResult<ReleaseMonth> {
        self.store.write(|store| -> PlannerResult<ReleaseMonth> {
            let mut updated = selected_release(store)?.clone();
            edit(&mut updated)?;
            updated.touch(store.now_ms());
            if !store.replace_release(updated.clone()) {
                return Err(PlannerServiceError::ReleaseNotFound(updated.id));
            }
            Ok(updated)
        })
    }
}

fn selected_release(store: &DomainStore) -> PlannerResult<&ReleaseMonth> {
    store
        .selected_release()
        .ok_or(PlannerServiceError::NoSelectedRelease)
}

fn item_snapshot(store: &DomainStore, item_id: ItemId) -> PlannerResult<Item> {
    store
        .item(item_id)
        .cloned()
        .ok_or(PlannerServiceError::ItemNotFound(item_id))
}

fn to_rows(store: &DomainStore, items: Vec<Item>) -> Vec<ItemRow> {
    items
        .into_iter()
        .map(|item| ItemRow {
            tag_name: store.tag_name(item.tag_id),
            item,
        })
        .collect()
}
