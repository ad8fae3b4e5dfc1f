//! Item domain model.
//!
//! # Responsibility
//! - Define the unit of work captured into the inbox and triaged into a release.
//! - Provide status string mapping for external callers.
//!
//! # Invariants
//! - `release_month_id` is `None` while status is `Inbox`; callers keep this
//!   consistent when moving items.
//! - `done_at` is set on every transition into `Done` and is not cleared when
//!   the item later leaves `Done`.

use crate::model::release::ReleaseId;
use crate::model::tag::TagId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of an item.
pub type ItemId = Uuid;

/// Pipeline stage of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Captured, not yet triaged.
    Inbox,
    /// Scheduled into a release, not completed.
    Backlog,
    /// Completed within a release.
    Done,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 3] = [Self::Inbox, Self::Backlog, Self::Done];

    /// Stable string id used across the FFI boundary.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Backlog => "backlog",
            Self::Done => "done",
        }
    }
}

/// Parses one status from its stable string id.
pub fn parse_item_status(value: &str) -> Option<ItemStatus> {
    match value.trim() {
        "inbox" => Some(ItemStatus::Inbox),
        "backlog" => Some(ItemStatus::Backlog),
        "done" => Some(ItemStatus::Done),
        _ => None,
    }
}

/// One task tracked through inbox, backlog and done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub text: String,
    /// Weak reference; may point at a tag that no longer resolves.
    pub tag_id: Option<TagId>,
    pub status: ItemStatus,
    /// Weak reference to the owning release.
    pub release_month_id: Option<ReleaseId>,
    pub note: String,
    pub created_at: i64,
    pub updated_at: i64,
    /// Epoch milliseconds of the latest transition into `Done`.
    pub done_at: Option<i64>,
}

impl Item {
    /// Creates a fresh inbox item with a generated ID.
    pub fn new_inbox(text: impl Into<String>, tag_id: Option<TagId>, now: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            tag_id,
            status: ItemStatus::Inbox,
            release_month_id: None,
            note: String::new(),
            created_at: now,
            updated_at: now,
            done_at: None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == ItemStatus::Done
    }

    /// Timestamp used by list ordering: completion time, else creation time.
    pub fn recency_key(&self) -> i64 {
        self.done_at.unwrap_or(self.created_at)
    }
}
