//! Change events published by the domain store.

use crate::model::item::{ItemId, ItemStatus};
use crate::model::release::ReleaseId;
use crate::model::tag::TagId;
use serde::{Deserialize, Serialize};

/// One applied mutation, stamped with the store version it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreEvent {
    pub version: u64,
    pub change: StoreChange,
}

/// What changed. Carries identifiers only, never user text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreChange {
    ReleaseCreated(ReleaseId),
    ReleaseReplaced(ReleaseId),
    SelectionChanged(ReleaseId),
    ItemAdded(ItemId),
    ItemMoved {
        id: ItemId,
        status: ItemStatus,
        release_id: Option<ReleaseId>,
    },
    ItemNoteUpdated(ItemId),
    TagAdded(TagId),
}
