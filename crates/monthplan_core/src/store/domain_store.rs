//! Domain store: exclusive owner of planner state.
//!
//! # Responsibility
//! - Seed a fresh store with the current month release and default tags.
//! - Provide total query and mutation operations over releases, items, tags.
//! - Derive per-release statistics (achieved goals, done items).
//!
//! # Invariants
//! - Collections keep insertion order; new inbox items go to the front.
//! - `selected_release_id` is valid right after construction; later it may
//!   dangle, in which case `selected_release()` returns `None`.
//! - Text inputs are trimmed here; blank input inserts nothing.
//! - `version` increases by exactly one per applied mutation.
//! - Log lines carry ids, statuses and counts only, never user text.

use crate::clock::{year_month_label, Clock, SystemClock};
use crate::config::SeedConfig;
use crate::model::item::{Item, ItemId, ItemStatus};
use crate::model::release::{ReleaseId, ReleaseMonth};
use crate::model::tag::{Tag, TagId};
use crate::store::event::{StoreChange, StoreEvent};
use log::debug;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use uuid::Uuid;

/// Single-writer in-memory store for all planner entities.
pub struct DomainStore {
    clock: Arc<dyn Clock>,
    seed: SeedConfig,
    releases: Vec<ReleaseMonth>,
    items: Vec<Item>,
    tags: Vec<Tag>,
    selected_release_id: ReleaseId,
    version: u64,
    subscribers: Vec<Sender<StoreEvent>>,
}

impl Default for DomainStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainStore {
    /// Creates a store on the system clock with default seeds.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates a store on the given clock with default seeds.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::with_config(clock, SeedConfig::default())
    }

    /// Creates a store seeded from `seed`.
    ///
    /// # Contract
    /// - Exactly one release exists, labeled with the current local month,
    ///   holding one unachieved goal per seed goal text; it is selected.
    /// - One tag per seed tag name, with order keys `0..n` in list order.
    /// - No items.
    pub fn with_config(clock: Arc<dyn Clock>, seed: SeedConfig) -> Self {
        let now = clock.now_ms();
        let release =
            ReleaseMonth::placeholder(Uuid::new_v4(), year_month_label(now), &seed.goal_texts, now);
        let tags = seed
            .tag_names
            .iter()
            .enumerate()
            .map(|(index, name)| Tag::new(name.as_str(), index as i64))
            .collect::<Vec<_>>();

        debug!(
            "event=store_init module=store status=ok year_month={} goals={} tags={}",
            release.year_month,
            release.goals.len(),
            tags.len()
        );

        Self {
            clock,
            seed,
            selected_release_id: release.id,
            releases: vec![release],
            items: Vec::new(),
            tags,
            version: 0,
            subscribers: Vec::new(),
        }
    }

    /// Current time from the store clock.
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Mutation counter; bumps once per applied mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Registers a change listener. Dropped receivers are pruned lazily.
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    // ---- releases ----

    /// All releases in insertion order.
    pub fn releases(&self) -> &[ReleaseMonth] {
        &self.releases
    }

    pub fn release(&self, release_id: ReleaseId) -> Option<&ReleaseMonth> {
        self.releases.iter().find(|release| release.id == release_id)
    }

    pub fn release_by_year_month(&self, year_month: &str) -> Option<&ReleaseMonth> {
        self.releases
            .iter()
            .find(|release| release.year_month == year_month)
    }

    pub fn selected_release_id(&self) -> ReleaseId {
        self.selected_release_id
    }

    /// Changes the selection without validating that the id exists.
    pub fn select_release(&mut self, release_id: ReleaseId) {
        if self.selected_release_id == release_id {
            return;
        }
        self.selected_release_id = release_id;
        self.publish(StoreChange::SelectionChanged(release_id));
    }

    /// Release matching the selection, or `None` when it does not resolve.
    pub fn selected_release(&self) -> Option<&ReleaseMonth> {
        self.release(self.selected_release_id)
    }

    /// Appends a placeholder release for `year_month`.
    ///
    /// Returns the existing id instead when a release already carries the
    /// label. Does not change the selection.
    pub fn create_release(&mut self, year_month: &str) -> ReleaseId {
        let year_month = year_month.trim();
        if let Some(existing) = self.release_by_year_month(year_month) {
            return existing.id;
        }

        let now = self.now_ms();
        let release =
            ReleaseMonth::placeholder(Uuid::new_v4(), year_month, &self.seed.goal_texts, now);
        let release_id = release.id;
        self.releases.push(release);
        self.publish(StoreChange::ReleaseCreated(release_id));
        release_id
    }

    /// Replaces a release wholesale, matched by id.
    ///
    /// This is the only write path for theme, goal and retro edits. Callers
    /// bump `updated_at` themselves. Returns `false` (no-op) for unknown ids.
    pub fn replace_release(&mut self, updated: ReleaseMonth) -> bool {
        let Some(index) = self
            .releases
            .iter()
            .position(|release| release.id == updated.id)
        else {
            debug!(
                "event=release_replace module=store status=skipped reason=not_found release_id={}",
                updated.id
            );
            return false;
        };

        let release_id = updated.id;
        self.releases[index] = updated;
        self.publish(StoreChange::ReleaseReplaced(release_id));
        true
    }

    // ---- items ----

    /// All items in storage order (newest inbox capture first).
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, item_id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Captures a new inbox item at the front of the collection.
    ///
    /// # Contract
    /// - `text` is trimmed; blank text inserts nothing and returns `None`.
    /// - No duplicate detection; `tag_id` is not validated.
    pub fn add_inbox_item(&mut self, text: &str, tag_id: Option<TagId>) -> Option<ItemId> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("event=item_add module=store status=skipped reason=blank_text");
            return None;
        }

        let item = Item::new_inbox(trimmed, tag_id, self.now_ms());
        let item_id = item.id;
        self.items.insert(0, item);
        self.publish(StoreChange::ItemAdded(item_id));
        Some(item_id)
    }

    /// Sets status and release reference of one item together.
    ///
    /// # Contract
    /// - Unknown `item_id` is a no-op returning `false`.
    /// - `updated_at` is bumped; entering `Done` also sets `done_at`.
    /// - Leaving `Done` keeps the previous `done_at`.
    /// - Status/release consistency is not enforced.
    pub fn move_item(
        &mut self,
        item_id: ItemId,
        to_status: ItemStatus,
        release_id: Option<ReleaseId>,
    ) -> bool {
        let now = self.now_ms();
        let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) else {
            debug!(
                "event=item_move module=store status=skipped reason=not_found item_id={item_id}"
            );
            return false;
        };

        let from_status = item.status;
        item.status = to_status;
        item.release_month_id = release_id;
        item.updated_at = now;
        if to_status == ItemStatus::Done {
            item.done_at = Some(now);
        }

        debug!(
            "event=item_move module=store status=ok item_id={} from={} to={}",
            item_id,
            from_status.as_str(),
            to_status.as_str()
        );
        self.publish(StoreChange::ItemMoved {
            id: item_id,
            status: to_status,
            release_id,
        });
        true
    }

    /// Replaces an item's free-text note. Unknown ids are a no-op.
    pub fn update_item_note(&mut self, item_id: ItemId, note: &str) -> bool {
        let now = self.now_ms();
        let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) else {
            return false;
        };
        item.note = note.to_string();
        item.updated_at = now;
        self.publish(StoreChange::ItemNoteUpdated(item_id));
        true
    }

    /// Items whose status and release reference both match exactly.
    ///
    /// `release_id = None` matches items without a release. Sorted by
    /// `done_at` (else `created_at`), most recent first; ties keep storage
    /// order.
    pub fn query_items(&self, status: ItemStatus, release_id: Option<ReleaseId>) -> Vec<Item> {
        let mut matched = self
            .items
            .iter()
            .filter(|item| item.status == status && item.release_month_id == release_id)
            .cloned()
            .collect::<Vec<_>>();
        matched.sort_by(|lhs, rhs| rhs.recency_key().cmp(&lhs.recency_key()));
        matched
    }

    /// Inbox items regardless of release reference, newest capture first.
    pub fn query_inbox_items(&self) -> Vec<Item> {
        let mut matched = self
            .items
            .iter()
            .filter(|item| item.status == ItemStatus::Inbox)
            .cloned()
            .collect::<Vec<_>>();
        matched.sort_by(|lhs, rhs| rhs.created_at.cmp(&lhs.created_at));
        matched
    }

    // ---- tags ----

    /// All tags in insertion order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Tags ascending by order key; equal keys keep insertion order.
    pub fn tags_sorted(&self) -> Vec<Tag> {
        let mut sorted = self.tags.clone();
        sorted.sort_by_key(|tag| tag.order);
        sorted
    }

    /// Display name of a tag, or an empty string when absent/unresolvable.
    pub fn tag_name(&self, tag_id: Option<TagId>) -> String {
        tag_id
            .and_then(|tag_id| self.tags.iter().find(|tag| tag.id == tag_id))
            .map(|tag| tag.name.clone())
            .unwrap_or_default()
    }

    /// Appends a tag with `order` equal to the current tag count.
    ///
    /// Blank names insert nothing and return `None`. Names are not deduplicated.
    pub fn add_tag(&mut self, name: &str) -> Option<Tag> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            debug!("event=tag_add module=store status=skipped reason=blank_name");
            return None;
        }

        let tag = Tag::new(trimmed, self.tags.len() as i64);
        self.tags.push(tag.clone());
        self.publish(StoreChange::TagAdded(tag.id));
        Some(tag)
    }

    // ---- derived statistics ----

    /// Number of achieved goals in `release`.
    pub fn goal_completion_count(&self, release: &ReleaseMonth) -> usize {
        release.achieved_goal_count()
    }

    /// Number of done items referencing `release`.
    pub fn done_count(&self, release: &ReleaseMonth) -> usize {
        self.query_items(ItemStatus::Done, Some(release.id)).len()
    }

    fn publish(&mut self, change: StoreChange) {
        self.version += 1;
        let event = StoreEvent {
            version: self.version,
            change,
        };
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }
}
