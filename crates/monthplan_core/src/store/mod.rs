//! In-memory domain store and its serialized shared handle.
//!
//! # Responsibility
//! - Own every release, item and tag plus the selected release id.
//! - Answer all reads and apply all writes the planner surfaces need.
//! - Publish one change event per applied mutation.
//!
//! # Invariants
//! - Every operation is total: a missing id degrades to a no-op or an
//!   empty/absent result, never an error or panic.
//! - Mutations are applied atomically with respect to queries.
//! - State is process-lifetime only; nothing is persisted.

pub mod domain_store;
pub mod event;
pub mod shared_store;
