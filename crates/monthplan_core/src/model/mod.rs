//! Domain model for monthly planning.
//!
//! # Responsibility
//! - Define the entities owned by the domain store: releases, items, tags.
//! - Keep goals and retro embedded in their owning release.
//!
//! # Invariants
//! - Every entity except `Retro` is identified by a stable `Uuid`.
//! - Items reference tags and releases weakly, by id only.
//! - Timestamps are Unix epoch milliseconds.

pub mod item;
pub mod release;
pub mod tag;
