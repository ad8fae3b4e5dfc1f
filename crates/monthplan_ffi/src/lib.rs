//! Flutter-facing bindings for the monthly planner core.

pub mod api;
