//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into surface-level APIs.
//! - Keep UI/FFI layers decoupled from store internals.

pub mod planner_service;
