//! Core domain logic for monthly planning.
//! This crate is the single source of truth for planner invariants.

pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use clock::{is_valid_year_month, year_month_label, Clock, ManualClock, SystemClock};
pub use config::SeedConfig;
pub use logging::{
    default_log_level, init_logging, logging_status, LogLevel, LoggingError,
};
pub use model::item::{parse_item_status, Item, ItemId, ItemStatus};
pub use model::release::{Goal, GoalId, ReleaseId, ReleaseMonth, Retro};
pub use model::tag::{Tag, TagId};
pub use service::planner_service::{
    ItemRow, MonthDashboard, MonthOption, PlannerResult, PlannerService, PlannerServiceError,
    RetroSummary,
};
pub use store::domain_store::DomainStore;
pub use store::event::{StoreChange, StoreEvent};
pub use store::shared_store::SharedStore;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
