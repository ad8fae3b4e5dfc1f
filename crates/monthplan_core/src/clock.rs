//! Wall-clock access and month labels.
//!
//! # Responsibility
//! - Provide the single time source used by store mutations.
//! - Format and validate `YYYY-MM` release labels.
//!
//! # Invariants
//! - Timestamps are Unix epoch milliseconds.
//! - Month labels are computed in the local time zone.

use chrono::{Local, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::atomic::{AtomicI64, Ordering};

static YEAR_MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("valid year-month regex"));

/// Time source for store mutations.
pub trait Clock: Send + Sync {
    /// Current time in Unix epoch milliseconds.
    fn now_ms(&self) -> i64;
}

/// Clock backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Settable clock for deterministic callers.
///
/// Shared through `Arc` so a test can advance time while the store holds it.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(now_ms),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }

    /// Moves the clock forward and returns the new time.
    pub fn advance(&self, delta_ms: i64) -> i64 {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst) + delta_ms
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

/// Formats an epoch-millisecond instant as a local `YYYY-MM` label.
///
/// Falls back to UTC when the local conversion is unavailable.
pub fn year_month_label(epoch_ms: i64) -> String {
    match Local.timestamp_millis_opt(epoch_ms).earliest() {
        Some(local) => local.format("%Y-%m").to_string(),
        None => Utc
            .timestamp_millis_opt(epoch_ms)
            .earliest()
            .map(|utc| utc.format("%Y-%m").to_string())
            .unwrap_or_else(|| "1970-01".to_string()),
    }
}

/// Returns whether `value` is a well-formed `YYYY-MM` label.
pub fn is_valid_year_month(value: &str) -> bool {
    YEAR_MONTH_RE.is_match(value)
}
