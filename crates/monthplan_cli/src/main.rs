//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `monthplan_core` linkage without the Flutter/FFI runtime.
//! - Print a deterministic summary of a freshly seeded planner.

use monthplan_core::{PlannerService, SharedStore};

fn main() {
    println!("monthplan_core ping={}", monthplan_core::ping());
    println!("monthplan_core version={}", monthplan_core::core_version());

    let planner = PlannerService::new(SharedStore::new());
    match planner.dashboard() {
        Ok(dashboard) => {
            println!("month={}", dashboard.release.year_month);
            println!(
                "goals={}/{} done={} backlog={}",
                dashboard.achieved_goals,
                dashboard.total_goals,
                dashboard.done_count,
                dashboard.backlog.len()
            );
        }
        Err(err) => println!("dashboard unavailable: {err}"),
    }

    let tags = planner
        .tags()
        .into_iter()
        .map(|tag| tag.name)
        .collect::<Vec<_>>();
    println!("tags={}", tags.join(","));
}
