use monthplan_core::{
    ItemStatus, ManualClock, PlannerService, PlannerServiceError, Retro, SeedConfig,
    SharedStore,
};
use std::sync::Arc;
use uuid::Uuid;

fn setup() -> (PlannerService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(1_000));
    let store = SharedStore::with_config(clock.clone(), SeedConfig::default());
    (PlannerService::new(store), clock)
}

#[test]
fn capture_rejects_blank_text() {
    let (service, _) = setup();
    assert_eq!(
        service.capture(" \t ", None).unwrap_err(),
        PlannerServiceError::BlankText
    );
    assert!(service.inbox().is_empty());
}

#[test]
fn inbox_rows_resolve_tag_names() {
    let (service, _) = setup();
    let work = service.tags()[0].clone();
    service.capture("plan sprint", Some(work.id)).unwrap();
    service.capture("untagged", None).unwrap();

    let rows = service.inbox();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].item.text, "untagged");
    assert_eq!(rows[0].tag_name, "");
    assert_eq!(rows[1].tag_name, work.name);
}

#[test]
fn triage_and_complete_flow_into_dashboard() {
    let (service, clock) = setup();
    let keep = service.capture("write outline", None).unwrap();
    let finish = service.capture("book flights", None).unwrap();

    clock.set(2_000);
    let triaged = service.triage_to_backlog(keep.id).unwrap();
    assert_eq!(triaged.status, ItemStatus::Backlog);
    clock.set(3_000);
    let completed = service.complete_item(finish.id).unwrap();
    assert_eq!(completed.done_at, Some(3_000));

    let dashboard = service.dashboard().unwrap();
    assert!(service.inbox().is_empty());
    assert_eq!(dashboard.backlog.len(), 1);
    assert_eq!(dashboard.backlog[0].item.id, keep.id);
    assert_eq!(dashboard.done.len(), 1);
    assert_eq!(dashboard.done_count, 1);
    assert_eq!(dashboard.total_goals, 3);
    assert_eq!(dashboard.achieved_goals, 0);
}

#[test]
fn triage_unknown_item_reports_not_found() {
    let (service, _) = setup();
    let missing = Uuid::new_v4();
    assert_eq!(
        service.triage_to_backlog(missing).unwrap_err(),
        PlannerServiceError::ItemNotFound(missing)
    );
}

#[test]
fn add_backlog_item_lands_in_selected_backlog() {
    let (service, _) = setup();
    let item = service.add_backlog_item("  refactor billing ").unwrap();
    let dashboard = service.dashboard().unwrap();

    assert_eq!(item.text, "refactor billing");
    assert_eq!(item.status, ItemStatus::Backlog);
    assert_eq!(item.release_month_id, Some(dashboard.release.id));
    assert_eq!(dashboard.backlog[0].item.id, item.id);
    assert_eq!(
        service.add_backlog_item("").unwrap_err(),
        PlannerServiceError::BlankText
    );
}

#[test]
fn goal_edits_bump_updated_at_and_drive_counts() {
    let (service, clock) = setup();
    let goal_id = service.dashboard().unwrap().release.goals[0].id;

    clock.set(7_000);
    let release = service.toggle_goal(goal_id).unwrap();
    assert_eq!(release.updated_at, 7_000);
    assert_eq!(service.dashboard().unwrap().achieved_goals, 1);

    service.set_goal_text(goal_id, "Run 50km").unwrap();
    let added = service.add_goal("Read two books").unwrap();
    let dashboard = service.dashboard().unwrap();
    assert_eq!(dashboard.release.goals[0].text, "Run 50km");
    assert_eq!(dashboard.release.goals[3].id, added.id);
    assert_eq!(dashboard.total_goals, 4);

    service.toggle_goal(goal_id).unwrap();
    assert_eq!(service.dashboard().unwrap().achieved_goals, 0);

    let missing = Uuid::new_v4();
    assert_eq!(
        service.toggle_goal(missing).unwrap_err(),
        PlannerServiceError::GoalNotFound(missing)
    );
}

#[test]
fn theme_and_retro_round_trip_through_selected_release() {
    let (service, _) = setup();
    service.set_theme("Focus").unwrap();
    let retro = Retro {
        right_things: "shipped".to_string(),
        wrong_things: "late nights".to_string(),
        next_actions: "sleep".to_string(),
        one_line_summary: "tiring but good".to_string(),
    };
    service.save_retro(retro.clone()).unwrap();

    let summary = service.retro_summary().unwrap();
    assert_eq!(summary.retro, retro);
    assert_eq!(service.dashboard().unwrap().release.theme, "Focus");
}

#[test]
fn retro_summary_counts_done_items_and_goals() {
    let (service, _) = setup();
    let item = service.capture("done thing", None).unwrap();
    service.complete_item(item.id).unwrap();
    let goal_id = service.dashboard().unwrap().release.goals[2].id;
    service.toggle_goal(goal_id).unwrap();

    let summary = service.retro_summary().unwrap();
    assert_eq!(summary.done_count, 1);
    assert_eq!(summary.achieved_goals, 1);
    assert_eq!(summary.total_goals, 3);
}

#[test]
fn set_item_note_updates_done_highlight() {
    let (service, _) = setup();
    let item = service.capture("talk", None).unwrap();
    service.complete_item(item.id).unwrap();

    let noted = service.set_item_note(item.id, "great questions").unwrap();
    assert_eq!(noted.note, "great questions");
    assert_eq!(service.dashboard().unwrap().done[0].item.note, "great questions");
}

#[test]
fn open_month_validates_creates_and_selects() {
    let (service, _) = setup();
    assert_eq!(
        service.open_month("2031-13").unwrap_err(),
        PlannerServiceError::InvalidYearMonth("2031-13".to_string())
    );

    let created = service.open_month("2031-05").unwrap();
    let reopened = service.open_month("2031-05").unwrap();
    assert_eq!(created, reopened);

    let months = service.months();
    assert_eq!(months.len(), 2);
    assert!(months[1].is_selected);
    assert_eq!(months[1].year_month, "2031-05");
    assert_eq!(service.dashboard().unwrap().release.id, created);

    service.select_month(months[0].release_id).unwrap();
    assert!(service.months()[0].is_selected);
    let missing = Uuid::new_v4();
    assert_eq!(
        service.select_month(missing).unwrap_err(),
        PlannerServiceError::ReleaseNotFound(missing)
    );
}

#[test]
fn items_stay_with_their_month_after_switching() {
    let (service, _) = setup();
    let item = service.add_backlog_item("old month task").unwrap();
    service.open_month("2031-06").unwrap();

    let dashboard = service.dashboard().unwrap();
    assert!(dashboard.backlog.is_empty());
    assert_ne!(item.release_month_id, Some(dashboard.release.id));
}

#[test]
fn add_tag_appends_in_display_order() {
    let (service, _) = setup();
    let tag = service.add_tag(" Travel ").unwrap();
    let tags = service.tags();
    assert_eq!(tags.last().unwrap().id, tag.id);
    assert_eq!(tag.order, 6);
    assert_eq!(
        service.add_tag("").unwrap_err(),
        PlannerServiceError::BlankTagName
    );
}
