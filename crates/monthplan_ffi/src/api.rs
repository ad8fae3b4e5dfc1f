//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the planner surfaces (inbox, month, retro, settings) to Dart via FRB.
//! - Own the process-global planner store.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - IDs cross the boundary as UUID strings; timestamps as epoch millis.
//! - Failures are reported in response envelopes, never thrown.

use log::warn;
use monthplan_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ItemRow, PlannerResult, PlannerService, Retro, SharedStore, Tag,
};
use std::sync::OnceLock;
use uuid::Uuid;

static PLANNER: OnceLock<PlannerService> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Item projection for list rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub item_id: String,
    pub text: String,
    /// `inbox|backlog|done`.
    pub status: String,
    pub tag_id: Option<String>,
    /// Empty when untagged or the tag does not resolve.
    pub tag_name: String,
    pub release_id: Option<String>,
    pub note: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub done_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalView {
    pub goal_id: String,
    pub text: String,
    pub is_achieved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagView {
    pub tag_id: String,
    pub name: String,
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthOptionView {
    pub release_id: String,
    pub year_month: String,
    pub is_selected: bool,
}

/// Month dashboard envelope; `ok = false` leaves the payload fields empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardResponse {
    pub ok: bool,
    pub message: String,
    pub release_id: String,
    pub year_month: String,
    pub theme: String,
    pub goals: Vec<GoalView>,
    pub backlog: Vec<ItemView>,
    pub done: Vec<ItemView>,
    pub achieved_goals: u32,
    pub total_goals: u32,
    pub done_count: u32,
}

/// Retro editor envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetroResponse {
    pub ok: bool,
    pub message: String,
    pub year_month: String,
    pub right_things: String,
    pub wrong_things: String,
    pub next_actions: String,
    pub one_line_summary: String,
    pub done_count: u32,
    pub achieved_goals: u32,
    pub total_goals: u32,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// ID of the created/affected entity.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Uuid) -> Self {
        Self {
            ok: true,
            id: Some(id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

// ---- inbox ----

/// Captures one inbox item with an optional tag.
#[flutter_rust_bridge::frb(sync)]
pub fn inbox_capture(text: String, tag_id: Option<String>) -> ActionResponse {
    let tag_id = match tag_id.as_deref().map(parse_id).transpose() {
        Ok(value) => value,
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error op=inbox_capture reason=invalid_id");
            return ActionResponse::failure(format!("inbox_capture failed: {err}"));
        }
    };
    respond("inbox_capture", "Captured.", planner().capture(&text, tag_id).map(|item| item.id))
}

/// Inbox rows, newest capture first.
#[flutter_rust_bridge::frb(sync)]
pub fn inbox_list() -> Vec<ItemView> {
    planner().inbox().into_iter().map(to_item_view).collect()
}

/// Moves an item into the selected month's backlog.
#[flutter_rust_bridge::frb(sync)]
pub fn item_triage(item_id: String) -> ActionResponse {
    with_id("item_triage", &item_id, |id| {
        respond(
            "item_triage",
            "Moved to backlog.",
            planner().triage_to_backlog(id).map(|item| item.id),
        )
    })
}

/// Marks an item done in the selected month.
#[flutter_rust_bridge::frb(sync)]
pub fn item_complete(item_id: String) -> ActionResponse {
    with_id("item_complete", &item_id, |id| {
        respond(
            "item_complete",
            "Done.",
            planner().complete_item(id).map(|item| item.id),
        )
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn item_set_note(item_id: String, note: String) -> ActionResponse {
    with_id("item_set_note", &item_id, |id| {
        respond(
            "item_set_note",
            "Note saved.",
            planner().set_item_note(id, &note).map(|item| item.id),
        )
    })
}

// ---- month dashboard ----

#[flutter_rust_bridge::frb(sync)]
pub fn month_dashboard() -> DashboardResponse {
    match planner().dashboard() {
        Ok(dashboard) => DashboardResponse {
            ok: true,
            message: String::new(),
            release_id: dashboard.release.id.to_string(),
            year_month: dashboard.release.year_month,
            theme: dashboard.release.theme,
            goals: dashboard
                .release
                .goals
                .into_iter()
                .map(|goal| GoalView {
                    goal_id: goal.id.to_string(),
                    text: goal.text,
                    is_achieved: goal.is_achieved,
                })
                .collect(),
            backlog: dashboard.backlog.into_iter().map(to_item_view).collect(),
            done: dashboard.done.into_iter().map(to_item_view).collect(),
            achieved_goals: to_u32(dashboard.achieved_goals),
            total_goals: to_u32(dashboard.total_goals),
            done_count: to_u32(dashboard.done_count),
        },
        Err(err) => DashboardResponse {
            message: format!("month_dashboard failed: {err}"),
            ..Default::default()
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn month_set_theme(theme: String) -> ActionResponse {
    respond(
        "month_set_theme",
        "Theme saved.",
        planner().set_theme(&theme).map(|release| release.id),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn goal_add(text: String) -> ActionResponse {
    respond(
        "goal_add",
        "Goal added.",
        planner().add_goal(&text).map(|goal| goal.id),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn goal_set_text(goal_id: String, text: String) -> ActionResponse {
    with_id("goal_set_text", &goal_id, |id| {
        respond(
            "goal_set_text",
            "Goal saved.",
            planner().set_goal_text(id, &text).map(|_| id),
        )
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn goal_toggle(goal_id: String) -> ActionResponse {
    with_id("goal_toggle", &goal_id, |id| {
        respond(
            "goal_toggle",
            "Goal toggled.",
            planner().toggle_goal(id).map(|_| id),
        )
    })
}

/// Adds an item straight into the selected month's backlog.
#[flutter_rust_bridge::frb(sync)]
pub fn backlog_add(text: String) -> ActionResponse {
    respond(
        "backlog_add",
        "Added to backlog.",
        planner().add_backlog_item(&text).map(|item| item.id),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn months_list() -> Vec<MonthOptionView> {
    planner()
        .months()
        .into_iter()
        .map(|month| MonthOptionView {
            release_id: month.release_id.to_string(),
            year_month: month.year_month,
            is_selected: month.is_selected,
        })
        .collect()
}

/// Selects (creating when missing) the month labeled `YYYY-MM`.
#[flutter_rust_bridge::frb(sync)]
pub fn month_open(year_month: String) -> ActionResponse {
    respond("month_open", "Month opened.", planner().open_month(&year_month))
}

// ---- retro ----

#[flutter_rust_bridge::frb(sync)]
pub fn retro_load() -> RetroResponse {
    match planner().retro_summary() {
        Ok(summary) => RetroResponse {
            ok: true,
            message: String::new(),
            year_month: summary.year_month,
            right_things: summary.retro.right_things,
            wrong_things: summary.retro.wrong_things,
            next_actions: summary.retro.next_actions,
            one_line_summary: summary.retro.one_line_summary,
            done_count: to_u32(summary.done_count),
            achieved_goals: to_u32(summary.achieved_goals),
            total_goals: to_u32(summary.total_goals),
        },
        Err(err) => RetroResponse {
            message: format!("retro_load failed: {err}"),
            ..Default::default()
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn retro_save(
    right_things: String,
    wrong_things: String,
    next_actions: String,
    one_line_summary: String,
) -> ActionResponse {
    let retro = Retro {
        right_things,
        wrong_things,
        next_actions,
        one_line_summary,
    };
    respond(
        "retro_save",
        "Retro saved.",
        planner().save_retro(retro).map(|release| release.id),
    )
}

// ---- settings ----

#[flutter_rust_bridge::frb(sync)]
pub fn tag_add(name: String) -> ActionResponse {
    respond("tag_add", "Tag added.", planner().add_tag(&name).map(|tag| tag.id))
}

/// Tags sorted by display order.
#[flutter_rust_bridge::frb(sync)]
pub fn tags_list() -> Vec<TagView> {
    planner().tags().into_iter().map(to_tag_view).collect()
}

/// Store mutation counter; UI polls it to decide when to re-query.
#[flutter_rust_bridge::frb(sync)]
pub fn store_version() -> u64 {
    planner().store().version()
}

fn planner() -> &'static PlannerService {
    PLANNER.get_or_init(|| PlannerService::new(SharedStore::new()))
}

fn parse_id(value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid id `{}`", value.trim()))
}

fn with_id(operation: &str, raw: &str, f: impl FnOnce(Uuid) -> ActionResponse) -> ActionResponse {
    match parse_id(raw) {
        Ok(id) => f(id),
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error op={operation} reason=invalid_id");
            ActionResponse::failure(format!("{operation} failed: {err}"))
        }
    }
}

fn respond(operation: &str, message: &str, result: PlannerResult<Uuid>) -> ActionResponse {
    match result {
        Ok(id) => ActionResponse::success(message, id),
        Err(err) => {
            // Error text may echo a month label but never item/goal/retro text.
            warn!("event=ffi_call module=ffi status=error op={operation} error={err}");
            ActionResponse::failure(format!("{operation} failed: {err}"))
        }
    }
}

fn to_item_view(row: ItemRow) -> ItemView {
    let item = row.item;
    ItemView {
        item_id: item.id.to_string(),
        text: item.text,
        status: item.status.as_str().to_string(),
        tag_id: item.tag_id.map(|id| id.to_string()),
        tag_name: row.tag_name,
        release_id: item.release_month_id.map(|id| id.to_string()),
        note: item.note,
        created_at: item.created_at,
        updated_at: item.updated_at,
        done_at: item.done_at,
    }
}

fn to_tag_view(tag: Tag) -> TagView {
    TagView {
        tag_id: tag.id.to_string(),
        name: tag.name,
        order: tag.order,
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        backlog_add, core_version, goal_toggle, inbox_capture, inbox_list, init_logging,
        item_complete, item_triage, month_dashboard, month_open, ping, retro_load, retro_save,
        store_version, tag_add, tags_list,
    };

    // All tests share the process-global store; assertions key on unique text.
    fn unique_text(prefix: &str) -> String {
        format!("{prefix}-{}", uuid::Uuid::new_v4())
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/logs".to_string());
        assert!(error.contains("unsupported log level"));
    }

    #[test]
    fn inbox_capture_rejects_blank_text_and_bad_tag_id() {
        let blank = inbox_capture("   ".to_string(), None);
        assert!(!blank.ok);
        assert!(blank.message.contains("blank"));

        let bad_tag = inbox_capture("x".to_string(), Some("not-a-uuid".to_string()));
        assert!(!bad_tag.ok);
        assert!(bad_tag.message.contains("invalid id"));
    }

    #[test]
    fn captured_item_with_tag_shows_tag_name() {
        let tag = tags_list().into_iter().next().expect("seeded tag");
        let text = unique_text("tagged");
        let response = inbox_capture(text.clone(), Some(tag.tag_id.clone()));
        assert!(response.ok, "{}", response.message);

        let row = inbox_list()
            .into_iter()
            .find(|row| row.text == text)
            .expect("captured row listed");
        assert_eq!(row.status, "inbox");
        assert_eq!(row.tag_name, tag.name);
        assert_eq!(row.release_id, None);
    }

    #[test]
    fn triage_and_complete_show_up_on_dashboard() {
        let keep = unique_text("keep");
        let finish = unique_text("finish");
        let keep_id = inbox_capture(keep.clone(), None).id.expect("keep id");
        let finish_id = inbox_capture(finish.clone(), None).id.expect("finish id");
        let version_before = store_version();

        assert!(item_triage(keep_id).ok);
        assert!(item_complete(finish_id).ok);
        assert!(store_version() >= version_before + 2);

        let dashboard = month_dashboard();
        assert!(dashboard.ok, "{}", dashboard.message);
        assert!(dashboard.backlog.iter().any(|row| row.text == keep));
        let done = dashboard
            .done
            .iter()
            .find(|row| row.text == finish)
            .expect("done row");
        assert_eq!(done.status, "done");
        assert!(done.done_at.is_some());
    }

    #[test]
    fn item_triage_rejects_unknown_and_malformed_ids() {
        assert!(!item_triage("garbage".to_string()).ok);
        let unknown = item_triage(uuid::Uuid::new_v4().to_string());
        assert!(!unknown.ok);
        assert!(unknown.message.contains("item not found"));
    }

    #[test]
    fn backlog_add_and_goal_toggle_report_success() {
        let text = unique_text("backlog");
        assert!(backlog_add(text.clone()).ok);
        let dashboard = month_dashboard();
        assert!(dashboard.backlog.iter().any(|row| row.text == text));

        let goal = dashboard.goals.first().expect("seeded goal");
        assert!(goal_toggle(goal.goal_id.clone()).ok);
    }

    #[test]
    fn month_open_rejects_malformed_label() {
        let response = month_open("2026/10".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("YYYY-MM"));
    }

    #[test]
    fn retro_save_round_trips() {
        let summary = unique_text("summary");
        let saved = retro_save(
            "right".to_string(),
            "wrong".to_string(),
            "next".to_string(),
            summary.clone(),
        );
        assert!(saved.ok, "{}", saved.message);
        let loaded = retro_load();
        assert!(loaded.ok);
        assert_eq!(loaded.one_line_summary, summary);
    }

    #[test]
    fn tag_add_appends_to_list() {
        let name = unique_text("tag");
        let response = tag_add(name.clone());
        assert!(response.ok);
        assert!(tags_list().iter().any(|tag| tag.name == name));
        assert!(!tag_add("  ".to_string()).ok);
    }
}
