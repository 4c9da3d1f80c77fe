//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Keep error semantics simple for UI integration.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Failures surface as `ok=false` envelopes, never as exceptions.

use habitkit_core::db::open_db;
use habitkit_core::{
    calculate_streak, core_version as core_version_inner, events_by_date, events_on_date,
    init_logging as init_logging_inner, ping as ping_inner, Event, EventService, Habit, HabitId,
    HabitService, NewEventRequest, SqliteStore, Store, StoreKeys,
};
use log::error;
use std::path::PathBuf;
use std::sync::OnceLock;

const DB_FILE_NAME: &str = "habitkit.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One date-keyed completion flag of a habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEntry {
    /// ISO `YYYY-MM-DD` date.
    pub date: String,
    /// Completed flag for that date.
    pub done: bool,
}

/// Habit projection returned to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitView {
    /// Stable habit ID in string form.
    pub id: String,
    pub name: String,
    /// Palette color token in `#RRGGBB` form.
    pub color: String,
    pub completions: Vec<CompletionEntry>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Precomputed display label, e.g. `3 day streak 💪`.
    pub streak_label: String,
}

/// Event projection returned to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventView {
    /// Stable event ID in string form.
    pub id: String,
    pub title: String,
    /// ISO `YYYY-MM-DD` date.
    pub date: String,
    pub time: Option<String>,
    pub description: Option<String>,
}

/// Calendar marker for one distinct date carrying at least one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayMarkerView {
    pub date: String,
    pub marked: bool,
    /// Dot color token in `#RRGGBB` form.
    pub dot_color: String,
}

/// Generic action response envelope for mutation calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Optional created/affected record ID.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
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

/// Habit list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitListResponse {
    /// Habits, newest first (empty on load failure).
    pub items: Vec<HabitView>,
    pub message: String,
}

/// Event list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListResponse {
    /// Events in insertion order (empty on load failure).
    pub items: Vec<EventView>,
    pub message: String,
}

/// Lists habits, newest first, each with a precomputed streak label.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; a failed load yields an empty list plus a message.
#[flutter_rust_bridge::frb(sync)]
pub fn habits_list() -> HabitListResponse {
    match with_habit_service(|service| Ok(service.habits().iter().map(to_habit_view).collect::<Vec<_>>())) {
        Ok(items) => HabitListResponse {
            message: format!("{} habit(s).", items.len()),
            items,
        },
        Err(err) => {
            error!("event=ffi_call module=ffi status=error fn=habits_list error={err}");
            HabitListResponse {
                items: Vec::new(),
                message: format!("habits_list failed: {err}"),
            }
        }
    }
}

/// Creates a habit from UI input.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Rejects names that trim to empty.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_add(name: String) -> ActionResponse {
    match with_habit_service(|service| {
        let habit = service.add_habit(name.as_str()).map_err(|err| err.to_string())?;
        Ok(habit.id.to_string())
    }) {
        Ok(id) => ActionResponse::success("Habit created.", Some(id)),
        Err(err) => ActionResponse::failure(format!("habit_add failed: {err}")),
    }
}

/// Flips one date's completion flag on one habit.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - `date` must be ISO `YYYY-MM-DD`.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_toggle(id: String, date: String) -> ActionResponse {
    let habit_id = match parse_habit_id(&id) {
        Ok(habit_id) => habit_id,
        Err(message) => return ActionResponse::failure(message),
    };

    match with_habit_service(|service| {
        service
            .toggle_completion(habit_id, date.as_str())
            .map_err(|err| err.to_string())?;
        Ok(())
    }) {
        Ok(()) => ActionResponse::success("Completion toggled.", Some(id)),
        Err(err) => ActionResponse::failure(format!("habit_toggle failed: {err}")),
    }
}

/// Deletes a habit by ID; unknown IDs are a no-op.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_delete(id: String) -> ActionResponse {
    let habit_id = match parse_habit_id(&id) {
        Ok(habit_id) => habit_id,
        Err(message) => return ActionResponse::failure(message),
    };

    match with_habit_service(|service| service.delete_habit(habit_id).map_err(|err| err.to_string()))
    {
        Ok(true) => ActionResponse::success("Habit deleted.", Some(id)),
        Ok(false) => ActionResponse::success("Habit not found; nothing deleted.", None),
        Err(err) => ActionResponse::failure(format!("habit_delete failed: {err}")),
    }
}

/// Lists all events in insertion order.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; a failed load yields an empty list plus a message.
#[flutter_rust_bridge::frb(sync)]
pub fn events_list() -> EventListResponse {
    match with_event_service(|service| Ok(service.events().iter().map(to_event_view).collect::<Vec<_>>())) {
        Ok(items) => EventListResponse {
            message: format!("{} event(s).", items.len()),
            items,
        },
        Err(err) => {
            error!("event=ffi_call module=ffi status=error fn=events_list error={err}");
            EventListResponse {
                items: Vec::new(),
                message: format!("events_list failed: {err}"),
            }
        }
    }
}

/// Creates a calendar event from UI input.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Rejects titles that trim to empty and malformed dates.
#[flutter_rust_bridge::frb(sync)]
pub fn event_add(
    title: String,
    date: String,
    time: Option<String>,
    description: Option<String>,
) -> ActionResponse {
    let request = NewEventRequest {
        title,
        date,
        time,
        description,
    };
    match with_event_service(|service| {
        let event = service.add_event(request).map_err(|err| err.to_string())?;
        Ok(event.id.to_string())
    }) {
        Ok(id) => ActionResponse::success("Event created.", Some(id)),
        Err(err) => ActionResponse::failure(format!("event_add failed: {err}")),
    }
}

/// Lists events on exactly one date, insertion order preserved.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn events_on(date: String) -> EventListResponse {
    match with_event_service(|service| {
        Ok(events_on_date(service.events(), date.as_str())
            .into_iter()
            .map(to_event_view)
            .collect::<Vec<_>>())
    }) {
        Ok(items) => EventListResponse {
            message: format!("{} event(s) on {date}.", items.len()),
            items,
        },
        Err(err) => EventListResponse {
            items: Vec::new(),
            message: format!("events_on failed: {err}"),
        },
    }
}

/// Returns one calendar marker per distinct date carrying events.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; a failed load yields an empty list.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_markers() -> Vec<DayMarkerView> {
    with_event_service(|service| {
        Ok(events_by_date(service.events())
            .into_iter()
            .map(|(date, marker)| DayMarkerView {
                date,
                marked: marker.marked,
                dot_color: marker.dot_color.to_string(),
            })
            .collect())
    })
    .unwrap_or_else(|err| {
        error!("event=ffi_call module=ffi status=error fn=calendar_markers error={err}");
        Vec::new()
    })
}

/// Erases all persisted application data. Diagnostic use only.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn debug_clear_all() -> ActionResponse {
    let result = open_store_conn().and_then(|conn| {
        let store = SqliteStore::try_new(&conn, StoreKeys::default())
            .map_err(|err| format!("store init failed: {err}"))?;
        store.clear_all().map_err(|err| err.to_string())
    });

    match result {
        Ok(()) => ActionResponse::success("All data cleared.", None),
        Err(err) => ActionResponse::failure(format!("debug_clear_all failed: {err}")),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("HABITKIT_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn open_store_conn() -> Result<rusqlite::Connection, String> {
    open_db(resolve_db_path()).map_err(|err| format!("DB open failed: {err}"))
}

fn with_habit_service<T>(
    f: impl FnOnce(&mut HabitService<SqliteStore<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let conn = open_store_conn()?;
    let store = SqliteStore::try_new(&conn, StoreKeys::default())
        .map_err(|err| format!("store init failed: {err}"))?;
    let mut service = HabitService::new(store, None);
    f(&mut service)
}

fn with_event_service<T>(
    f: impl FnOnce(&mut EventService<SqliteStore<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let conn = open_store_conn()?;
    let store = SqliteStore::try_new(&conn, StoreKeys::default())
        .map_err(|err| format!("store init failed: {err}"))?;
    let mut service = EventService::new(store);
    f(&mut service)
}

fn parse_habit_id(id: &str) -> Result<HabitId, String> {
    uuid::Uuid::parse_str(id.trim()).map_err(|_| format!("invalid habit id: `{id}`"))
}

fn to_habit_view(habit: &Habit) -> HabitView {
    HabitView {
        id: habit.id.to_string(),
        name: habit.name.clone(),
        color: habit.color.clone(),
        completions: habit
            .completions
            .iter()
            .map(|(date, done)| CompletionEntry {
                date: date.clone(),
                done: *done,
            })
            .collect(),
        created_at: habit.created_at,
        streak_label: calculate_streak(&habit.completions),
    }
}

fn to_event_view(event: &Event) -> EventView {
    EventView {
        id: event.id.to_string(),
        title: event.title.clone(),
        date: event.date.clone(),
        time: event.time.clone(),
        description: event.description.clone(),
    }
}
