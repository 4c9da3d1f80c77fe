//! Core domain logic for HabitKit.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{Event, EventId, EventValidationError};
pub use model::habit::{Habit, HabitId, HabitValidationError, HABIT_COLOR_PALETTE};
pub use repo::store::{SqliteStore, Store, StoreError, StoreKeys, StoreResult};
pub use service::event_service::{
    events_by_date, events_on_date, DayMarker, EventService, EventServiceError, NewEventRequest,
    EVENT_DOT_COLOR,
};
pub use service::habit_service::{calculate_streak, HabitService, HabitServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
