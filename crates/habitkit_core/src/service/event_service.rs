//! Event use-case service and the day-level date index.
//!
//! # Responsibility
//! - Provide the add-event entry point over the session collection.
//! - Derive calendar markers and day-detail lookups from the event list.
//!
//! # Invariants
//! - The session collection keeps insertion order; no sort is applied.
//! - Derivations are pure and recomputed from the current collection.

use crate::model::event::{Event, EventValidationError};
use crate::repo::store::{Store, StoreError};
use log::info;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Dot color rendered on marked calendar days.
pub const EVENT_DOT_COLOR: &str = "#4CAF50";

/// Service error for event use-cases.
#[derive(Debug)]
pub enum EventServiceError {
    /// Input failed model validation; nothing was mutated or persisted.
    Validation(EventValidationError),
    /// Persistence-layer failure; session state was rolled back.
    Store(StoreError),
}

impl Display for EventServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EventServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<EventValidationError> for EventServiceError {
    fn from(value: EventValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for EventServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Request model for creating a calendar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEventRequest {
    /// Event title; non-empty after trim.
    pub title: String,
    /// ISO calendar day the event belongs to.
    pub date: String,
    /// Optional free-text time.
    pub time: Option<String>,
    /// Optional free-text description.
    pub description: Option<String>,
}

/// Marker flag used to render a dot on a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayMarker {
    pub marked: bool,
    pub dot_color: &'static str,
}

/// Event service facade over a store implementation.
///
/// Owns the in-session event collection mirrored from durable state.
pub struct EventService<S: Store> {
    store: S,
    events: Vec<Event>,
}

impl<S: Store> EventService<S> {
    /// Creates a service and loads the session collection from the store.
    pub fn new(store: S) -> Self {
        let events = store.get_events();
        info!(
            "event=events_load module=event_service status=ok count={}",
            events.len()
        );
        Self { store, events }
    }

    /// Returns the session collection in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Creates an event and appends it to the session collection.
    ///
    /// # Contract
    /// - Rejects a title that trims to empty before any persistence call.
    /// - `date` must be a well-formed ISO date; `time`/`description` are
    ///   free text.
    pub fn add_event(&mut self, request: NewEventRequest) -> Result<&Event, EventServiceError> {
        let mut event = Event::new(request.title.trim(), request.date);
        event.time = request.time;
        event.description = request.description;
        event.validate()?;

        let mut draft = self.events.clone();
        draft.push(event);
        let position = draft.len() - 1;

        self.store.save_events(&draft)?;
        self.events = draft;
        let created = &self.events[position];
        info!("event=event_add module=event_service status=ok id={}", created.id);
        Ok(created)
    }
}

/// Groups events by date into calendar marker flags.
///
/// Produces one marked entry per distinct date present in the collection.
/// Pure derivation with no stored state; recomputed on every render.
pub fn events_by_date(events: &[Event]) -> BTreeMap<String, DayMarker> {
    let mut markers = BTreeMap::new();
    for event in events {
        markers.insert(
            event.date.clone(),
            DayMarker {
                marked: true,
                dot_color: EVENT_DOT_COLOR,
            },
        );
    }
    markers
}

/// Filters the collection to events on exactly `date`, insertion order
/// preserved.
pub fn events_on_date<'a>(events: &'a [Event], date: &str) -> Vec<&'a Event> {
    events.iter().filter(|event| event.date == date).collect()
}

#[cfg(test)]
mod tests {
    use super::{events_by_date, events_on_date, EVENT_DOT_COLOR};
    use crate::model::event::Event;

    fn event(title: &str, date: &str) -> Event {
        Event::new(title, date)
    }

    #[test]
    fn groups_one_marker_per_distinct_date() {
        let events = vec![
            event("standup", "2024-01-01"),
            event("dentist", "2024-01-01"),
            event("trip", "2024-01-02"),
        ];

        let markers = events_by_date(&events);
        assert_eq!(markers.len(), 2);
        let marker = markers["2024-01-01"];
        assert!(marker.marked);
        assert_eq!(marker.dot_color, EVENT_DOT_COLOR);
        assert!(markers.contains_key("2024-01-02"));
    }

    #[test]
    fn empty_collection_yields_no_markers() {
        assert!(events_by_date(&[]).is_empty());
    }

    #[test]
    fn day_lookup_keeps_insertion_order() {
        let events = vec![
            event("first", "2024-01-01"),
            event("other day", "2024-01-02"),
            event("second", "2024-01-01"),
        ];

        let day = events_on_date(&events, "2024-01-01");
        assert_eq!(day.len(), 2);
        assert_eq!(day[0].title, "first");
        assert_eq!(day[1].title, "second");
        assert!(events_on_date(&events, "2024-01-03").is_empty());
    }
}
