//! Calendar event domain model.
//!
//! # Invariants
//! - `id` is stable and never reused for another event.
//! - `date` is an ISO `YYYY-MM-DD` string; multiple events may share a date.
//! - `time` and `description` are free text and omitted from the wire when
//!   absent.

use crate::model::date::is_iso_date;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a calendar event.
pub type EventId = Uuid;

/// Validation failures raised before an event reaches persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// `date` is not a well-formed ISO date.
    InvalidDate(String),
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "event title must not be empty"),
            Self::InvalidDate(date) => {
                write!(f, "event date `{date}` is not a YYYY-MM-DD date")
            }
        }
    }
}

impl Error for EventValidationError {}

/// User-created calendar entry bound to one specific day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Stable global ID, assigned at creation.
    pub id: EventId,
    /// Display title; non-empty after trim.
    pub title: String,
    /// ISO calendar day the event belongs to; set at creation.
    pub date: String,
    /// Optional free-text time; not validated as a time format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Event {
    /// Creates an event with a generated stable ID.
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            date: date.into(),
            time: None,
            description: None,
        }
    }

    /// Checks field-level invariants.
    ///
    /// # Errors
    /// - [`EventValidationError::EmptyTitle`] when `title` trims to empty.
    /// - [`EventValidationError::InvalidDate`] when `date` is malformed.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }
        if !is_iso_date(&self.date) {
            return Err(EventValidationError::InvalidDate(self.date.clone()));
        }
        Ok(())
    }
}
