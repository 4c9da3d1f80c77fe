//! Habit domain model.
//!
//! # Responsibility
//! - Define the habit record persisted under the habits collection key.
//! - Provide the completion-toggle lifecycle helper.
//!
//! # Invariants
//! - `id` is stable and never reused for another habit.
//! - `color` comes from [`HABIT_COLOR_PALETTE`] and is immutable after
//!   creation (no edit path exists).
//! - Completion keys are ISO `YYYY-MM-DD`; a `false` entry means the same
//!   thing as an absent key.

use crate::model::date::is_iso_date;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a habit.
pub type HabitId = Uuid;

/// Fixed palette a new habit's color token is drawn from.
pub const HABIT_COLOR_PALETTE: [&str; 5] =
    ["#FF6B6B", "#48D1CC", "#9370DB", "#FFA500", "#20B2AA"];

/// Validation failures raised before a habit reaches persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitValidationError {
    /// Name is empty after trimming.
    EmptyName,
    /// A completion key is not a well-formed ISO date.
    InvalidCompletionDate(String),
}

impl Display for HabitValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "habit name must not be empty"),
            Self::InvalidCompletionDate(date) => {
                write!(f, "completion key `{date}` is not a YYYY-MM-DD date")
            }
        }
    }
}

impl Error for HabitValidationError {}

/// User-defined recurring activity tracked by date-keyed completions.
///
/// Serialized field names match the persisted wire layout, where the
/// creation timestamp is spelled `createdAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Stable global ID, assigned at creation.
    pub id: HabitId,
    /// Display name; non-empty after trim.
    pub name: String,
    /// Palette color token chosen at creation.
    pub color: String,
    /// ISO date -> completed flag. Absent key == not completed.
    pub completions: BTreeMap<String, bool>,
    /// Unix epoch milliseconds; drives newest-first ordering only.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl Habit {
    /// Creates a habit with a generated stable ID and empty completions.
    ///
    /// The caller supplies the creation timestamp so that model code stays
    /// clock-free and ordering is reproducible under test.
    pub fn new(name: impl Into<String>, color: impl Into<String>, created_at_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: color.into(),
            completions: BTreeMap::new(),
            created_at: created_at_ms,
        }
    }

    /// Checks field-level invariants.
    ///
    /// # Errors
    /// - [`HabitValidationError::EmptyName`] when `name` trims to empty.
    /// - [`HabitValidationError::InvalidCompletionDate`] for malformed keys.
    pub fn validate(&self) -> Result<(), HabitValidationError> {
        if self.name.trim().is_empty() {
            return Err(HabitValidationError::EmptyName);
        }

        for date in self.completions.keys() {
            if !is_iso_date(date) {
                return Err(HabitValidationError::InvalidCompletionDate(date.clone()));
            }
        }

        Ok(())
    }

    /// Flips the completion flag for one date, leaving all others untouched.
    ///
    /// Absent -> `true`, `true` -> `false`, explicit `false` -> `true`.
    /// Applying the toggle twice restores the original value for that date.
    pub fn toggle_completion(&mut self, date: &str) {
        let flag = self.completions.entry(date.to_string()).or_insert(false);
        *flag = !*flag;
    }

    /// Returns whether the habit is marked completed on `date`.
    pub fn is_completed_on(&self, date: &str) -> bool {
        self.completions.get(date).copied().unwrap_or(false)
    }

    /// Counts dates whose completion flag is `true`.
    pub fn completed_days(&self) -> usize {
        self.completions.values().filter(|done| **done).count()
    }
}
