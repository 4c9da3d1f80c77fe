//! Habit use-case service and streak derivation.
//!
//! # Responsibility
//! - Provide add/toggle/delete entry points over the session collection.
//! - Derive the display streak label from a completion record.
//!
//! # Invariants
//! - The session collection stays ordered newest-first by `created_at`.
//! - Every mutation persists the full collection; session state advances
//!   only after the save succeeds.

use crate::model::date::is_iso_date;
use crate::model::habit::{Habit, HabitId, HabitValidationError};
use crate::repo::store::{Store, StoreError};
use crate::service::color::ColorPicker;
use log::info;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Service error for habit use-cases.
#[derive(Debug)]
pub enum HabitServiceError {
    /// Input failed model validation; nothing was mutated or persisted.
    Validation(HabitValidationError),
    /// Toggle date is not a well-formed ISO date.
    InvalidDate(String),
    /// Target habit does not exist.
    HabitNotFound(HabitId),
    /// Persistence-layer failure; session state was rolled back.
    Store(StoreError),
}

impl Display for HabitServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidDate(date) => {
                write!(f, "completion date `{date}` is not a YYYY-MM-DD date")
            }
            Self::HabitNotFound(id) => write!(f, "habit not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for HabitServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HabitValidationError> for HabitServiceError {
    fn from(value: HabitValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for HabitServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Habit service facade over a store implementation.
///
/// Owns the in-session habit collection mirrored from durable state.
pub struct HabitService<S: Store> {
    store: S,
    habits: Vec<Habit>,
    colors: ColorPicker,
}

impl<S: Store> HabitService<S> {
    /// Creates a service and loads the session collection from the store.
    ///
    /// The load re-sorts by `created_at` descending to restore newest-first
    /// ordering after a reload. `color_seed` makes palette picks
    /// reproducible; `None` uses entropy.
    pub fn new(store: S, color_seed: Option<u64>) -> Self {
        let mut habits = store.get_habits();
        habits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        info!(
            "event=habits_load module=habit_service status=ok count={}",
            habits.len()
        );
        Self {
            store,
            habits,
            colors: ColorPicker::new(color_seed),
        }
    }

    /// Returns the session collection, newest first.
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    /// Creates a habit and prepends it to the session collection.
    ///
    /// # Contract
    /// - Rejects a name that trims to empty before any persistence call.
    /// - Generates id and `created_at` at this moment; color comes from the
    ///   palette picker.
    /// - Newest-first ordering holds by construction.
    pub fn add_habit(&mut self, name: &str) -> Result<&Habit, HabitServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HabitValidationError::EmptyName.into());
        }

        let habit = Habit::new(name, self.colors.pick(), now_epoch_ms());
        habit.validate()?;

        let mut draft = Vec::with_capacity(self.habits.len() + 1);
        draft.push(habit);
        draft.extend(self.habits.iter().cloned());

        self.store.save_habits(&draft)?;
        self.habits = draft;
        info!("event=habit_add module=habit_service status=ok id={}", self.habits[0].id);
        Ok(&self.habits[0])
    }

    /// Flips one date's completion flag on one habit and persists.
    ///
    /// Safe to call any number of times; it always toggles from the current
    /// stored state.
    pub fn toggle_completion(
        &mut self,
        id: HabitId,
        date: &str,
    ) -> Result<&Habit, HabitServiceError> {
        if !is_iso_date(date) {
            return Err(HabitServiceError::InvalidDate(date.to_string()));
        }

        let position = self
            .habits
            .iter()
            .position(|habit| habit.id == id)
            .ok_or(HabitServiceError::HabitNotFound(id))?;

        let mut draft = self.habits.clone();
        draft[position].toggle_completion(date);

        self.store.save_habits(&draft)?;
        self.habits = draft;
        info!("event=habit_toggle module=habit_service status=ok id={id} date={date}");
        Ok(&self.habits[position])
    }

    /// Removes the habit with the given id and persists the result.
    ///
    /// Returns `false` without touching storage when the id is unknown.
    pub fn delete_habit(&mut self, id: HabitId) -> Result<bool, HabitServiceError> {
        if !self.habits.iter().any(|habit| habit.id == id) {
            return Ok(false);
        }

        let draft: Vec<Habit> = self
            .habits
            .iter()
            .filter(|habit| habit.id != id)
            .cloned()
            .collect();

        self.store.save_habits(&draft)?;
        self.habits = draft;
        info!("event=habit_delete module=habit_service status=ok id={id}");
        Ok(true)
    }
}

/// Tier markers appended to the streak label as the completed-day count
/// grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakTier {
    Fire,
    Flex,
    Rocket,
    Star,
}

impl StreakTier {
    fn for_count(count: usize) -> Option<Self> {
        match count {
            0 => None,
            1..=2 => Some(Self::Fire),
            3..=6 => Some(Self::Flex),
            7..=13 => Some(Self::Rocket),
            _ => Some(Self::Star),
        }
    }

    fn marker(self) -> &'static str {
        match self {
            Self::Fire => "\u{1F525}",
            Self::Flex => "\u{1F4AA}",
            Self::Rocket => "\u{1F680}",
            Self::Star => "\u{1F31F}",
        }
    }
}

/// Derives the display streak label from a completion record.
///
/// The count is the total number of `true` entries, NOT a consecutive-day
/// streak; there is no date-adjacency check. The label is a pure function of
/// that count, independent of which dates are present or their order.
pub fn calculate_streak(completions: &BTreeMap<String, bool>) -> String {
    let count = completions.values().filter(|done| **done).count();
    match StreakTier::for_count(count) {
        None => "No streak yet".to_string(),
        Some(tier) => format!("{count} day streak {}", tier.marker()),
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
