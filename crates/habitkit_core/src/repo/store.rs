//! Durable key-value store for the habit and event collections.
//!
//! # Responsibility
//! - Persist each collection as one serialized JSON list under a fixed,
//!   versioned key.
//! - Keep startup resilient: unreadable or corrupt data loads as empty.
//!
//! # Invariants
//! - Collection keys are injected at construction; rotation to a new key
//!   orphans old-key data rather than migrating it.
//! - A write either replaces the full stored collection or leaves it as-is.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::event::Event;
use crate::model::habit::Habit;
use log::error;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default durable key for the habit collection.
pub const HABITS_KEY: &str = "habits_v2";
/// Default durable key for the event collection.
pub const EVENTS_KEY: &str = "events_v2";

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for store construction and write operations.
///
/// Read operations never surface errors; see [`Store::get_habits`].
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialize(serde_json::Error),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "collection serialization failed: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Durable keys addressing the two collections.
///
/// Injected at store construction so key rotation/versioning can be tested
/// independently of call sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreKeys {
    pub habits: String,
    pub events: String,
}

impl Default for StoreKeys {
    fn default() -> Self {
        Self {
            habits: HABITS_KEY.to_string(),
            events: EVENTS_KEY.to_string(),
        }
    }
}

/// Durable storage contract for the full habit and event collections.
///
/// Reads are infallible by contract: corrupted or missing data degrades to
/// the empty collection so application startup always succeeds. Writes
/// surface failures to the caller, who decides the rollback policy.
pub trait Store {
    fn get_habits(&self) -> Vec<Habit>;
    fn save_habits(&self, habits: &[Habit]) -> StoreResult<()>;
    fn get_events(&self) -> Vec<Event>;
    fn save_events(&self, events: &[Event]) -> StoreResult<()>;
    /// Erases all persisted application data, not only the two collection
    /// keys. Diagnostic use only.
    fn clear_all(&self) -> StoreResult<()>;
}

/// SQLite-backed store over the `kv_store` table.
pub struct SqliteStore<'conn> {
    conn: &'conn Connection,
    keys: StoreKeys,
}

impl<'conn> SqliteStore<'conn> {
    /// Creates a store after verifying the connection has been migrated.
    ///
    /// # Errors
    /// - [`StoreError::UninitializedConnection`] on schema version mismatch.
    /// - [`StoreError::MissingRequiredTable`] when `kv_store` is absent.
    pub fn try_new(conn: &'conn Connection, keys: StoreKeys) -> StoreResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = 'kv_store'
            );",
            [],
            |row| row.get(0),
        )?;
        if table_exists != 1 {
            return Err(StoreError::MissingRequiredTable("kv_store"));
        }

        Ok(Self { conn, keys })
    }

    fn read_value(&self, key: &str) -> rusqlite::Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()
    }

    fn write_value(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.read_value(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                error!("event=storage_read module=store status=degraded key={key} error={err}");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(err) => {
                error!("event=storage_read module=store status=degraded key={key} error={err}");
                Vec::new()
            }
        }
    }

    fn store_collection<T: Serialize>(&self, key: &str, items: &[T]) -> StoreResult<()> {
        let payload = serde_json::to_string(items)?;
        if let Err(err) = self.write_value(key, &payload) {
            error!("event=storage_write module=store status=error key={key} error={err}");
            return Err(err);
        }
        Ok(())
    }
}

impl Store for SqliteStore<'_> {
    fn get_habits(&self) -> Vec<Habit> {
        self.load_collection(&self.keys.habits)
    }

    fn save_habits(&self, habits: &[Habit]) -> StoreResult<()> {
        self.store_collection(&self.keys.habits, habits)
    }

    fn get_events(&self) -> Vec<Event> {
        self.load_collection(&self.keys.events)
    }

    fn save_events(&self, events: &[Event]) -> StoreResult<()> {
        self.store_collection(&self.keys.events, events)
    }

    fn clear_all(&self) -> StoreResult<()> {
        self.conn.execute("DELETE FROM kv_store;", [])?;
        Ok(())
    }
}
