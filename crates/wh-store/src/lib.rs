//! Storage layer for the work-hours ledger.
//!
//! Persists the entry collection using `rusqlite`.
//!
//! # Schema
//!
//! A single key-value table. The collection lives under the key
//! [`ENTRIES_KEY`] as one JSON array, the same shape the import and export
//! files use. A missing key reads as an empty collection.
//!
//! Saving rewrites the whole array in one transaction, so readers only ever
//! see a complete snapshot.
//!
//! `updated_at` holds an RFC 3339 UTC timestamp with millisecond precision
//! (e.g. `2025-01-15T10:30:00.000Z`).

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;
use wh_core::{EntryType, TimeEntry};

/// Key under which the entry collection is stored.
pub const ENTRIES_KEY: &str = "workEntries";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// The stored snapshot could not be decoded.
    #[error("stored value for {key} is not a valid entry collection")]
    CorruptSnapshot {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// The collection could not be encoded.
    #[error("failed to encode entry collection")]
    Encode(#[source] serde_json::Error),
    /// A stored timestamp could not be parsed.
    #[error("invalid timestamp for {key}: {timestamp}")]
    TimestampParse {
        key: String,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Connection wrapper.
///
/// `rusqlite::Connection` is `Send` but not `Sync`; one `Store` serves one
/// session.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens a store at the given path, creating it if necessary.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init()?;
        tracing::debug!(path = %path.display(), "opened store");
        Ok(store)
    }

    /// Opens an in-memory store. Destroyed when dropped.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Idempotent.
    fn init(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Loads the entry collection, in stored order.
    pub fn load_entries(&self) -> Result<Vec<TimeEntry>, StoreError> {
        let Some(raw) = self.get(ENTRIES_KEY)? else {
            tracing::debug!("no stored entries");
            return Ok(Vec::new());
        };
        let entries: Vec<TimeEntry> =
            serde_json::from_str(&raw).map_err(|source| StoreError::CorruptSnapshot {
                key: ENTRIES_KEY.to_string(),
                source,
            })?;
        for entry in &entries {
            if let EntryType::Unrecognized(kind) = &entry.kind {
                tracing::warn!(
                    id = %entry.id,
                    kind = %kind,
                    "unrecognized entry type, counting as normal"
                );
            }
        }
        tracing::debug!(count = entries.len(), "loaded entries");
        Ok(entries)
    }

    /// Replaces the stored collection with `entries`.
    pub fn save_entries(&mut self, entries: &[TimeEntry]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(entries).map_err(StoreError::Encode)?;
        let now = format_timestamp(Utc::now());

        let tx = self.conn.transaction()?;
        tx.execute(
            "
            INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![ENTRIES_KEY, raw, now],
        )?;
        tx.commit()?;

        tracing::debug!(count = entries.len(), "saved entries");
        Ok(())
    }

    /// When the collection was last saved, if ever.
    pub fn last_saved_at(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        let timestamp: Option<String> = self
            .conn
            .query_row(
                "SELECT updated_at FROM kv WHERE key = ?1",
                params![ENTRIES_KEY],
                |row| row.get(0),
            )
            .optional()?;
        timestamp
            .map(|ts| parse_timestamp(&ts, ENTRIES_KEY))
            .transpose()
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }
}

fn parse_timestamp(timestamp: &str, key: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|source| StoreError::TimestampParse {
            key: key.to_string(),
            timestamp: timestamp.to_string(),
            source,
        })
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
