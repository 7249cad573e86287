//! Durable storage for the serialized card store state.
//!
//! The whole state is one JSON document kept under a fixed name, loaded once
//! at startup and overwritten after every mutation.

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use super::{try_lock, DbPool};
use crate::error::StoreError;
use crate::store::StoreState;

/// Load/save contract the card store persists through
pub trait StateStorage: Send {
    fn load(&self) -> Result<Option<StoreState>, StoreError>;
    fn save(&self, state: &StoreState) -> Result<(), StoreError>;
}

/// SQLite-backed storage, one row in `kv_store`
pub struct SqliteStorage {
    pool: DbPool,
    name: String,
}

impl SqliteStorage {
    pub fn new(pool: DbPool, name: &str) -> Self {
        Self {
            pool,
            name: name.to_string(),
        }
    }
}

impl StateStorage for SqliteStorage {
    fn load(&self) -> Result<Option<StoreState>, StoreError> {
        let conn = try_lock(&self.pool).map_err(|_| StoreError::Unavailable)?;
        let value: Option<String> = conn
            .query_row(
                "SELECT value FROM kv_store WHERE name = ?1",
                params![self.name],
                |row| row.get(0),
            )
            .optional()?;

        match value {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &StoreState) -> Result<(), StoreError> {
        let json = serde_json::to_string(state)?;
        let conn = try_lock(&self.pool).map_err(|_| StoreError::Unavailable)?;
        conn.execute(
            r#"
      INSERT INTO kv_store (name, value, updated_at) VALUES (?1, ?2, ?3)
      ON CONFLICT(name) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
      "#,
            params![self.name, json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}
