//! SQLite-backed slot store.
//!
//! # Invariants
//! - Only operates on connections whose schema has the `slots` table.
//! - `set` is a single upsert statement, so a slot is never half-written.

use super::{SlotStore, StorageError, StorageResult};
use crate::db::migrations::{current_user_version, latest_version};
use rusqlite::{params, Connection, OptionalExtension};

/// Durable slot store over a migrated SQLite connection.
pub struct SqliteSlotStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - Returns `Unavailable` when the connection has not been migrated.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        let version = current_user_version(conn)?;
        if version < latest_version() {
            return Err(StorageError::Unavailable(format!(
                "slot schema version {version} is behind {}; open the database with open_db",
                latest_version()
            )));
        }
        Ok(Self { conn })
    }
}

impl SlotStore for SqliteSlotStore<'_> {
    fn get(&self, slot: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE name = ?1;",
                [slot],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, slot: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO slots (name, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(name) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![slot, value],
        )?;
        Ok(())
    }

    fn remove(&self, slot: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM slots WHERE name = ?1;", [slot])?;
        Ok(())
    }
}
