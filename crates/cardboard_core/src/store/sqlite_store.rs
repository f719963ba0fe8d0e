//! SQLite-backed key-value store.
//!
//! # Invariants
//! - Requires a connection opened through `db::open_db*` (migrated).
//! - `set` is an upsert; the last write for a key wins.

use super::{KeyValueStore, StoreResult};
use crate::db::ensure_kv_schema;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

/// Key-value store over the `kv_entries` table.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Wraps a migrated connection, failing when the schema is missing.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_kv_schema(conn)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &Value) -> StoreResult<()> {
        let text = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, text],
        )?;
        debug!(
            "event=kv_set module=store status=ok bytes={}",
            text.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteKvStore;
    use crate::db::{open_db_in_memory, DbError};
    use crate::store::{KeyValueStore, StoreError};
    use rusqlite::Connection;
    use serde_json::json;

    #[test]
    fn set_then_get_round_trips_and_upserts() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteKvStore::try_new(&conn).unwrap();

        store.set("members", &json!([{"email": "a@example.com"}])).unwrap();
        store.set("members", &json!([])).unwrap();

        assert_eq!(store.get("members").unwrap(), Some(json!([])));
        assert_eq!(store.get("absent").unwrap(), None);
    }

    #[test]
    fn unmigrated_connection_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        let err = SqliteKvStore::try_new(&conn)
            .err()
            .expect("missing table must fail");
        assert!(matches!(err, StoreError::Db(DbError::MissingKvTable)));
    }

    #[test]
    fn corrupt_value_surfaces_serialization_error() {
        let conn = open_db_in_memory().unwrap();
        conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES ('members', '{not json');",
            [],
        )
        .unwrap();
        let store = SqliteKvStore::try_new(&conn).unwrap();

        let err = store.get("members").unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
