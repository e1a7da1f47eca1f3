//! Durable key-value medium contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist opaque string values under string keys across restarts.
//! - Keep SQL details behind the `KeyValueStore` seam.
//!
//! # Invariants
//! - `write` replaces the whole value in one statement; readers never see a
//!   partially written value.
//! - A value is durable once `write` returns `Ok`.

use crate::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type KvResult<T> = Result<T, KvError>;

/// Failure of the underlying durable medium.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    /// Medium refused the operation for a non-SQL reason.
    Unavailable(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String key-value storage that survives process restarts.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> KvResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> KvResult<()>;
    /// Removes `key`; absent keys are not an error.
    fn remove(&self, key: &str) -> KvResult<()>;
}

/// SQLite-backed key-value store over the `kv_store` table.
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Wraps a connection returned by [`open_db`] or [`open_db_in_memory`].
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens (and migrates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> KvResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    pub fn open_in_memory() -> KvResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    /// Borrows the underlying connection, mainly for diagnostics.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn read(&self, key: &str) -> KvResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> KvResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, SqliteKeyValueStore};

    #[test]
    fn write_overwrites_existing_value() {
        let store = SqliteKeyValueStore::open_in_memory().expect("open store");
        store.write("k", "first").expect("first write");
        store.write("k", "second").expect("second write");
        assert_eq!(store.read("k").expect("read").as_deref(), Some("second"));

        let rows: i64 = store
            .connection()
            .query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
            .expect("count rows");
        assert_eq!(rows, 1);
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let store = SqliteKeyValueStore::open_in_memory().expect("open store");
        store.remove("missing").expect("remove should not fail");
        assert_eq!(store.read("missing").expect("read"), None);
    }

    #[test]
    fn empty_key_is_rejected_by_schema() {
        let store = SqliteKeyValueStore::open_in_memory().expect("open store");
        assert!(store.write("", "value").is_err());
    }
}
