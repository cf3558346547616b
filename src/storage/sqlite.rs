//! SQLite-backed key-value store.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rusqlite::{Connection, OptionalExtension, params};

use super::{KeyValueStore, Result};

/// Key-value store in a single-table SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path`.
    ///
    /// Parent directories are created if they don't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )?;
        Ok(Self { conn })
    }

    /// Returns the default database path: `~/.stride/history.sqlite`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".stride").join("history.sqlite"))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn test_store() -> (TempDir, SqliteStore) {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::open(dir.path().join("history.sqlite")).unwrap();
        (dir, store)
    }

    #[test]
    fn get_missing_key_returns_none() {
        let (_dir, store) = test_store();
        assert!(store.get("walk-history").unwrap().is_none());
    }

    #[test]
    fn set_then_get_round_trips() {
        let (_dir, mut store) = test_store();
        store.set("walk-history", "[]").unwrap();
        assert_eq!(store.get("walk-history").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn set_replaces_existing_value() {
        let (_dir, mut store) = test_store();
        store.set("walk-history", "old").unwrap();
        store.set("walk-history", "new").unwrap();
        assert_eq!(store.get("walk-history").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.sqlite");

        let mut store = SqliteStore::open(&path).unwrap();
        store.set("walk-history", "[1]").unwrap();
        drop(store);

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get("walk-history").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn open_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("history.sqlite");
        SqliteStore::open(&path).unwrap();
        assert!(path.exists());
    }
}
