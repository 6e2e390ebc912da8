//! SQLite-backed record store. A single `records` table holds every key/value
//! pair; the schema is created lazily on open so a fresh install needs no
//! setup step.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::{params, Connection, OptionalExtension};

use super::RecordStore;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".announcement-composer";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "records.sqlite";

/// Record store persisted to an embedded SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating if needed) the store at its default location inside the
    /// user's home directory.
    pub fn open_default() -> Result<Self> {
        Self::open_at(default_db_path()?)
    }

    /// Open (creating if needed) the store at an explicit path. Split out
    /// from [`SqliteStore::open_default`] so tests and tooling can point at a
    /// scratch file.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("failed to create data directory")?;
        }

        let conn = Connection::open(path).context("failed to open SQLite database")?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS records (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )
        .context("failed to create records table")?;

        Ok(Self { conn })
    }
}

impl RecordStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM records WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .context("failed to read record")
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO records (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .context("failed to write record")?;
        Ok(())
    }
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn default_db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
