use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use tracing::warn;

use crate::error::Result;

pub const KEY_ENABLED: &str = "bookmark_manager.save_playpos_enabled";
pub const KEY_AUTO_CONTINUE: &str = "bookmark_manager.auto_continue";
pub const KEY_MIN_DURATION: &str = "bookmark_manager.min_duration";
pub const KEY_REWIND_TIME: &str = "bookmark_manager.rewind_time";

/// Integer key/value configuration owned by the host.
pub trait ConfigStore {
    fn get_int(&self, key: &str, default: i64) -> i64;
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub enabled: bool,
    pub auto_continue: bool,
    /// Tracks shorter than this many seconds never get a position saved.
    pub min_duration: u32,
    /// Seconds to step back from the saved position when resuming.
    pub rewind_time: u32,
}

impl Config {
    pub fn load(store: &impl ConfigStore) -> Self {
        Config {
            enabled: store.get_int(KEY_ENABLED, 0) != 0,
            auto_continue: store.get_int(KEY_AUTO_CONTINUE, 0) != 0,
            min_duration: seconds(store.get_int(KEY_MIN_DURATION, 0)),
            rewind_time: seconds(store.get_int(KEY_REWIND_TIME, 0)),
        }
    }
}

fn seconds(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}

pub struct SqliteConfigStore {
    conn: Connection,
}

impl SqliteConfigStore {
    pub fn open(path: &Path) -> Result<Self> {
        Self::new(Connection::open(path)?)
    }

    pub fn new(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS config (
                key   TEXT PRIMARY KEY,
                value INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(SqliteConfigStore { conn })
    }

    pub fn set_int(&self, key: &str, value: i64) -> Result<()> {
        self.conn.execute(
            "INSERT INTO config (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

impl ConfigStore for SqliteConfigStore {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM config WHERE key = ?1",
                params![key],
                |row| row.get::<_, i64>(0),
            )
            .optional();

        match value {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(err) => {
                warn!(key, %err, "config read failed");
                default
            }
        }
    }
}
