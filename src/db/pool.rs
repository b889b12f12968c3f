//! SQLite connection wrapper (lightweight for CLI usage).
//!
//! Every sweep worker opens its own `DbPool`; cross-writer safety comes
//! from SQLite itself plus the partial unique index on open entries, not
//! from in-process locking.

use rusqlite::{Connection, Result};
use std::path::Path;
use std::time::Duration;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        // Writers from concurrent sweep workers retry instead of failing
        // immediately with SQLITE_BUSY.
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(Self { conn })
    }
}
