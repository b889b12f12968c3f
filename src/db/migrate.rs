use crate::ui::messages::warning;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `profiles` table with the modern schema.
fn create_profiles_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id         TEXT NOT NULL UNIQUE,
            name            TEXT NOT NULL,
            email           TEXT NOT NULL DEFAULT '',
            lab             TEXT NOT NULL DEFAULT '',
            is_checked_in   INTEGER NOT NULL DEFAULT 0,
            presence_status TEXT NOT NULL DEFAULT 'OFF_CAMPUS'
                CHECK(presence_status IN ('IN_LAB','ON_CAMPUS','OFF_CAMPUS'))
        );

        CREATE INDEX IF NOT EXISTS idx_profiles_lab ON profiles(lab);
        "#,
    )?;
    Ok(())
}

/// Create the `attendance` ledger table.
///
/// The partial unique index is the storage-level guarantee behind the
/// "at most one open entry per profile" invariant: concurrent writers
/// cannot both insert an open entry, whatever process they run in.
fn create_attendance_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            profile_id INTEGER NOT NULL REFERENCES profiles(id),
            check_in   TEXT NOT NULL,
            check_out  TEXT,
            comment    TEXT
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_attendance_open
            ON attendance(profile_id) WHERE check_out IS NULL;
        CREATE INDEX IF NOT EXISTS idx_attendance_profile_checkin
            ON attendance(profile_id, check_in);
        "#,
    )?;
    Ok(())
}

/// Migrate an old `profiles` table to include the `lab` grouping column.
fn migrate_add_lab_to_profiles(conn: &Connection) -> Result<()> {
    if !table_exists(conn, "profiles")? {
        return Ok(());
    }

    if table_has_column(conn, "profiles", "lab")? {
        return Ok(());
    }

    warning("Adding 'lab' column to profiles table...");

    conn.execute_batch(
        r#"
        ALTER TABLE profiles ADD COLUMN lab TEXT NOT NULL DEFAULT '';
        CREATE INDEX IF NOT EXISTS idx_profiles_lab ON profiles(lab);
        "#,
    )?;
    Ok(())
}

/// Migrate an old `attendance` table that predates the open-entry index.
fn migrate_add_open_entry_index(conn: &Connection) -> Result<()> {
    if !table_exists(conn, "attendance")? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_attendance_open
            ON attendance(profile_id) WHERE check_out IS NULL;
        "#,
    )?;
    Ok(())
}

/// Run every pending migration. Safe to call repeatedly.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    create_profiles_table(conn)?;
    create_attendance_table(conn)?;
    migrate_add_lab_to_profiles(conn)?;
    migrate_add_open_entry_index(conn)?;
    Ok(())
}
