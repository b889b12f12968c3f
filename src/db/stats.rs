use crate::errors::AppResult;
use rusqlite::Connection;

/// Row counts shown by `db --info`.
#[derive(Debug, Clone, Copy)]
pub struct DbInfo {
    pub profiles: i64,
    pub entries: i64,
    pub open_entries: i64,
    pub in_lab_profiles: i64,
}

pub fn db_info(conn: &Connection) -> AppResult<DbInfo> {
    let profiles = count(conn, "SELECT COUNT(*) FROM profiles")?;
    let entries = count(conn, "SELECT COUNT(*) FROM attendance")?;
    let open_entries = count(conn, "SELECT COUNT(*) FROM attendance WHERE check_out IS NULL")?;
    let in_lab_profiles =
        count(conn, "SELECT COUNT(*) FROM profiles WHERE presence_status = 'IN_LAB'")?;

    Ok(DbInfo {
        profiles,
        entries,
        open_entries,
        in_lab_profiles,
    })
}

fn count(conn: &Connection, sql: &str) -> AppResult<i64> {
    let mut stmt = conn.prepare_cached(sql)?;
    Ok(stmt.query_row([], |row| row.get(0))?)
}

/// Run SQLite's own integrity check; returns the reported status line.
pub fn integrity_check(conn: &Connection) -> AppResult<String> {
    let mut stmt = conn.prepare("PRAGMA integrity_check")?;
    let res: String = stmt.query_row([], |row| row.get(0))?;
    Ok(res)
}

/// Profiles whose denormalized presence fields disagree with the ledger:
/// IN_LAB without an open entry, or an open entry without IN_LAB.
pub fn inconsistent_profiles(conn: &Connection) -> AppResult<Vec<i64>> {
    let mut stmt = conn.prepare(
        "SELECT p.id FROM profiles p
         LEFT JOIN attendance a ON a.profile_id = p.id AND a.check_out IS NULL
         WHERE (p.presence_status = 'IN_LAB') != (a.id IS NOT NULL)
            OR (p.is_checked_in = 1) != (p.presence_status = 'IN_LAB')
         ORDER BY p.id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
