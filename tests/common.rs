#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rusqlite::Connection;
use std::env;
use std::path::PathBuf;

pub fn lp() -> Command {
    cargo_bin_cmd!("labpresence")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_labpresence.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    std::fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    std::fs::remove_file(&p).ok();
    p
}

/// Open an initialized connection to a fresh test database.
pub fn open_test_db(name: &str) -> (String, Connection) {
    let db_path = setup_test_db(name);
    let conn = Connection::open(&db_path).expect("open db");
    labpresence::db::initialize::init_db(&conn).expect("init db");
    (db_path, conn)
}

/// Register a profile directly through the library API.
pub fn register_profile(conn: &Connection, user_id: &str, name: &str, email: &str, lab: &str) -> i64 {
    labpresence::db::queries::insert_profile(conn, user_id, name, email, lab)
        .expect("insert profile")
}

/// Assert the cross-entity invariant for one profile:
/// presence_status == IN_LAB iff exactly one open entry exists.
pub fn assert_invariant(conn: &Connection, profile_id: i64) {
    let profile = labpresence::db::queries::find_profile_by_id(conn, profile_id)
        .expect("load profile")
        .expect("profile exists");

    let open_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM attendance WHERE profile_id = ?1 AND check_out IS NULL",
            [profile_id],
            |row| row.get(0),
        )
        .expect("count open entries");

    if profile.presence_status.is_in_lab() {
        assert_eq!(open_count, 1, "IN_LAB profile must have exactly one open entry");
    } else {
        assert_eq!(open_count, 0, "non-IN_LAB profile must have no open entry");
    }
    assert_eq!(
        profile.is_checked_in,
        profile.presence_status.is_in_lab(),
        "legacy boolean must match the presence enum"
    );
}

/// Initialize a DB via the CLI and register a member, for CLI-level tests.
pub fn init_db_with_member(db_path: &str, user_id: &str, name: &str) {
    lp()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    lp()
        .args(["--db", db_path, "--test", "register", user_id, name])
        .assert()
        .success();
}
