mod common;
use common::{init_db_with_member, lp, open_test_db, register_profile, setup_test_db, temp_out};

use chrono::{Duration, TimeZone, Utc};
use labpresence::db::queries;

fn seed_closed_entry(conn: &rusqlite::Connection, pid: i64) {
    let check_in = Utc.with_ymd_and_hms(2026, 4, 10, 9, 30, 0).unwrap();
    let entry = queries::insert_entry(conn, pid, check_in, Some("experiment run")).unwrap();
    queries::close_entry(conn, entry.id, check_in + Duration::minutes(135), None).unwrap();
}

#[test]
fn test_csv_export_contains_header_and_row() {
    let (db_path, conn) = open_test_db("export_csv");
    let pid = register_profile(&conn, "e1", "Exporter", "", "lab-a");
    seed_closed_entry(&conn, pid);

    let out = temp_out("export_csv", "csv");
    lp()
        .args([
            "--db", &db_path, "--test", "export", "e1", "--format", "csv", "--out", &out,
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(&out).expect("read csv");
    let mut lines = content.lines();
    assert_eq!(
        lines.next().unwrap(),
        "id,user_id,check_in,check_out,duration_minutes,comment"
    );
    let row = lines.next().expect("one data row");
    assert!(row.contains("e1"));
    assert!(row.contains("135"));
    assert!(row.contains("experiment run"));
}

#[test]
fn test_json_export_round_trips_fields() {
    let (db_path, conn) = open_test_db("export_json");
    let pid = register_profile(&conn, "e2", "Jason", "", "");
    seed_closed_entry(&conn, pid);

    let out = temp_out("export_json", "json");
    lp()
        .args([
            "--db", &db_path, "--test", "export", "e2", "--format", "json", "--out", &out,
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(&out).expect("read json");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = parsed.as_array().expect("array of entries");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user_id"], "e2");
    assert_eq!(rows[0]["duration_minutes"], 135);
    assert_eq!(rows[0]["comment"], "experiment run");
}

#[test]
fn test_export_unknown_user_fails() {
    let db_path = setup_test_db("export_missing");
    init_db_with_member(&db_path, "someone", "Some One");

    let out = temp_out("export_missing", "csv");
    lp()
        .args([
            "--db", &db_path, "--test", "export", "ghost", "--format", "csv", "--out", &out,
        ])
        .assert()
        .failure();
}
