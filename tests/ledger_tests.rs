mod common;
use common::{open_test_db, register_profile};

use chrono::{Duration, TimeZone, Utc};
use labpresence::core::ledger;
use labpresence::db::queries;
use labpresence::errors::AppError;
use labpresence::models::attendance::AttendanceEntry;
use labpresence::utils::time::{format_duration_label, format_minutes};

#[test]
fn test_second_open_entry_is_rejected() {
    let (_path, conn) = open_test_db("dup_open");
    let pid = register_profile(&conn, "l1", "Lena", "", "");

    ledger::open_entry(&conn, pid, None).expect("first open");
    let err = ledger::open_entry(&conn, pid, None).unwrap_err();
    assert!(matches!(err, AppError::DuplicateOpenEntry(p) if p == pid));
}

#[test]
fn test_unique_index_rejects_raw_duplicate_insert() {
    let (_path, conn) = open_test_db("dup_open_raw");
    let pid = register_profile(&conn, "l2", "Marco", "", "");

    ledger::open_entry(&conn, pid, None).expect("first open");

    // Bypass the application-level pre-check: the partial unique index
    // must still refuse the second open row.
    let res = conn.execute(
        "INSERT INTO attendance (profile_id, check_in, check_out, comment)
         VALUES (?1, '2026-01-01T09:00:00+00:00', NULL, NULL)",
        [pid],
    );
    assert!(res.is_err(), "storage must reject a second open entry");
}

#[test]
fn test_close_without_open_entry_errors() {
    let (_path, conn) = open_test_db("no_open");
    let pid = register_profile(&conn, "l3", "Nadia", "", "");

    let err = ledger::close_most_recent_open_entry(&conn, pid, None).unwrap_err();
    assert!(matches!(err, AppError::NoOpenEntry(p) if p == pid));
}

#[test]
fn test_close_keeps_existing_comment_unless_overridden() {
    let (_path, conn) = open_test_db("comment_merge");
    let pid = register_profile(&conn, "l4", "Oda", "", "");

    ledger::open_entry(&conn, pid, Some("morning session")).unwrap();
    let closed = ledger::close_most_recent_open_entry(&conn, pid, None).unwrap();
    assert_eq!(closed.comment.as_deref(), Some("morning session"));

    ledger::open_entry(&conn, pid, Some("afternoon")).unwrap();
    let closed = ledger::close_most_recent_open_entry(&conn, pid, Some("left early")).unwrap();
    assert_eq!(closed.comment.as_deref(), Some("left early"));
}

#[test]
fn test_history_is_most_recent_first() {
    let (_path, conn) = open_test_db("history_order");
    let pid = register_profile(&conn, "l5", "Pia", "", "");

    // Three intervals with known, distinct check-in instants.
    for (day, hour) in [(1, 9), (2, 10), (3, 8)] {
        let check_in = Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap();
        let entry = queries::insert_entry(&conn, pid, check_in, None).unwrap();
        queries::close_entry(&conn, entry.id, check_in + Duration::hours(4), None).unwrap();
    }

    let entries = ledger::list_by_profile(&conn, pid, None).unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries[0].check_in > entries[1].check_in);
    assert!(entries[1].check_in > entries[2].check_in);

    let limited = ledger::list_by_profile(&conn, pid, Some(2)).unwrap();
    assert_eq!(limited.len(), 2);
}

#[test]
fn test_duration_math_is_offset_independent() {
    let check_in = Utc.with_ymd_and_hms(2026, 5, 1, 22, 15, 0).unwrap();
    let entry = AttendanceEntry {
        id: 1,
        profile_id: 1,
        check_in,
        check_out: Some(check_in + Duration::minutes(90)),
        comment: None,
    };

    assert_eq!(entry.duration_minutes(), Some(90));
    assert_eq!(format_duration_label(90), "1h30m");
    assert_eq!(format_minutes(90), "01:30");
}

#[test]
fn test_open_entry_reports_no_duration() {
    let check_in = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap();
    let entry = AttendanceEntry {
        id: 1,
        profile_id: 1,
        check_in,
        check_out: None,
        comment: None,
    };
    assert!(entry.is_open());
    assert_eq!(entry.duration_minutes(), None);
}
