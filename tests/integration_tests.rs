mod common;
use common::{init_db_with_member, lp, setup_test_db};

use predicates::prelude::*;

#[test]
fn test_init_creates_schema_and_is_repeatable() {
    let db_path = setup_test_db("cli_init");

    lp()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("initialization completed"));

    // Running init twice must be safe (migrations are idempotent).
    lp()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();
}

#[test]
fn test_register_rejects_duplicate_user() {
    let db_path = setup_test_db("cli_register_dup");
    init_db_with_member(&db_path, "alice", "Alice");

    lp()
        .args(["--db", &db_path, "--test", "register", "alice", "Alice Again"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_cli_round_trip_scenario() {
    let db_path = setup_test_db("cli_round_trip");
    init_db_with_member(&db_path, "p1", "Pat");

    // Fresh profile starts off campus.
    lp()
        .args(["--db", &db_path, "--test", "status", "p1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("off campus"));

    lp()
        .args(["--db", &db_path, "--test", "in", "p1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("now in lab"));

    lp()
        .args(["--db", &db_path, "--test", "status", "p1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("in lab").and(predicate::str::contains("In lab since")));

    // Moving to on-campus closes the open entry.
    lp()
        .args(["--db", &db_path, "--test", "campus", "p1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("now on campus"));

    lp()
        .args(["--db", &db_path, "--test", "status", "p1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No open attendance entry"));

    lp()
        .args(["--db", &db_path, "--test", "history", "p1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("HISTORY for Pat"));
}

#[test]
fn test_cli_double_checkin_reports_no_op() {
    let db_path = setup_test_db("cli_double_in");
    init_db_with_member(&db_path, "bob", "Bob");

    lp()
        .args(["--db", &db_path, "--test", "in", "bob"])
        .assert()
        .success();

    lp()
        .args(["--db", &db_path, "--test", "in", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already in lab"));
}

#[test]
fn test_cli_unknown_user_is_a_hard_error() {
    let db_path = setup_test_db("cli_unknown_user");
    lp().args(["--db", &db_path, "--test", "init"]).assert().success();

    lp()
        .args(["--db", &db_path, "--test", "in", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No profile found"));
}

#[test]
fn test_cli_roster_orders_and_filters() {
    let db_path = setup_test_db("cli_roster");
    lp().args(["--db", &db_path, "--test", "init"]).assert().success();

    for (user, name, lab) in [
        ("r1", "Zoe", "vision"),
        ("r2", "Ann", "vision"),
        ("r3", "Kim", "robotics"),
    ] {
        lp()
            .args(["--db", &db_path, "--test", "register", user, name, "--lab", lab])
            .assert()
            .success();
    }

    lp()
        .args(["--db", &db_path, "--test", "in", "r1"])
        .assert()
        .success();

    // Checked-in member first, despite sorting after "Ann" by name.
    let output = lp()
        .args(["--db", &db_path, "--test", "roster", "--lab", "vision"])
        .output()
        .expect("roster output");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let zoe = stdout.find("Zoe").expect("Zoe listed");
    let ann = stdout.find("Ann").expect("Ann listed");
    assert!(zoe < ann, "checked-in members come first");
    assert!(!stdout.contains("Kim"), "lab filter excludes other labs");

    lp()
        .args(["--db", &db_path, "--test", "roster", "--status", "in-lab"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Zoe").and(predicate::str::contains("Ann").not()));
}

#[test]
fn test_cli_sweep_and_db_check() {
    let db_path = setup_test_db("cli_sweep");
    init_db_with_member(&db_path, "s1", "Swee");

    lp()
        .args(["--db", &db_path, "--test", "in", "s1"])
        .assert()
        .success();

    lp()
        .args(["--db", &db_path, "--test", "sweep"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 profile(s) checked out"));

    lp()
        .args(["--db", &db_path, "--test", "db", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("consistent"));

    lp()
        .args(["--db", &db_path, "--test", "db", "--info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("open entries:    0"));
}

#[test]
fn test_cli_sweep_prints_the_reminder_note() {
    let db_path = setup_test_db("cli_sweep_note");
    lp().args(["--db", &db_path, "--test", "init"]).assert().success();

    lp()
        .args([
            "--db", &db_path, "--test", "register", "n1", "Nori",
            "--email", "n1@example.org",
        ])
        .assert()
        .success();

    lp()
        .args(["--db", &db_path, "--test", "in", "n1"])
        .assert()
        .success();

    // The configured reminder note (default here) reaches the notification.
    lp()
        .args(["--db", &db_path, "--test", "sweep"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Checkout reminder")
                .and(predicate::str::contains(
                    "If you are still in the lab, please check in again.",
                )),
        );
}

#[test]
fn test_cli_log_records_transitions() {
    let db_path = setup_test_db("cli_log");
    init_db_with_member(&db_path, "lg", "Logan");

    lp()
        .args(["--db", &db_path, "--test", "in", "lg"])
        .assert()
        .success();

    lp()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("transition"));
}
