use predicates::str::contains;

mod common;
use common::{init_db_with_data, sc, setup_test_db};

#[test]
fn test_status_without_logs_is_not_clocked_in() {
    let db = setup_test_db("status_no_logs");
    init_db_with_data(&db);

    sc().args(["--db", &db, "status", "E1"])
        .assert()
        .success()
        .stdout(contains("Not Clocked In"));
}

#[test]
fn test_status_rebuilds_break_timer_from_store() {
    let db = setup_test_db("status_timer_rebuild");
    init_db_with_data(&db);

    sc().args(["--db", &db, "--at", "2025-03-10 09:00:00", "clock-in", "E1"])
        .assert()
        .success();

    sc().args([
        "--db",
        &db,
        "--at",
        "2025-03-10 10:00:00",
        "break-start",
        "E1",
    ])
    .assert()
    .success();

    // A fresh process has no timer cache; the resolver must synthesize one
    // from the break-start column and report the original start time.
    sc().args(["--db", &db, "status", "E1", "--json"])
        .assert()
        .success()
        .stdout(contains("On Regular Break"))
        .stdout(contains("\"breakStartTime\": \"2025-03-10T10:00:00\""))
        .stdout(contains("\"breakTimeLimit\": 15"));
}

#[test]
fn test_status_query_is_idempotent() {
    let db = setup_test_db("status_idempotent");
    init_db_with_data(&db);

    sc().args(["--db", &db, "--at", "2025-03-10 09:00:00", "clock-in", "E1"])
        .assert()
        .success();

    sc().args([
        "--db",
        &db,
        "--at",
        "2025-03-10 12:00:00",
        "break-start",
        "E1",
        "--type",
        "lunch",
    ])
    .assert()
    .success();

    // Repeated queries with no mutation in between yield identical output
    let first = sc()
        .args(["--db", &db, "status", "E1", "--json"])
        .output()
        .expect("run status");
    let second = sc()
        .args(["--db", &db, "status", "E1", "--json"])
        .output()
        .expect("run status");

    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_lunch_in_progress_is_not_taken() {
    let db = setup_test_db("lunch_in_progress");
    init_db_with_data(&db);

    sc().args(["--db", &db, "--at", "2025-03-10 09:00:00", "clock-in", "E1"])
        .assert()
        .success();

    sc().args([
        "--db",
        &db,
        "--at",
        "2025-03-10 12:00:00",
        "break-start",
        "E1",
        "--type",
        "lunch",
    ])
    .assert()
    .success();

    sc().args(["--db", &db, "status", "E1", "--json"])
        .assert()
        .success()
        .stdout(contains("On Lunch Break"))
        .stdout(contains("\"lunchBreakTaken\": false"))
        .stdout(contains("\"breakTimeLimit\": 30"));
}

#[test]
fn test_second_break_reports_slot_number() {
    let db = setup_test_db("second_break_slot");
    init_db_with_data(&db);

    sc().args(["--db", &db, "--at", "2025-03-10 09:00:00", "clock-in", "E1"])
        .assert()
        .success();

    sc().args([
        "--db",
        &db,
        "--at",
        "2025-03-10 10:00:00",
        "break-start",
        "E1",
    ])
    .assert()
    .success();

    sc().args([
        "--db",
        &db,
        "--at",
        "2025-03-10 10:10:00",
        "break-end",
        "E1",
    ])
    .assert()
    .success();

    sc().args([
        "--db",
        &db,
        "--at",
        "2025-03-10 14:00:00",
        "break-start",
        "E1",
    ])
    .assert()
    .success();

    sc().args(["--db", &db, "status", "E1", "--json"])
        .assert()
        .success()
        .stdout(contains("\"breakNumber\": 2"))
        .stdout(contains("\"regularBreaksTaken\": 1"));
}

#[test]
fn test_live_board_lists_all_active_employees() {
    let db = setup_test_db("live_board");
    init_db_with_data(&db);

    sc().args([
        "--db",
        &db,
        "employee",
        "add",
        "E5",
        "Aldo",
        "Verdi",
        "--department",
        "Warehouse",
    ])
    .assert()
    .success();

    sc().args(["--db", &db, "--at", "2025-03-10 09:00:00", "clock-in", "E1"])
        .assert()
        .success();

    sc().args(["--db", &db, "live"])
        .assert()
        .success()
        .stdout(contains("Mara Conti"))
        .stdout(contains("Clocked In"))
        .stdout(contains("Aldo Verdi"))
        .stdout(contains("Not Clocked In"));
}

#[test]
fn test_break_check_warns_after_five_hours_without_lunch() {
    let db = setup_test_db("break_check_lunch");
    init_db_with_data(&db);

    sc().args(["--db", &db, "--at", "2025-03-10 09:00:00", "clock-in", "E1"])
        .assert()
        .success();

    sc().args([
        "--db",
        &db,
        "--at",
        "2025-03-10 14:30:00",
        "break-check",
        "E1",
        "--json",
    ])
    .assert()
    .success()
    .stdout(contains("\"enforced\": true"))
    .stdout(contains("5 hours without a lunch break"));

    sc().args(["--db", &db, "logs", "--employee", "E1", "--json"])
        .assert()
        .success()
        .stdout(contains("WARNING: 5+ hours worked without lunch break"));
}

#[test]
fn test_break_check_warns_after_three_hours_without_break() {
    let db = setup_test_db("break_check_regular");
    init_db_with_data(&db);

    sc().args(["--db", &db, "--at", "2025-03-10 09:00:00", "clock-in", "E1"])
        .assert()
        .success();

    sc().args([
        "--db",
        &db,
        "--at",
        "2025-03-10 12:30:00",
        "break-check",
        "E1",
        "--json",
    ])
    .assert()
    .success()
    .stdout(contains("\"enforced\": true"))
    .stdout(contains("3 hours without a break"));
}

#[test]
fn test_break_check_quiet_on_short_shift() {
    let db = setup_test_db("break_check_quiet");
    init_db_with_data(&db);

    sc().args(["--db", &db, "--at", "2025-03-10 09:00:00", "clock-in", "E1"])
        .assert()
        .success();

    sc().args([
        "--db",
        &db,
        "--at",
        "2025-03-10 10:00:00",
        "break-check",
        "E1",
        "--json",
    ])
    .assert()
    .success()
    .stdout(contains("\"enforced\": false"));
}
