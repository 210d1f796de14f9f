use predicates::str::contains;

mod common;
use common::{init_db_with_data, sc, setup_test_db};

#[test]
fn test_clock_in_and_status() {
    let db = setup_test_db("clock_in_status");
    init_db_with_data(&db);

    sc().args(["--db", &db, "--at", "2025-03-10 09:00:00", "clock-in", "E1"])
        .assert()
        .success()
        .stdout(contains("Clock-in successful"));

    sc().args(["--db", &db, "status", "E1"])
        .assert()
        .success()
        .stdout(contains("Clocked In"));
}

#[test]
fn test_late_clock_in_records_minutes_and_note() {
    let db = setup_test_db("late_clock_in");
    init_db_with_data(&db);

    // Shift starts at 09:00, clock-in at 09:10 → 10 minutes late
    sc().args([
        "--db",
        &db,
        "--at",
        "2025-03-10 09:10:00",
        "clock-in",
        "E1",
        "--json",
    ])
    .assert()
    .success()
    .stdout(contains("\"lateMinutes\": 10.0"))
    .stdout(contains("\"payPeriodMissedMinutes\": 10.0"));

    sc().args(["--db", &db, "logs", "--employee", "E1", "--json"])
        .assert()
        .success()
        .stdout(contains("Late clock-in"));
}

#[test]
fn test_early_arrival_is_not_late() {
    let db = setup_test_db("early_arrival");
    init_db_with_data(&db);

    sc().args([
        "--db",
        &db,
        "--at",
        "2025-03-10 08:30:00",
        "clock-in",
        "E1",
        "--json",
    ])
    .assert()
    .success()
    .stdout(contains("\"lateMinutes\": 0.0"));
}

#[test]
fn test_duplicate_clock_in_rejected() {
    let db = setup_test_db("duplicate_clock_in");
    init_db_with_data(&db);

    sc().args(["--db", &db, "--at", "2025-03-09 09:00:00", "clock-in", "E1"])
        .assert()
        .success();

    // Second clock-in on a later date must fail, naming the open log's date
    sc().args([
        "--db",
        &db,
        "--at",
        "2025-03-10 09:00:00",
        "clock-in",
        "E1",
        "--json",
    ])
    .assert()
    .success()
    .stdout(contains("\"success\": false"))
    .stdout(contains("incomplete time log from 2025-03-09"));
}

#[test]
fn test_clock_out_completes_log() {
    let db = setup_test_db("clock_out");
    init_db_with_data(&db);

    sc().args(["--db", &db, "--at", "2025-03-10 09:00:00", "clock-in", "E1"])
        .assert()
        .success();

    sc().args(["--db", &db, "--at", "2025-03-10 17:00:00", "clock-out", "E1"])
        .assert()
        .success()
        .stdout(contains("Clock-out successful"));

    sc().args(["--db", &db, "status", "E1"])
        .assert()
        .success()
        .stdout(contains("Clocked Out"));

    sc().args(["--db", &db, "logs", "--employee", "E1"])
        .assert()
        .success()
        .stdout(contains("Complete"));
}

#[test]
fn test_clock_out_without_open_log_fails() {
    let db = setup_test_db("clock_out_no_open");
    init_db_with_data(&db);

    sc().args([
        "--db",
        &db,
        "--at",
        "2025-03-10 17:00:00",
        "clock-out",
        "E1",
        "--json",
    ])
    .assert()
    .success()
    .stdout(contains("\"success\": false"))
    .stdout(contains("No active clock-in found"));
}

#[test]
fn test_early_departure_minutes() {
    let db = setup_test_db("early_departure");
    init_db_with_data(&db);

    sc().args(["--db", &db, "--at", "2025-03-10 09:00:00", "clock-in", "E1"])
        .assert()
        .success();

    // Shift ends at 17:00, leaving at 16:30 → 30 minutes early
    sc().args([
        "--db",
        &db,
        "--at",
        "2025-03-10 16:30:00",
        "clock-out",
        "E1",
        "--json",
    ])
    .assert()
    .success()
    .stdout(contains("\"earlyMinutes\": 30.0"));

    sc().args(["--db", &db, "logs", "--employee", "E1", "--json"])
        .assert()
        .success()
        .stdout(contains("Early departure"));
}

#[test]
fn test_cross_day_clock_out_skips_early_check() {
    let db = setup_test_db("cross_day");
    init_db_with_data(&db);

    sc().args(["--db", &db, "--at", "2025-03-09 09:00:00", "clock-in", "E1"])
        .assert()
        .success();

    // Clocking out the next day: no early-departure evaluation, but a note
    sc().args([
        "--db",
        &db,
        "--at",
        "2025-03-10 08:00:00",
        "clock-out",
        "E1",
        "--json",
    ])
    .assert()
    .success()
    .stdout(contains("\"earlyMinutes\": 0.0"))
    .stdout(contains("\"differentDay\": true"));

    sc().args(["--db", &db, "logs", "--employee", "E1", "--json"])
        .assert()
        .success()
        .stdout(contains("different day"));
}

#[test]
fn test_unknown_employee_cannot_clock_in() {
    let db = setup_test_db("unknown_employee");
    init_db_with_data(&db);

    sc().args([
        "--db",
        &db,
        "--at",
        "2025-03-10 09:00:00",
        "clock-in",
        "E9",
        "--json",
    ])
    .assert()
    .success()
    .stdout(contains("\"success\": false"))
    .stdout(contains("Employee not found"));
}

#[test]
fn test_fractional_day_shift_times() {
    let db = setup_test_db("fraction_shift");

    sc().args(["--db", &db, "--test", "init"]).assert().success();

    // 0.375 = 09:00, 0.7083333 ≈ 17:00 as Excel day fractions
    sc().args([
        "--db", &db, "shift", "add", "S3", "Fraction Shift", "--start", "0.375", "--end",
        "0.7083333",
    ])
    .assert()
    .success();

    sc().args(["--db", &db, "shift", "list"])
        .assert()
        .success()
        .stdout(contains("09:00:00"))
        .stdout(contains("17:00:00"));

    sc().args([
        "--db",
        &db,
        "employee",
        "add",
        "E3",
        "Rita",
        "Bianchi",
        "--shift",
        "S3",
    ])
    .assert()
    .success();

    sc().args([
        "--db",
        &db,
        "--at",
        "2025-03-10 09:10:00",
        "clock-in",
        "E3",
        "--json",
    ])
    .assert()
    .success()
    .stdout(contains("\"lateMinutes\": 10.0"));
}
