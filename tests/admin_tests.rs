use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db_with_data, sc, setup_test_db};

#[test]
fn test_db_info_counts_rows() {
    let db = setup_test_db("db_info");
    init_db_with_data(&db);

    sc().args(["--db", &db, "--at", "2025-03-10 09:00:00", "clock-in", "E1"])
        .assert()
        .success();

    sc().args(["--db", &db, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("time logs:   1"))
        .stdout(contains("employees:   1"))
        .stdout(contains("pay periods: 1"));
}

#[test]
fn test_db_integrity_check() {
    let db = setup_test_db("db_check");
    init_db_with_data(&db);

    sc().args(["--db", &db, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Database integrity OK"));
}

#[test]
fn test_db_migrate_is_idempotent() {
    let db = setup_test_db("db_migrate");
    init_db_with_data(&db);

    sc().args(["--db", &db, "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Migrations up to date"));

    sc().args(["--db", &db, "db", "--migrate"])
        .assert()
        .success();
}

#[test]
fn test_internal_log_records_operations() {
    let db = setup_test_db("internal_log");
    init_db_with_data(&db);

    sc().args(["--db", &db, "--at", "2025-03-10 09:00:00", "clock-in", "E1"])
        .assert()
        .success();
    sc().args(["--db", &db, "--at", "2025-03-10 17:00:00", "clock-out", "E1"])
        .assert()
        .success();

    sc().args(["--db", &db, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("clock_in"))
        .stdout(contains("clock_out"))
        .stdout(contains("E1"));
}

#[test]
fn test_employee_list_hides_inactive_by_default() {
    let db = setup_test_db("employee_list");
    init_db_with_data(&db);

    sc().args([
        "--db",
        &db,
        "employee",
        "add",
        "E8",
        "Gone",
        "Away",
        "--inactive",
    ])
    .assert()
    .success();

    sc().args(["--db", &db, "employee", "list"])
        .assert()
        .success()
        .stdout(contains("Mara Conti"))
        .stdout(contains("Gone Away").not());

    sc().args(["--db", &db, "employee", "list", "--all"])
        .assert()
        .success()
        .stdout(contains("Gone Away"));
}

#[test]
fn test_period_list_shows_bounds() {
    let db = setup_test_db("period_list");
    init_db_with_data(&db);

    sc().args(["--db", &db, "period", "list"])
        .assert()
        .success()
        .stdout(contains("2025-03-01"))
        .stdout(contains("2025-03-15"))
        .stdout(contains("Active"));
}

#[test]
fn test_period_rejects_inverted_bounds() {
    let db = setup_test_db("period_inverted");
    init_db_with_data(&db);

    sc().args([
        "--db",
        &db,
        "period",
        "add",
        "P2",
        "Broken",
        "2025-04-15",
        "2025-04-01",
    ])
    .assert()
    .failure()
    .stderr(contains("precedes start date"));
}
