use predicates::str::contains;
use std::fs;

mod common;
use common::{add_overnight_employee, init_db_with_data, sc, setup_test_db, temp_out, work_full_day};

#[test]
fn test_qualifying_shift_threshold() {
    let db = setup_test_db("qualifying_threshold");
    init_db_with_data(&db);

    // One 8h day (qualifying) and one 6h day (not qualifying)
    work_full_day(&db, "E1", "2025-03-10");

    sc().args(["--db", &db, "--at", "2025-03-11 09:00:00", "clock-in", "E1"])
        .assert()
        .success();
    sc().args(["--db", &db, "--at", "2025-03-11 15:00:00", "clock-out", "E1"])
        .assert()
        .success();

    sc().args(["--db", &db, "report", "qualifying", "P1", "--json"])
        .assert()
        .success()
        .stdout(contains("\"qualifyingShifts\": 1"))
        .stdout(contains("\"counted\": false"));
}

#[test]
fn test_overnight_attribution_merges_split_logs() {
    let db = setup_test_db("overnight_attribution");
    init_db_with_data(&db);
    add_overnight_employee(&db);

    // Evening leg: 22:00 → 01:00 (3h), attributed to 2025-03-10
    sc().args(["--db", &db, "--at", "2025-03-10 22:00:00", "clock-in", "E2"])
        .assert()
        .success();
    sc().args(["--db", &db, "--at", "2025-03-11 01:00:00", "clock-out", "E2"])
        .assert()
        .success();

    // Morning leg: 01:30 → 06:00 (4.5h), clocked in before 05:00 so it
    // belongs to the previous day's shift as well
    sc().args(["--db", &db, "--at", "2025-03-11 01:30:00", "clock-in", "E2"])
        .assert()
        .success();
    sc().args(["--db", &db, "--at", "2025-03-11 06:00:00", "clock-out", "E2"])
        .assert()
        .success();

    // Both legs land in the 2025-03-10 bucket: 7.5h → one qualifying shift
    sc().args(["--db", &db, "report", "qualifying", "P1", "--json"])
        .assert()
        .success()
        .stdout(contains("\"shiftType\": \"Overnight\""))
        .stdout(contains("\"shiftDate\": \"2025-03-10\""))
        .stdout(contains("\"qualifyingShifts\": 1"));
}

#[test]
fn test_evening_clock_in_stays_on_its_own_day() {
    let db = setup_test_db("overnight_evening");
    init_db_with_data(&db);
    add_overnight_employee(&db);

    sc().args(["--db", &db, "--at", "2025-03-10 23:00:00", "clock-in", "E2"])
        .assert()
        .success();
    sc().args(["--db", &db, "--at", "2025-03-11 06:00:00", "clock-out", "E2"])
        .assert()
        .success();

    sc().args(["--db", &db, "report", "qualifying", "P1", "--json"])
        .assert()
        .success()
        .stdout(contains("\"shiftDate\": \"2025-03-10\""))
        .stdout(contains("\"qualifyingShifts\": 1"));
}

#[test]
fn test_eligibility_granted_within_thresholds() {
    let db = setup_test_db("eligibility_ok");
    init_db_with_data(&db);

    // Nine full 8h days: 72h, 9 qualifying shifts, 0 missed minutes
    for day in 3..=11 {
        work_full_day(&db, "E1", &format!("2025-03-{:02}", day));
    }

    sc().args(["--db", &db, "report", "attendance", "P1", "--json"])
        .assert()
        .success()
        .stdout(contains("\"shiftsWorked\": 9"))
        .stdout(contains("\"totalMissedMinutes\": 0.0"))
        .stdout(contains("\"isEligible\": true"));
}

#[test]
fn test_eligibility_denied_on_missed_minutes() {
    let db = setup_test_db("eligibility_missed");
    init_db_with_data(&db);

    for day in 3..=10 {
        work_full_day(&db, "E1", &format!("2025-03-{:02}", day));
    }

    // Ninth day arrives 25 minutes late → 25 missed > 20 allowed
    sc().args(["--db", &db, "--at", "2025-03-11 09:25:00", "clock-in", "E1"])
        .assert()
        .success();
    sc().args(["--db", &db, "--at", "2025-03-11 17:00:00", "clock-out", "E1"])
        .assert()
        .success();

    sc().args(["--db", &db, "report", "attendance", "P1", "--json"])
        .assert()
        .success()
        .stdout(contains("\"totalMissedMinutes\": 25.0"))
        .stdout(contains("\"lateMinutes\": 25.0"))
        .stdout(contains("\"isEligible\": false"));
}

#[test]
fn test_eligibility_denied_on_too_few_shifts() {
    let db = setup_test_db("eligibility_shifts");
    init_db_with_data(&db);

    // Six full days: clean record but not enough qualifying shifts
    for day in 3..=8 {
        work_full_day(&db, "E1", &format!("2025-03-{:02}", day));
    }

    sc().args(["--db", &db, "report", "attendance", "P1", "--json"])
        .assert()
        .success()
        .stdout(contains("\"shiftsWorked\": 6"))
        .stdout(contains("\"isEligible\": false"));
}

#[test]
fn test_grant_tops_up_to_eighty_hours() {
    let db = setup_test_db("grant_topup");
    init_db_with_data(&db);

    // Eligible with 72h → one synthetic log of 8h, the day before period end
    for day in 3..=11 {
        work_full_day(&db, "E1", &format!("2025-03-{:02}", day));
    }

    sc().args(["--db", &db, "grant-hours", "P1", "--json"])
        .assert()
        .success()
        .stdout(contains("\"success\": true"))
        .stdout(contains("\"additionalHours\": 8.0"));

    sc().args(["--db", &db, "logs", "--employee", "E1", "--json"])
        .assert()
        .success()
        .stdout(contains("AUTO-"))
        .stdout(contains("80 hours Payperiod Incentive remaining hours"))
        .stdout(contains("2025-03-14T01:00:00"));

    // The synthetic row voids paid break hours for the period
    sc().args(["--db", &db, "report", "attendance", "P1", "--json"])
        .assert()
        .success()
        .stdout(contains("\"hasAutoLogs\": true"))
        .stdout(contains("\"paidBreakHours\": 0.0"))
        .stdout(contains("\"totalHours\": 80.0"));
}

#[test]
fn test_grant_skips_ineligible_employees() {
    let db = setup_test_db("grant_ineligible");
    init_db_with_data(&db);

    work_full_day(&db, "E1", "2025-03-10");

    sc().args(["--db", &db, "grant-hours", "P1", "--json"])
        .assert()
        .success()
        .stdout(contains("\"success\": false"))
        .stdout(contains("No eligible employees found"));
}

#[test]
fn test_attendance_csv_export() {
    let db = setup_test_db("attendance_csv");
    init_db_with_data(&db);

    for day in 3..=11 {
        work_full_day(&db, "E1", &format!("2025-03-{:02}", day));
    }

    let out = temp_out("attendance_csv", "csv");
    sc().args(["--db", &db, "report", "attendance", "P1", "--csv", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read CSV export");
    assert!(content.starts_with("employee_id,name,total_hours"));
    assert!(content.contains("E1,Mara Conti,72.00,9"));
    assert!(content.contains("true"));
}

#[test]
fn test_unknown_pay_period_fails() {
    let db = setup_test_db("unknown_period");
    init_db_with_data(&db);

    sc().args(["--db", &db, "report", "qualifying", "P9", "--json"])
        .assert()
        .failure()
        .stderr(contains("Pay period not found"));
}
