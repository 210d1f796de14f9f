#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn sc() -> Command {
    cargo_bin_cmd!("shiftclock")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shiftclock.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB and seed one employee on a 09:00-17:00 day shift plus
/// an active pay period covering the first half of March 2025.
pub fn init_db_with_data(db_path: &str) {
    sc().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    sc().args([
        "--db",
        db_path,
        "shift",
        "add",
        "S1",
        "Day Shift",
        "--start",
        "09:00:00",
        "--end",
        "17:00:00",
    ])
    .assert()
    .success();

    sc().args([
        "--db",
        db_path,
        "employee",
        "add",
        "E1",
        "Mara",
        "Conti",
        "--department",
        "Operations",
        "--shift",
        "S1",
    ])
    .assert()
    .success();

    sc().args([
        "--db",
        db_path,
        "period",
        "add",
        "P1",
        "March A",
        "2025-03-01",
        "2025-03-15",
    ])
    .assert()
    .success();
}

/// Seed an overnight-shift employee (22:00-06:00) next to the day-shift one.
pub fn add_overnight_employee(db_path: &str) {
    sc().args([
        "--db",
        db_path,
        "shift",
        "add",
        "S2",
        "Night Shift",
        "--start",
        "22:00:00",
        "--end",
        "06:00:00",
    ])
    .assert()
    .success();

    sc().args([
        "--db",
        db_path,
        "employee",
        "add",
        "E2",
        "Nico",
        "Ferri",
        "--department",
        "Operations",
        "--shift",
        "S2",
    ])
    .assert()
    .success();
}

/// Clock a complete 09:00-17:00 day for an employee (no breaks, 8h net).
pub fn work_full_day(db_path: &str, employee: &str, date: &str) {
    sc().args([
        "--db",
        db_path,
        "--at",
        &format!("{} 09:00:00", date),
        "clock-in",
        employee,
    ])
    .assert()
    .success();

    sc().args([
        "--db",
        db_path,
        "--at",
        &format!("{} 17:00:00", date),
        "clock-out",
        employee,
    ])
    .assert()
    .success();
}
