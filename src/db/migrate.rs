//! Schema migration engine. Every table is created here and only here;
//! feature-detection migrations upgrade databases created by older builds.

use crate::ui::messages::warning;
use rusqlite::{Connection, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn ensure_employees_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            employee_id TEXT PRIMARY KEY,
            first_name  TEXT NOT NULL,
            last_name   TEXT NOT NULL,
            department  TEXT NOT NULL DEFAULT '',
            status      TEXT NOT NULL DEFAULT 'Active' CHECK(status IN ('Active','Inactive')),
            shift_id    TEXT
        );
        "#,
    )?;
    Ok(())
}

fn ensure_shifts_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS shifts (
            shift_id     TEXT PRIMARY KEY,
            name         TEXT NOT NULL,
            is_overnight INTEGER,
            week_a_start TEXT,
            week_a_end   TEXT,
            week_b_start TEXT,
            week_b_end   TEXT
        );
        "#,
    )?;
    Ok(())
}

fn ensure_pay_periods_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS pay_periods (
            period_id  TEXT PRIMARY KEY,
            name       TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date   TEXT NOT NULL,
            status     TEXT NOT NULL DEFAULT 'Active'
        );
        "#,
    )?;
    Ok(())
}

fn ensure_time_logs_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS time_logs (
            log_id          TEXT PRIMARY KEY,
            employee_id     TEXT NOT NULL,
            log_date        TEXT NOT NULL,
            clock_in        TEXT,
            clock_out       TEXT,
            break1_start    TEXT,
            break1_end      TEXT,
            break2_start    TEXT,
            break2_end      TEXT,
            lunch_start     TEXT,
            lunch_end       TEXT,
            total_hours     REAL,
            reg_break_hours REAL,
            lunch_hours     REAL,
            net_hours       REAL,
            status          TEXT NOT NULL DEFAULT 'Incomplete' CHECK(status IN ('Incomplete','Complete')),
            late_minutes    REAL,
            early_minutes   REAL,
            break1_missed   REAL,
            break2_missed   REAL,
            lunch_missed    REAL,
            total_missed    REAL,
            notes           TEXT NOT NULL DEFAULT '',
            created_at      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_time_logs_employee ON time_logs(employee_id);
        CREATE INDEX IF NOT EXISTS idx_time_logs_employee_status ON time_logs(employee_id, status);
        "#,
    )?;
    Ok(())
}

/// Check if a table has a given column.
fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Databases created before the eligibility reports shipped have no
/// `net_hours` column; add it so Complete rows can carry the derived value.
fn migrate_add_net_hours(conn: &Connection) -> Result<()> {
    if table_has_column(conn, "time_logs", "net_hours")? {
        return Ok(()); // già presente → OK
    }

    warning("Adding 'net_hours' column to time_logs table...");
    conn.execute_batch("ALTER TABLE time_logs ADD COLUMN net_hours REAL;")?;
    Ok(())
}

/// Older builds stored employees without a shift assignment.
fn migrate_add_shift_id(conn: &Connection) -> Result<()> {
    if table_has_column(conn, "employees", "shift_id")? {
        return Ok(());
    }

    warning("Adding 'shift_id' column to employees table...");
    conn.execute_batch("ALTER TABLE employees ADD COLUMN shift_id TEXT;")?;
    Ok(())
}

/// Run all pending migrations in order. Idempotent.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    ensure_employees_table(conn)?;
    ensure_shifts_table(conn)?;
    ensure_pay_periods_table(conn)?;
    ensure_time_logs_table(conn)?;

    migrate_add_net_hours(conn)?;
    migrate_add_shift_id(conn)?;

    Ok(())
}
