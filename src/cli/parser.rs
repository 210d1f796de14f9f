use clap::{Parser, Subcommand};

/// Command-line interface definition for shiftclock
/// CLI application for employee clock-in/out and attendance tracking over SQLite
#[derive(Parser)]
#[command(
    name = "shiftclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "Employee time clock: clock in/out, breaks, missed minutes and pay-period eligibility over SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Override the wall clock ("YYYY-MM-DD HH:MM:SS"), for deterministic runs
    #[arg(global = true, long = "at", hide = true)]
    pub at: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage employee records
    Employee {
        #[command(subcommand)]
        action: EmployeeCmd,
    },

    /// Manage shift definitions
    Shift {
        #[command(subcommand)]
        action: ShiftCmd,
    },

    /// Manage pay periods
    Period {
        #[command(subcommand)]
        action: PeriodCmd,
    },

    /// Clock an employee in
    ClockIn {
        /// Employee ID
        employee: String,

        #[arg(long = "json", help = "Print the result as JSON")]
        json: bool,
    },

    /// Clock an employee out
    ClockOut {
        /// Employee ID
        employee: String,

        #[arg(long = "json", help = "Print the result as JSON")]
        json: bool,
    },

    /// Start a break for an employee
    BreakStart {
        /// Employee ID
        employee: String,

        /// Break type: regular or lunch
        #[arg(long = "type", value_name = "TYPE", default_value = "regular")]
        break_type: String,

        #[arg(long = "json", help = "Print the result as JSON")]
        json: bool,
    },

    /// End a break for an employee
    BreakEnd {
        /// Employee ID
        employee: String,

        /// Break type: regular or lunch
        #[arg(long = "type", value_name = "TYPE", default_value = "regular")]
        break_type: String,

        #[arg(long = "json", help = "Print the result as JSON")]
        json: bool,
    },

    /// Show an employee's current attendance status
    Status {
        /// Employee ID
        employee: String,

        #[arg(long = "json", help = "Print the result as JSON")]
        json: bool,
    },

    /// Warn when an open shift has gone too long without a break
    BreakCheck {
        /// Employee ID
        employee: String,

        #[arg(long = "json", help = "Print the result as JSON")]
        json: bool,
    },

    /// Live status board of every active employee
    Live {
        #[arg(long = "json", help = "Print the board as JSON")]
        json: bool,
    },

    /// List time logs with optional filters
    Logs {
        #[arg(long = "employee", help = "Filter by employee ID")]
        employee: Option<String>,

        #[arg(long = "date", help = "Filter by shift date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long = "missed-only", help = "Only logs with missed minutes")]
        missed_only: bool,

        #[arg(long = "json", help = "Print the logs as JSON")]
        json: bool,
    },

    /// Pay-period reports
    Report {
        #[command(subcommand)]
        kind: ReportCmd,
    },

    /// Top up eligible employees to the program target hours
    GrantHours {
        /// Pay period ID
        period: String,

        #[arg(long = "json", help = "Print the result as JSON")]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum EmployeeCmd {
    /// Add an employee
    Add {
        /// Employee ID
        id: String,
        /// First name
        first_name: String,
        /// Last name
        last_name: String,

        #[arg(long = "department", default_value = "")]
        department: String,

        #[arg(long = "shift", help = "Assigned shift ID")]
        shift: Option<String>,

        #[arg(long = "inactive", help = "Create the employee as Inactive")]
        inactive: bool,
    },

    /// List employees
    List {
        #[arg(long = "all", help = "Include inactive employees")]
        all: bool,
    },
}

#[derive(Subcommand)]
pub enum ShiftCmd {
    /// Add a shift definition
    Add {
        /// Shift ID
        id: String,
        /// Shift name
        name: String,

        #[arg(long = "start", help = "Week A start time (HH:MM[:SS], datetime or day fraction)")]
        start: Option<String>,

        #[arg(long = "end", help = "Week A end time")]
        end: Option<String>,

        #[arg(long = "start-b", help = "Week B start time")]
        start_b: Option<String>,

        #[arg(long = "end-b", help = "Week B end time")]
        end_b: Option<String>,

        #[arg(long = "overnight", help = "Force the overnight flag instead of deriving it")]
        overnight: Option<bool>,
    },

    /// List shift definitions
    List,
}

#[derive(Subcommand)]
pub enum PeriodCmd {
    /// Add a pay period
    Add {
        /// Pay period ID
        id: String,
        /// Pay period name
        name: String,
        /// Start date (YYYY-MM-DD), inclusive
        start: String,
        /// End date (YYYY-MM-DD), inclusive
        end: String,

        #[arg(long = "status", default_value = "Active")]
        status: String,
    },

    /// List pay periods
    List,
}

#[derive(Subcommand)]
pub enum ReportCmd {
    /// Qualifying shifts per employee for a pay period
    Qualifying {
        /// Pay period ID
        period: String,

        #[arg(long = "json", help = "Print the report as JSON")]
        json: bool,
    },

    /// Full attendance analysis with eligibility verdicts
    Attendance {
        /// Pay period ID
        period: String,

        #[arg(long = "json", help = "Print the report as JSON")]
        json: bool,

        #[arg(long = "csv", help = "Write the report to a CSV file")]
        csv: Option<String>,
    },
}
