//! Colored terminal messages with a severity icon per level.

use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

fn emit<T: fmt::Display>(color: &str, icon: &str, msg: T, to_stderr: bool) {
    let line = format!("{}{}{} {}{}", color, BOLD, icon, RESET, msg);
    if to_stderr {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    emit(FG_BLUE, "ℹ️", msg, false);
}

pub fn success<T: fmt::Display>(msg: T) {
    emit(FG_GREEN, "✅", msg, false);
}

pub fn warning<T: fmt::Display>(msg: T) {
    emit(FG_YELLOW, "⚠️", msg, false);
}

pub fn error<T: fmt::Display>(msg: T) {
    emit(FG_RED, "❌", msg, true);
}

/// Section header for report output
pub fn header<T: fmt::Display>(msg: T) {
    println!("{}{}== {} =={}", FG_BLUE, BOLD, msg, RESET);
}
