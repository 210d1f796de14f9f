use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;

fn strip_ansi(s: &str) -> String {
    let re = regex::Regex::new(r"\x1B\[[0-9;]*[mK]").unwrap();
    re.replace_all(s, "").into_owned()
}

/// Color for the audit-log operation column
fn color_for_operation(op: &str) -> Colour {
    match op {
        "clock_in" => Colour::Green,
        "clock_out" => Colour::Blue,
        "break_start" | "break_end" => Colour::Yellow,
        "grant_hours" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pool = DbPool::new(&cfg.database)?;

        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let id: i32 = row.get(0)?;
            let raw_date: String = row.get(1)?;
            let operation: String = row.get(2)?;
            let target: String = row.get(3)?;
            let message: String = row.get(4)?;

            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok((id, date, operation, target, message))
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }

        println!("📜 Internal log:\n");

        for (id, date, operation, target, message) in entries {
            let colored_op = color_for_operation(&operation)
                .paint(operation.as_str())
                .to_string();
            let visible_len = strip_ansi(&colored_op).len();
            let pad = " ".repeat(14usize.saturating_sub(visible_len));

            println!("{:>4}  {}  {}{}  {}  {}", id, date, colored_op, pad, target, message);
        }
    }

    Ok(())
}
