use crate::cli::commands::open_pool;
use crate::cli::parser::ShiftCmd;
use crate::config::Config;
use crate::db::queries::{insert_shift, load_shifts};
use crate::errors::AppResult;
use crate::models::shift::ShiftDefinition;
use crate::ui::messages::success;
use crate::utils::table::{Column, Table};

pub fn handle(action: &ShiftCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match action {
        ShiftCmd::Add {
            id,
            name,
            start,
            end,
            start_b,
            end_b,
            overnight,
        } => {
            let shift = ShiftDefinition {
                shift_id: id.clone(),
                name: name.clone(),
                is_overnight: *overnight,
                week_a_start: start.clone(),
                week_a_end: end.clone(),
                week_b_start: start_b.clone(),
                week_b_end: end_b.clone(),
            };
            insert_shift(&pool.conn, &shift)?;
            success(format!(
                "Added shift {} ({}, {})",
                id,
                name,
                if shift.overnight() { "overnight" } else { "day" }
            ));
        }

        ShiftCmd::List => {
            let shifts = load_shifts(&mut pool)?;

            let mut table = Table::new(vec![
                Column::new("ID", 8),
                Column::new("Name", 20),
                Column::new("Start", 10),
                Column::new("End", 10),
                Column::new("Overnight", 9),
            ]);

            for shift in &shifts {
                table.add_row(vec![
                    shift.shift_id.clone(),
                    shift.name.clone(),
                    shift
                        .start_time()
                        .map(|t| t.format("%H:%M:%S").to_string())
                        .unwrap_or_default(),
                    shift
                        .end_time()
                        .map(|t| t.format("%H:%M:%S").to_string())
                        .unwrap_or_default(),
                    if shift.overnight() { "yes" } else { "no" }.to_string(),
                ]);
            }

            print!("{}", table.render());
        }
    }

    Ok(())
}
