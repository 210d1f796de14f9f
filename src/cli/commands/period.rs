use crate::cli::commands::open_pool;
use crate::cli::parser::PeriodCmd;
use crate::config::Config;
use crate::db::queries::{insert_pay_period, load_pay_periods};
use crate::errors::{AppError, AppResult};
use crate::models::pay_period::PayPeriod;
use crate::ui::messages::success;
use crate::utils::date::{format_date, parse_date};
use crate::utils::table::{Column, Table};

pub fn handle(action: &PeriodCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match action {
        PeriodCmd::Add {
            id,
            name,
            start,
            end,
            status,
        } => {
            let start_date =
                parse_date(start).ok_or_else(|| AppError::InvalidDate(start.clone()))?;
            let end_date = parse_date(end).ok_or_else(|| AppError::InvalidDate(end.clone()))?;

            if end_date < start_date {
                return Err(AppError::InvalidDate(format!(
                    "end date {} precedes start date {}",
                    end, start
                )));
            }

            let period = PayPeriod {
                period_id: id.clone(),
                name: name.clone(),
                start_date,
                end_date,
                status: status.clone(),
            };
            insert_pay_period(&pool.conn, &period)?;
            success(format!("Added pay period {} ({} → {})", id, start, end));
        }

        PeriodCmd::List => {
            let periods = load_pay_periods(&mut pool)?;

            let mut table = Table::new(vec![
                Column::new("ID", 8),
                Column::new("Name", 20),
                Column::new("Start", 10),
                Column::new("End", 10),
                Column::new("Status", 8),
            ]);

            for period in &periods {
                table.add_row(vec![
                    period.period_id.clone(),
                    period.name.clone(),
                    format_date(period.start_date),
                    format_date(period.end_date),
                    period.status.clone(),
                ]);
            }

            print!("{}", table.render());
        }
    }

    Ok(())
}
