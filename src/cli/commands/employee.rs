use crate::cli::parser::EmployeeCmd;
use crate::cli::commands::open_pool;
use crate::config::Config;
use crate::db::queries::{insert_employee, load_employees};
use crate::errors::AppResult;
use crate::models::employee::Employee;
use crate::ui::messages::success;
use crate::utils::table::{Column, Table};

pub fn handle(action: &EmployeeCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match action {
        EmployeeCmd::Add {
            id,
            first_name,
            last_name,
            department,
            shift,
            inactive,
        } => {
            let emp = Employee {
                employee_id: id.clone(),
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                department: department.clone(),
                status: if *inactive { "Inactive" } else { "Active" }.to_string(),
                shift_id: shift.clone(),
            };
            insert_employee(&pool.conn, &emp)?;
            success(format!("Added employee {} ({})", emp.full_name(), id));
        }

        EmployeeCmd::List { all } => {
            let employees = load_employees(&mut pool, !all)?;

            let mut table = Table::new(vec![
                Column::new("ID", 8),
                Column::new("Name", 24),
                Column::new("Department", 14),
                Column::new("Status", 8),
                Column::new("Shift", 8),
            ]);

            for emp in &employees {
                table.add_row(vec![
                    emp.employee_id.clone(),
                    emp.full_name(),
                    emp.department.clone(),
                    emp.status.clone(),
                    emp.shift_id.clone().unwrap_or_default(),
                ]);
            }

            print!("{}", table.render());
        }
    }

    Ok(())
}
