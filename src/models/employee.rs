use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub employee_id: String, // ⇔ employees.employee_id (TEXT PK)
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub status: String,           // 'Active' | 'Inactive'
    pub shift_id: Option<String>, // ⇔ employees.shift_id (nullable FK to shifts)
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_active(&self) -> bool {
        self.status == "Active"
    }
}
