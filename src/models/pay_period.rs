use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PayPeriod {
    pub period_id: String,
    pub name: String,
    pub start_date: NaiveDate, // inclusive
    pub end_date: NaiveDate,   // inclusive
    pub status: String,        // 'Active' | 'Closed'
}

impl PayPeriod {
    pub fn is_active(&self) -> bool {
        self.status == "Active"
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}
