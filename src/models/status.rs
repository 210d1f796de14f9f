use serde::Serialize;

/// Resolved attendance state, shaped the way the kiosk and TV display
/// consume it. `status` is always present, even on internal failure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStatus {
    pub status: String,
    pub time: String,
    pub log_id: String,
    pub regular_breaks_taken: u8,
    pub lunch_break_taken: bool,
    pub on_break: Option<String>, // "regular" | "lunch"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_time_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_number: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub const STATUS_NOT_CLOCKED_IN: &str = "Not Clocked In";
pub const STATUS_CLOCKED_IN: &str = "Clocked In";
pub const STATUS_CLOCKED_OUT: &str = "Clocked Out";
pub const STATUS_ON_REGULAR_BREAK: &str = "On Regular Break";
pub const STATUS_ON_LUNCH_BREAK: &str = "On Lunch Break";
pub const STATUS_ERROR: &str = "Error";

impl EmployeeStatus {
    pub fn not_clocked_in() -> Self {
        Self {
            status: STATUS_NOT_CLOCKED_IN.to_string(),
            time: String::new(),
            log_id: String::new(),
            regular_breaks_taken: 0,
            lunch_break_taken: false,
            on_break: None,
            break_start_time: None,
            break_time_limit: None,
            break_number: None,
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            message: Some(message.into()),
            ..Self::not_clocked_in()
        }
    }

    pub fn is_clocked_in(&self) -> bool {
        self.status == STATUS_CLOCKED_IN
    }
}
