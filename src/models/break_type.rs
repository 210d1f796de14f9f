use serde::Serialize;

/// Kind of break an employee can take during a shift.
/// The allowance (15 or 30 minutes) is fixed by the kind, not configurable.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BreakType {
    Regular,
    Lunch,
}

impl BreakType {
    /// Parse a user-supplied break type. Anything that is not "lunch"
    /// collapses to a regular break, mirroring the kiosk behavior.
    pub fn from_arg(s: &str) -> Self {
        if s.eq_ignore_ascii_case("lunch") {
            BreakType::Lunch
        } else {
            BreakType::Regular
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BreakType::Regular => "regular",
            BreakType::Lunch => "lunch",
        }
    }

    /// Allowed duration in minutes before overage starts to accrue.
    pub fn limit_minutes(&self) -> i64 {
        match self {
            BreakType::Regular => 15,
            BreakType::Lunch => 30,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BreakType::Regular => "Regular",
            BreakType::Lunch => "Lunch",
        }
    }
}
