use chrono::{Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s.trim(), "%m/%d/%Y"))
        .ok()
}

pub fn format_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_date_shapes() {
        let iso = parse_date("2025-03-10").unwrap();
        let us = parse_date("03/10/2025").unwrap();
        assert_eq!(iso, us);
    }

    #[test]
    fn rejects_invalid_date() {
        assert!(parse_date("2025-13-40").is_none());
    }
}
