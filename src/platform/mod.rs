//! Platform abstraction layer
//!
//! Wall clock and calendar for the host loop and the score book:
//! `js_sys::Date` in the browser, `SystemTime` natively. Calendar dates go
//! through chrono on both.

use chrono::NaiveDate;

/// Calendar date format used in the score book
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Today's local date as `YYYY-MM-DD`
pub fn today() -> String {
    chrono::Local::now()
        .date_naive()
        .format(DATE_FORMAT)
        .to_string()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
}

/// Whole days from `earlier` to `later`, `None` if either is malformed
pub fn days_between(earlier: &str, later: &str) -> Option<i64> {
    Some((parse_date(later)? - parse_date(earlier)?).num_days())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_day_and_month_edges() {
        assert_eq!(days_between("2024-02-28", "2024-03-01"), Some(2));
        assert_eq!(days_between("2023-02-28", "2023-03-01"), Some(1));
        assert_eq!(days_between("2026-01-01", "2025-12-31"), Some(-1));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date("2023-02-29"), None);
    }

    #[test]
    fn test_today_is_well_formed() {
        let today = today();
        assert_eq!(today.len(), 10);
        assert!(parse_date(&today).is_some());
    }
}
