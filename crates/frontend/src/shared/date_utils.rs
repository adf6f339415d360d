//! Date helpers for booking forms and tables
use chrono::NaiveDate;

/// Today in the browser's local time zone
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Format ISO date string to DD.MM.YYYY format
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15.03.2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}.{}.{}", day, month, year);
        }
    }
    date_str.to_string()
}

/// Stay length in nights, `None` for unparsable or reversed dates
pub fn nights(check_in: &str, check_out: &str) -> Option<i64> {
    let check_in = NaiveDate::parse_from_str(check_in.trim(), "%Y-%m-%d").ok()?;
    let check_out = NaiveDate::parse_from_str(check_out.trim(), "%Y-%m-%d").ok()?;
    let n = (check_out - check_in).num_days();
    (n >= 0).then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15.03.2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15.03.2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_nights() {
        assert_eq!(nights("2024-03-10", "2024-03-12"), Some(2));
        assert_eq!(nights("2024-03-10", "2024-03-10"), Some(0));
        assert_eq!(nights("2024-03-12", "2024-03-10"), None);
        assert_eq!(nights("", "2024-03-10"), None);
    }
}
