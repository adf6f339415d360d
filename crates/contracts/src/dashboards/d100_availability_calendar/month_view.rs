use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Navigation cursor of the calendar: the displayed (year, month)
///
/// `month` is 1-based. Values are kept in range by construction; the
/// transitions roll the year at the January/December boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
}

impl MonthView {
    /// `None` when `month` is outside 1..=12 or the year is out of chrono's range
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// Month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn previous_month(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next_month(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Reset to the month containing `today`
    pub fn jump_to_today(self, today: NaiveDate) -> Self {
        Self::containing(today)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next_month()
            .first_day()
            .pred_opt()
            .unwrap_or_else(|| self.first_day())
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// Every day of the month in ascending order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let first = self.first_day();
        (0..self.days_in_month() as i64).map(move |offset| first + Duration::days(offset))
    }

    /// Period key in format "YYYY-MM"
    pub fn period(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Human title, e.g. "March 2024"
    pub fn title(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(year: i32, month: u32) -> MonthView {
        MonthView::new(year, month).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_month() {
        assert!(MonthView::new(2024, 0).is_none());
        assert!(MonthView::new(2024, 13).is_none());
        assert!(MonthView::new(2024, 12).is_some());
    }

    #[test]
    fn test_previous_rolls_year_back() {
        assert_eq!(mv(2024, 1).previous_month(), mv(2023, 12));
        assert_eq!(mv(2024, 5).previous_month(), mv(2024, 4));
    }

    #[test]
    fn test_next_rolls_year_forward() {
        assert_eq!(mv(2024, 12).next_month(), mv(2025, 1));
        assert_eq!(mv(2024, 5).next_month(), mv(2024, 6));
    }

    #[test]
    fn test_twelve_steps_forward_is_one_year() {
        for month in 1..=12 {
            let start = mv(2023, month);
            let mut cursor = start;
            for _ in 0..12 {
                cursor = cursor.next_month();
            }
            assert_eq!(cursor, mv(2024, month));
        }
    }

    #[test]
    fn test_previous_undoes_next() {
        let start = mv(2024, 12);
        assert_eq!(start.next_month().previous_month(), start);
    }

    #[test]
    fn test_jump_to_today() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(mv(2020, 2).jump_to_today(today), mv(2026, 10));
    }

    #[test]
    fn test_day_range() {
        let feb_leap = mv(2024, 2);
        assert_eq!(feb_leap.days_in_month(), 29);
        assert_eq!(feb_leap.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(feb_leap.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(mv(2023, 2).days_in_month(), 28);
        assert_eq!(mv(2024, 12).days_in_month(), 31);

        let days: Vec<NaiveDate> = mv(2024, 4).days().collect();
        assert_eq!(days.len(), 30);
        assert!(days.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_period_and_title() {
        assert_eq!(mv(2024, 3).period(), "2024-03");
        assert_eq!(mv(2024, 3).title(), "March 2024");
    }
}
