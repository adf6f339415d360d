use serde::{Deserialize, Serialize};

use super::grid::{AvailabilityGrid, CellStatus};

/// Cell counts of one grid, shown above the calendar
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OccupancySummary {
    pub occupied: usize,
    pub available: usize,
    pub past: usize,
    /// occupied / (occupied + available), 0.0 when nothing is left to book
    pub occupancy_rate: f64,
}

impl OccupancySummary {
    pub fn from_grid(grid: &AvailabilityGrid) -> Self {
        let mut summary = Self::default();
        for cell in grid.rows.iter().flat_map(|r| r.cells.iter()) {
            match cell.status {
                CellStatus::Occupied => summary.occupied += 1,
                CellStatus::Available => summary.available += 1,
                CellStatus::Past => summary.past += 1,
            }
        }
        let open = summary.occupied + summary.available;
        if open > 0 {
            summary.occupancy_rate = summary.occupied as f64 / open as f64;
        }
        summary
    }

    /// Rate as a whole percent, e.g. "42%"
    pub fn rate_label(&self) -> String {
        format!("{:.0}%", self.occupancy_rate * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d100_availability_calendar::grid::build_grid;
    use crate::dashboards::d100_availability_calendar::month_view::MonthView;
    use crate::dashboards::d100_availability_calendar::room_directory::RoomNumber;
    use crate::domain::a002_booking::aggregate::Booking;
    use crate::domain::common::EntityMetadata;
    use chrono::NaiveDate;

    #[test]
    fn test_counts_and_rate() {
        let booking = Booking {
            booking_id: 1,
            room_id: 1,
            room_no: Some(101),
            room_name: "Deluxe".into(),
            total_price: 100.0,
            currency: "INR".into(),
            booking_date: "2024-04-01".into(),
            status: "confirmed".into(),
            check_in_date: Some("2024-04-21".into()),
            check_out_date: Some("2024-04-25".into()),
            user_name: "Asha".into(),
            email: "asha@example.com".into(),
            metadata: EntityMetadata::new(),
        };
        let view = MonthView::new(2024, 4).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 4, 11).unwrap();
        let grid = build_grid(&[RoomNumber(101)], &[booking], view, today);

        let summary = OccupancySummary::from_grid(&grid);
        assert_eq!(summary.past, 10);
        assert_eq!(summary.occupied, 5);
        assert_eq!(summary.available, 15);
        assert!((summary.occupancy_rate - 0.25).abs() < 1e-9);
        assert_eq!(summary.rate_label(), "25%");
    }

    #[test]
    fn test_fully_past_month_has_zero_rate() {
        let view = MonthView::new(2020, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let grid = build_grid(&[RoomNumber(1)], &[], view, today);
        let summary = OccupancySummary::from_grid(&grid);
        assert_eq!(summary.past, 31);
        assert_eq!(summary.occupancy_rate, 0.0);
    }
}
