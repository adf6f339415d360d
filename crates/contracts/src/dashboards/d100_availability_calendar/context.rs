use chrono::NaiveDate;

use super::grid::{build_grid, AvailabilityGrid};
use super::month_view::MonthView;
use super::room_directory::{rooms_from_room_types, RoomNumber};
use crate::domain::a001_room_type::aggregate::RoomType;
use crate::domain::a002_booking::aggregate::Booking;

/// State owned by one calendar view: the latest snapshots and the cursor
///
/// Snapshots are replaced as a pair by [`CalendarContext::refresh`], so a
/// grid is never built from a room list and a booking list of different
/// fetches.
#[derive(Debug, Clone, Default)]
pub struct CalendarContext {
    rooms: Vec<RoomNumber>,
    bookings: Vec<Booking>,
    cursor: Option<MonthView>,
}

impl CalendarContext {
    pub fn new(cursor: MonthView) -> Self {
        Self {
            rooms: Vec::new(),
            bookings: Vec::new(),
            cursor: Some(cursor),
        }
    }

    /// Replace both snapshots; room numbers are resolved here, once
    pub fn refresh(&mut self, room_types: &[RoomType], bookings: Vec<Booking>) {
        self.rooms = rooms_from_room_types(room_types);
        self.bookings = bookings;
    }

    pub fn rooms(&self) -> &[RoomNumber] {
        &self.rooms
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Displayed month; defaults to the month of `today` until set
    pub fn cursor(&self, today: NaiveDate) -> MonthView {
        self.cursor.unwrap_or_else(|| MonthView::containing(today))
    }

    pub fn previous_month(&mut self, today: NaiveDate) {
        self.cursor = Some(self.cursor(today).previous_month());
    }

    pub fn next_month(&mut self, today: NaiveDate) {
        self.cursor = Some(self.cursor(today).next_month());
    }

    pub fn jump_to_today(&mut self, today: NaiveDate) {
        self.cursor = Some(self.cursor(today).jump_to_today(today));
    }

    pub fn grid(&self, today: NaiveDate) -> AvailabilityGrid {
        build_grid(&self.rooms, &self.bookings, self.cursor(today), today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d100_availability_calendar::room_directory::RoomNumberEntry;
    use crate::domain::a001_room_type::aggregate::RoomTypeDto;

    fn room_type(id: i64, numbers: Vec<RoomNumberEntry>) -> RoomType {
        RoomType::new_for_insert(
            id,
            &RoomTypeDto {
                name: format!("Type {}", id),
                room_numbers: numbers,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_navigation() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 5).unwrap();
        let mut ctx = CalendarContext::default();
        assert_eq!(ctx.cursor(today), MonthView::new(2024, 12).unwrap());

        ctx.next_month(today);
        assert_eq!(ctx.cursor(today), MonthView::new(2025, 1).unwrap());
        ctx.previous_month(today);
        ctx.previous_month(today);
        assert_eq!(ctx.cursor(today), MonthView::new(2024, 11).unwrap());
        ctx.jump_to_today(today);
        assert_eq!(ctx.cursor(today), MonthView::new(2024, 12).unwrap());
    }

    #[test]
    fn test_refresh_resolves_rooms_across_types() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut ctx = CalendarContext::new(MonthView::new(2024, 3).unwrap());
        ctx.refresh(
            &[
                room_type(1, vec![RoomNumberEntry::Bare(201), RoomNumberEntry::Bare(101)]),
                room_type(
                    2,
                    vec![
                        RoomNumberEntry::Detailed {
                            room_no: 101,
                            status: "clean".into(),
                        },
                        RoomNumberEntry::Unrecognized(serde_json::json!("x")),
                    ],
                ),
            ],
            Vec::new(),
        );
        assert_eq!(ctx.rooms(), &[RoomNumber(101), RoomNumber(201)]);
        let grid = ctx.grid(today);
        assert_eq!(grid.rows.len(), 2);
        assert_eq!(grid.view, MonthView::new(2024, 3).unwrap());
    }
}
