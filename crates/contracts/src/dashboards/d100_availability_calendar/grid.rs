//! Availability grid: room × day occupancy for one displayed month

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::month_view::MonthView;
use super::room_directory::RoomNumber;
use crate::domain::a002_booking::aggregate::Booking;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellStatus {
    Past,
    Available,
    Occupied,
}

impl CellStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellStatus::Past => "past",
            CellStatus::Available => "available",
            CellStatus::Occupied => "occupied",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub status: CellStatus,
    /// Guest first name, set on the check-in day of a stay
    pub guest_label: Option<String>,
    /// Last occupied day of a stay
    pub is_checkout_day: bool,
    /// Booking occupying the cell
    pub booking_id: Option<i64>,
}

/// Column header of the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub day: u32,
    /// Short weekday name, e.g. "Mon"
    pub weekday: String,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRow {
    pub room: RoomNumber,
    pub cells: Vec<CalendarCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityGrid {
    pub view: MonthView,
    pub columns: Vec<DayColumn>,
    pub rows: Vec<GridRow>,
    /// Non-cancelled bookings left out because a date did not parse
    pub skipped_booking_ids: Vec<i64>,
}

impl AvailabilityGrid {
    pub fn cell(&self, room: RoomNumber, date: NaiveDate) -> Option<&CalendarCell> {
        self.rows
            .iter()
            .find(|r| r.room == room)?
            .cells
            .iter()
            .find(|c| c.date == date)
    }
}

/// A booking reduced to what occupancy needs, dates already parsed
#[derive(Debug, Clone)]
struct Stay<'a> {
    booking_id: i64,
    room: RoomNumber,
    check_in: NaiveDate,
    check_out: NaiveDate,
    guest: Option<&'a str>,
}

impl Stay<'_> {
    fn covers(&self, room: RoomNumber, day: NaiveDate) -> bool {
        self.room == room && self.check_in <= day && day <= self.check_out
    }
}

/// Keep non-cancelled bookings with a room and parseable dates, in input order
fn collect_stays(bookings: &[Booking]) -> (Vec<Stay<'_>>, Vec<i64>) {
    let mut stays = Vec::with_capacity(bookings.len());
    let mut skipped = Vec::new();

    for booking in bookings.iter().filter(|b| !b.is_cancelled()) {
        let Some((check_in, check_out)) = booking.stay_dates() else {
            skipped.push(booking.booking_id);
            continue;
        };
        let Some(room_no) = booking.room_no else {
            continue;
        };
        stays.push(Stay {
            booking_id: booking.booking_id,
            room: RoomNumber(room_no),
            check_in,
            check_out,
            guest: booking.guest_short_name(),
        });
    }

    (stays, skipped)
}

fn build_cell(room: RoomNumber, day: NaiveDate, today: NaiveDate, stays: &[Stay<'_>]) -> CalendarCell {
    if day < today {
        return CalendarCell {
            date: day,
            status: CellStatus::Past,
            guest_label: None,
            is_checkout_day: false,
            booking_id: None,
        };
    }

    // overlapping stays on one room are an upstream integrity problem; first match wins
    match stays.iter().find(|s| s.covers(room, day)) {
        Some(stay) => CalendarCell {
            date: day,
            status: CellStatus::Occupied,
            guest_label: if stay.check_in == day {
                stay.guest.map(str::to_string)
            } else {
                None
            },
            is_checkout_day: stay.check_out == day,
            booking_id: Some(stay.booking_id),
        },
        None => CalendarCell {
            date: day,
            status: CellStatus::Available,
            guest_label: None,
            is_checkout_day: false,
            booking_id: None,
        },
    }
}

/// Build the occupancy grid of `view` for `rooms`
///
/// `rooms` is expected deduplicated and ascending (see
/// [`super::room_directory::collect_room_numbers`]); rows follow its order.
/// Days before `today` are always `past`. Cancelled bookings are ignored and
/// bookings with malformed dates are skipped and reported in
/// `skipped_booking_ids`. Pure: identical inputs give an identical grid.
pub fn build_grid(
    rooms: &[RoomNumber],
    bookings: &[Booking],
    view: MonthView,
    today: NaiveDate,
) -> AvailabilityGrid {
    let (stays, skipped_booking_ids) = collect_stays(bookings);
    let days: Vec<NaiveDate> = view.days().collect();

    let columns = days
        .iter()
        .map(|&date| DayColumn {
            date,
            day: date.day(),
            weekday: date.format("%a").to_string(),
            is_today: date == today,
        })
        .collect();

    let rows = rooms
        .iter()
        .map(|&room| GridRow {
            room,
            cells: days
                .iter()
                .map(|&day| build_cell(room, day, today, &stays))
                .collect(),
        })
        .collect();

    AvailabilityGrid {
        view,
        columns,
        rows,
        skipped_booking_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::EntityMetadata;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn march_2024() -> MonthView {
        MonthView::new(2024, 3).unwrap()
    }

    fn booking(id: i64, room: i64, check_in: &str, check_out: &str, status: &str, guest: &str) -> Booking {
        Booking {
            booking_id: id,
            room_id: 1,
            room_no: Some(room),
            room_name: "Deluxe".into(),
            total_price: 100.0,
            currency: "INR".into(),
            booking_date: "2024-02-01".into(),
            status: status.into(),
            check_in_date: Some(check_in.into()),
            check_out_date: Some(check_out.into()),
            user_name: guest.into(),
            email: "guest@example.com".into(),
            metadata: EntityMetadata::new(),
        }
    }

    fn rooms(numbers: &[i64]) -> Vec<RoomNumber> {
        numbers.iter().copied().map(RoomNumber).collect()
    }

    #[test]
    fn test_shape_follows_rooms_and_days() {
        let grid = build_grid(&rooms(&[101, 102]), &[], march_2024(), date(2024, 3, 1));
        assert_eq!(grid.columns.len(), 31);
        assert_eq!(grid.rows.len(), 2);
        assert_eq!(grid.rows[0].room, RoomNumber(101));
        assert!(grid.rows.iter().all(|r| r.cells.len() == 31));
        assert_eq!(grid.columns[0].weekday, "Fri");
        assert_eq!(grid.columns[0].day, 1);
        assert!(grid.columns[0].is_today);
        assert_eq!(grid.columns.iter().filter(|c| c.is_today).count(), 1);
    }

    #[test]
    fn test_no_today_column_outside_month() {
        let grid = build_grid(&rooms(&[101]), &[], march_2024(), date(2024, 5, 1));
        assert!(grid.columns.iter().all(|c| !c.is_today));
    }

    #[test]
    fn test_stay_marks_start_and_checkout() {
        let bookings = vec![booking(1, 101, "2024-03-10", "2024-03-12", "confirmed", "Asha Rao")];
        let grid = build_grid(&rooms(&[101]), &bookings, march_2024(), date(2024, 3, 1));
        let r = RoomNumber(101);

        let first = grid.cell(r, date(2024, 3, 10)).unwrap();
        assert_eq!(first.status, CellStatus::Occupied);
        assert_eq!(first.guest_label.as_deref(), Some("Asha"));
        assert!(!first.is_checkout_day);

        let middle = grid.cell(r, date(2024, 3, 11)).unwrap();
        assert_eq!(middle.status, CellStatus::Occupied);
        assert_eq!(middle.guest_label, None);
        assert!(!middle.is_checkout_day);

        let last = grid.cell(r, date(2024, 3, 12)).unwrap();
        assert_eq!(last.status, CellStatus::Occupied);
        assert!(last.is_checkout_day);
        assert_eq!(last.booking_id, Some(1));

        for day in 13..=31 {
            assert_eq!(grid.cell(r, date(2024, 3, day)).unwrap().status, CellStatus::Available);
        }
        assert_eq!(grid.cell(r, date(2024, 3, 9)).unwrap().status, CellStatus::Available);
    }

    #[test]
    fn test_past_overrides_occupied() {
        let bookings = vec![booking(1, 101, "2024-03-01", "2024-03-20", "confirmed", "Asha")];
        let today = date(2024, 3, 15);
        let grid = build_grid(&rooms(&[101, 102]), &bookings, march_2024(), today);
        for row in &grid.rows {
            for cell in &row.cells {
                if cell.date < today {
                    assert_eq!(cell.status, CellStatus::Past);
                    assert_eq!(cell.guest_label, None);
                }
            }
        }
        assert_eq!(
            grid.cell(RoomNumber(101), today).unwrap().status,
            CellStatus::Occupied
        );
    }

    #[test]
    fn test_cancelled_booking_is_inert() {
        let bookings = vec![booking(1, 101, "2024-03-10", "2024-03-12", "cancelled", "Asha")];
        let grid = build_grid(&rooms(&[101]), &bookings, march_2024(), date(2024, 3, 1));
        assert!(grid.rows[0]
            .cells
            .iter()
            .all(|c| c.status == CellStatus::Available));
        assert!(grid.skipped_booking_ids.is_empty());
    }

    #[test]
    fn test_other_status_still_occupies() {
        let bookings = vec![booking(1, 101, "2024-03-10", "2024-03-10", "pending", "Asha")];
        let grid = build_grid(&rooms(&[101]), &bookings, march_2024(), date(2024, 3, 1));
        assert_eq!(
            grid.cell(RoomNumber(101), date(2024, 3, 10)).unwrap().status,
            CellStatus::Occupied
        );
    }

    #[test]
    fn test_single_night_stay_is_start_and_checkout() {
        let bookings = vec![booking(4, 101, "2024-03-20", "2024-03-20", "confirmed", "Ravi Kumar")];
        let grid = build_grid(&rooms(&[101]), &bookings, march_2024(), date(2024, 3, 1));
        let occupied: Vec<&CalendarCell> = grid.rows[0]
            .cells
            .iter()
            .filter(|c| c.status == CellStatus::Occupied)
            .collect();
        assert_eq!(occupied.len(), 1);
        assert_eq!(occupied[0].date, date(2024, 3, 20));
        assert_eq!(occupied[0].guest_label.as_deref(), Some("Ravi"));
        assert!(occupied[0].is_checkout_day);
    }

    #[test]
    fn test_malformed_dates_are_skipped() {
        let bookings = vec![
            booking(1, 101, "", "2024-03-12", "confirmed", "Asha"),
            booking(2, 101, "2024-03-05", "12/03/2024", "confirmed", "Ravi"),
            booking(3, 101, "2024-03-20", "2024-03-21", "confirmed", "Meera"),
        ];
        let grid = build_grid(&rooms(&[101]), &bookings, march_2024(), date(2024, 3, 1));
        assert_eq!(grid.skipped_booking_ids, vec![1, 2]);
        assert_eq!(
            grid.cell(RoomNumber(101), date(2024, 3, 10)).unwrap().status,
            CellStatus::Available
        );
        assert_eq!(
            grid.cell(RoomNumber(101), date(2024, 3, 20)).unwrap().status,
            CellStatus::Occupied
        );
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        let bookings = vec![
            booking(1, 101, "2024-03-10", "2024-03-12", "confirmed", "Asha"),
            booking(2, 101, "2024-03-11", "2024-03-14", "confirmed", "Ravi"),
        ];
        let grid = build_grid(&rooms(&[101]), &bookings, march_2024(), date(2024, 3, 1));
        let cell = grid.cell(RoomNumber(101), date(2024, 3, 11)).unwrap();
        assert_eq!(cell.booking_id, Some(1));
        assert_eq!(cell.guest_label, None);
        let cell = grid.cell(RoomNumber(101), date(2024, 3, 13)).unwrap();
        assert_eq!(cell.booking_id, Some(2));
    }

    #[test]
    fn test_bookings_only_affect_their_room() {
        let bookings = vec![booking(1, 102, "2024-03-10", "2024-03-12", "confirmed", "Asha")];
        let grid = build_grid(&rooms(&[101, 102]), &bookings, march_2024(), date(2024, 3, 1));
        assert_eq!(
            grid.cell(RoomNumber(101), date(2024, 3, 11)).unwrap().status,
            CellStatus::Available
        );
        assert_eq!(
            grid.cell(RoomNumber(102), date(2024, 3, 11)).unwrap().status,
            CellStatus::Occupied
        );
    }

    #[test]
    fn test_stay_spanning_month_boundary() {
        let bookings = vec![booking(1, 101, "2024-02-27", "2024-03-02", "confirmed", "Asha")];
        let grid = build_grid(&rooms(&[101]), &bookings, march_2024(), date(2024, 2, 1));
        let first = grid.cell(RoomNumber(101), date(2024, 3, 1)).unwrap();
        assert_eq!(first.status, CellStatus::Occupied);
        assert_eq!(first.guest_label, None);
        assert!(grid.cell(RoomNumber(101), date(2024, 3, 2)).unwrap().is_checkout_day);
    }

    #[test]
    fn test_empty_inputs() {
        let grid = build_grid(&[], &[], march_2024(), date(2024, 3, 1));
        assert!(grid.rows.is_empty());
        assert_eq!(grid.columns.len(), 31);

        let grid = build_grid(&rooms(&[101]), &[], march_2024(), date(2024, 3, 16));
        let cells = &grid.rows[0].cells;
        assert_eq!(cells.iter().filter(|c| c.status == CellStatus::Past).count(), 15);
        assert_eq!(cells.iter().filter(|c| c.status == CellStatus::Available).count(), 16);
    }

    #[test]
    fn test_idempotent() {
        let bookings = vec![
            booking(1, 101, "2024-03-10", "2024-03-12", "confirmed", "Asha"),
            booking(2, 102, "bad", "2024-03-12", "confirmed", "Ravi"),
        ];
        let r = rooms(&[101, 102]);
        let a = build_grid(&r, &bookings, march_2024(), date(2024, 3, 5));
        let b = build_grid(&r, &bookings, march_2024(), date(2024, 3, 5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&CellStatus::Occupied).unwrap(), "\"occupied\"");
        assert_eq!(CellStatus::Past.as_str(), "past");
    }
}
