use anyhow::Result;
use chrono::NaiveDate;
use contracts::dashboards::d100_availability_calendar::room_directory::unrecognized_entries;
use contracts::dashboards::d100_availability_calendar::{
    AvailabilityRequest, AvailabilityResponse, CalendarContext, MonthView, OccupancySummary,
};
use contracts::domain::a001_room_type::aggregate::RoomType;
use contracts::domain::a002_booking::aggregate::Booking;

use crate::domain::{a001_room_type, a002_booking};

/// Grid and summary for one month from already fetched snapshots
pub fn build_response(
    view: MonthView,
    room_types: &[RoomType],
    bookings: Vec<Booking>,
    today: NaiveDate,
) -> AvailabilityResponse {
    let skipped_entries = unrecognized_entries(room_types);
    if skipped_entries > 0 {
        tracing::warn!(
            "d100: {} room number entries with unrecognized shape skipped",
            skipped_entries
        );
    }

    let mut context = CalendarContext::new(view);
    context.refresh(room_types, bookings);
    let grid = context.grid(today);

    for booking_id in &grid.skipped_booking_ids {
        tracing::warn!("d100: booking {} has malformed stay dates, skipped", booking_id);
    }

    let summary = OccupancySummary::from_grid(&grid);
    AvailabilityResponse {
        period: view.period(),
        grid,
        summary,
    }
}

/// Availability calendar for the requested month
pub async fn get_availability(view: MonthView) -> Result<AvailabilityResponse> {
    let (room_types, bookings) = tokio::try_join!(
        a001_room_type::service::list_all(),
        a002_booking::service::list_all()
    )?;
    let today = chrono::Local::now().date_naive();

    tracing::info!(
        "d100: building {} for {} room types, {} bookings",
        view.period(),
        room_types.len(),
        bookings.len()
    );
    Ok(build_response(view, &room_types, bookings, today))
}

/// Validated cursor from query parameters
pub fn month_view_from_request(request: &AvailabilityRequest) -> Option<MonthView> {
    MonthView::new(request.year, request.month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d100_availability_calendar::{CellStatus, RoomNumber, RoomNumberEntry};
    use contracts::domain::a001_room_type::aggregate::RoomTypeDto;
    use contracts::domain::common::EntityMetadata;

    fn room_type(numbers: Vec<RoomNumberEntry>) -> RoomType {
        let dto = RoomTypeDto {
            name: "Standard".into(),
            room_numbers: numbers,
            ..Default::default()
        };
        RoomType::new_for_insert(1, &dto)
    }

    fn booking(id: i64, room_no: i64, check_in: &str, check_out: &str) -> Booking {
        Booking {
            booking_id: id,
            room_id: 1,
            room_no: Some(room_no),
            room_name: "Standard".into(),
            total_price: 100.0,
            currency: "INR".into(),
            booking_date: "2024-03-01".into(),
            status: "confirmed".into(),
            check_in_date: Some(check_in.into()),
            check_out_date: Some(check_out.into()),
            user_name: "Asha Rao".into(),
            email: "asha@example.com".into(),
            metadata: EntityMetadata::new(),
        }
    }

    #[test]
    fn test_build_response() {
        let view = MonthView::new(2024, 3).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let rooms = vec![room_type(vec![
            RoomNumberEntry::Bare(102),
            RoomNumberEntry::Bare(101),
            RoomNumberEntry::Unrecognized(serde_json::json!("103")),
        ])];
        let bookings = vec![
            booking(1, 101, "2024-03-10", "2024-03-12"),
            booking(2, 102, "2024-03-xx", "2024-03-12"),
        ];

        let response = build_response(view, &rooms, bookings, today);
        assert_eq!(response.period, "2024-03");
        assert_eq!(response.grid.rows.len(), 2);
        assert_eq!(response.grid.skipped_booking_ids, vec![2]);
        assert_eq!(response.summary.occupied, 3);
        assert_eq!(response.summary.past, 0);
        assert_eq!(response.summary.available, 2 * 31 - 3);

        let d = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let cell = response.grid.cell(RoomNumber(101), d).unwrap();
        assert_eq!(cell.status, CellStatus::Occupied);
        assert_eq!(cell.guest_label.as_deref(), Some("Asha"));
    }

    #[test]
    fn test_month_view_from_request() {
        let ok = AvailabilityRequest { year: 2024, month: 12 };
        assert_eq!(month_view_from_request(&ok), MonthView::new(2024, 12));
        let bad = AvailabilityRequest { year: 2024, month: 13 };
        assert!(month_view_from_request(&bad).is_none());
    }
}
