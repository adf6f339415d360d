use chrono::NaiveDate;
use contracts::domain::a001_room_type::aggregate::RoomType;
use contracts::domain::a002_booking::aggregate::{
    Booking, BookingDto, BookingRequest, BookingStatus, DATE_FORMAT,
};
use contracts::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use sea_orm::{DatabaseTransaction, TransactionTrait};

use super::error::BookingError;
use super::repository;
use crate::domain::a001_room_type::repository as room_type_repository;
use crate::domain::a001_room_type::service::next_id;
use crate::shared::data::db::get_connection;
use crate::shared::format::format_price;

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// True when `booking` holds room `room_no` on any day of `check_in..=check_out`
fn holds_room(booking: &Booking, room_no: i64, check_in: NaiveDate, check_out: NaiveDate) -> bool {
    booking.room_no == Some(room_no)
        && !booking.is_cancelled()
        && booking
            .stay_dates()
            .is_some_and(|(start, end)| start <= check_out && check_in <= end)
}

/// Physical room for a stay: the requested one, else the lowest free room of the type
///
/// A requested number must belong to the type when the type declares rooms, and
/// must not be held by another live booking on any night of the stay. Both ends
/// of a stay count, as on the calendar. `existing` must not contain the booking
/// being placed.
pub fn choose_room_no(
    requested: Option<i64>,
    room: &RoomType,
    stay: (NaiveDate, NaiveDate),
    existing: &[Booking],
) -> Result<Option<i64>, BookingError> {
    let (check_in, check_out) = stay;
    let is_free = |no: i64| !existing.iter().any(|b| holds_room(b, no, check_in, check_out));
    let declared = room.declared_room_numbers();

    match requested {
        Some(no) if !declared.is_empty() && !declared.contains(&no) => Err(
            BookingError::Validation(format!("Room {} does not belong to '{}'", no, room.name)),
        ),
        Some(no) if !is_free(no) => Err(BookingError::Conflict(format!(
            "Room {} is already booked for these dates",
            no
        ))),
        Some(no) => Ok(Some(no)),
        None if declared.is_empty() => Ok(None),
        None => declared
            .into_iter()
            .find(|no| is_free(*no))
            .map(Some)
            .ok_or_else(|| {
                BookingError::Conflict(format!("No '{}' room is free for these dates", room.name))
            }),
    }
}

/// Confirmed booking priced from the room type
pub fn new_booking(
    booking_id: i64,
    room: &RoomType,
    request: &BookingRequest,
    room_no: Option<i64>,
    booking_date: NaiveDate,
) -> Booking {
    Booking {
        booking_id,
        room_id: room.id,
        room_no,
        room_name: room.name.clone(),
        total_price: room.pricing.total_price,
        currency: room.pricing.currency.clone(),
        booking_date: booking_date.format(DATE_FORMAT).to_string(),
        status: BookingStatus::CONFIRMED.to_string(),
        check_in_date: Some(request.check_in_date.trim().to_string()),
        check_out_date: Some(request.check_out_date.trim().to_string()),
        user_name: request.user_name.trim().to_string(),
        email: request.email.trim().to_string(),
        metadata: EntityMetadata::new(),
    }
}

/// Add `delta` to the free-room counter of a room type inside `txn`
async fn adjust_availability(
    txn: &DatabaseTransaction,
    room_id: i64,
    delta: i64,
) -> anyhow::Result<()> {
    match room_type_repository::get_by_id_txn(txn, room_id).await? {
        Some(mut room) => {
            room.availability.available_rooms += delta;
            room.before_write();
            room_type_repository::update_txn(txn, &room).await
        }
        None => {
            tracing::warn!(
                "Room type {} no longer exists, availability not adjusted",
                room_id
            );
            Ok(())
        }
    }
}

/// Book one room of a room type for a guest
pub async fn book_room(room_id: i64, request: BookingRequest) -> anyhow::Result<Booking> {
    request.validate().map_err(BookingError::Validation)?;

    let txn = get_connection().begin().await?;

    let mut room = room_type_repository::get_by_id_txn(&txn, room_id)
        .await?
        .ok_or(BookingError::RoomNotFound)?;
    if room.availability.available_rooms <= 0 {
        return Err(BookingError::Conflict("Room is fully booked".into()).into());
    }
    let stay = request.stay_dates().ok_or_else(|| {
        BookingError::Validation("Invalid check-in or check-out date".into())
    })?;
    let existing = repository::list_with_room_txn(&txn).await?;
    let room_no = choose_room_no(request.room_no, &room, stay, &existing)?;

    room.availability.available_rooms -= 1;
    room.before_write();
    room_type_repository::update_txn(&txn, &room).await?;

    let booking_id = next_id(repository::max_id_txn(&txn).await?);
    let booking = new_booking(booking_id, &room, &request, room_no, today());
    repository::insert_txn(&txn, &booking).await?;

    txn.commit().await?;

    tracing::info!(
        "Booking {} confirmed: room type {} room {:?}, {}, {}",
        booking.booking_id,
        room.id,
        booking.room_no,
        booking.user_name,
        format_price(booking.total_price, &booking.currency)
    );
    Ok(booking)
}

pub async fn list_all() -> anyhow::Result<Vec<Booking>> {
    repository::list_all().await
}

pub async fn get_by_id(id: i64) -> anyhow::Result<Booking> {
    Ok(repository::get_by_id(id).await?.ok_or(BookingError::NotFound)?)
}

/// Mark a booking cancelled and give its room back
pub async fn cancel(id: i64) -> anyhow::Result<()> {
    let txn = get_connection().begin().await?;

    let mut booking = repository::get_by_id_txn(&txn, id)
        .await?
        .ok_or(BookingError::NotFound)?;
    if booking.is_cancelled() {
        return Err(BookingError::Conflict("Already cancelled".into()).into());
    }

    adjust_availability(&txn, booking.room_id, 1).await?;

    booking.status = BookingStatus::CANCELLED.to_string();
    booking.before_write();
    repository::update_txn(&txn, &booking).await?;

    txn.commit().await?;
    tracing::info!("{} {} cancelled", Booking::element_name(), id.as_string());
    Ok(())
}

/// Dashboard edit; a status change across "cancelled" moves availability too
pub async fn update(dto: BookingDto) -> anyhow::Result<()> {
    let id = dto
        .booking_id
        .ok_or_else(|| BookingError::Validation("Missing booking id".into()))?;

    let txn = get_connection().begin().await?;

    let mut booking = repository::get_by_id_txn(&txn, id)
        .await?
        .ok_or(BookingError::NotFound)?;
    let was_cancelled = booking.is_cancelled();

    booking.update(&dto);
    booking.validate().map_err(BookingError::Validation)?;

    if let Some(room) = room_type_repository::get_by_id_txn(&txn, booking.room_id).await? {
        if !booking.is_cancelled() {
            if let Some(stay) = booking.stay_dates() {
                let others: Vec<Booking> = repository::list_with_room_txn(&txn)
                    .await?
                    .into_iter()
                    .filter(|b| b.booking_id != booking.booking_id)
                    .collect();
                booking.room_no = choose_room_no(booking.room_no, &room, stay, &others)?;
            }
        }
        if was_cancelled && !booking.is_cancelled() && room.availability.available_rooms <= 0 {
            return Err(BookingError::Conflict("Room is fully booked".into()).into());
        }
    }

    match (was_cancelled, booking.is_cancelled()) {
        (false, true) => adjust_availability(&txn, booking.room_id, 1).await?,
        (true, false) => adjust_availability(&txn, booking.room_id, -1).await?,
        _ => {}
    }

    booking.before_write();
    repository::update_txn(&txn, &booking).await?;

    txn.commit().await?;
    Ok(())
}

/// Remove a booking; an active one gives its room back first
pub async fn delete(id: i64) -> anyhow::Result<()> {
    let txn = get_connection().begin().await?;

    let booking = repository::get_by_id_txn(&txn, id)
        .await?
        .ok_or(BookingError::NotFound)?;
    if !booking.is_cancelled() {
        adjust_availability(&txn, booking.room_id, 1).await?;
    }
    repository::delete_txn(&txn, id).await?;

    txn.commit().await?;
    tracing::info!("{} {} deleted", Booking::element_name(), id.as_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d100_availability_calendar::RoomNumberEntry;
    use contracts::domain::a001_room_type::aggregate::{Pricing, RoomTypeDto};

    fn room(numbers: &[i64]) -> RoomType {
        let dto = RoomTypeDto {
            name: "Deluxe".into(),
            adults: 2,
            guests: 2,
            pricing: Pricing {
                base_price: 100.0,
                tax_price: 12.0,
                total_price: 112.0,
                ..Pricing::default()
            },
            room_numbers: numbers.iter().map(|n| RoomNumberEntry::Bare(*n)).collect(),
            ..Default::default()
        };
        RoomType::new_for_insert(4, &dto)
    }

    fn request(room_no: Option<i64>) -> BookingRequest {
        BookingRequest {
            check_in_date: " 2024-03-10".into(),
            check_out_date: "2024-03-12".into(),
            user_name: "Asha Rao ".into(),
            email: "asha@example.com".into(),
            room_no,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn stay(id: i64, room_no: i64, check_in: u32, check_out: u32, status: &str) -> Booking {
        let mut b = new_booking(id, &room(&[]), &request(None), Some(room_no), day(1));
        b.check_in_date = Some(day(check_in).format(DATE_FORMAT).to_string());
        b.check_out_date = Some(day(check_out).format(DATE_FORMAT).to_string());
        b.status = status.into();
        b
    }

    #[test]
    fn test_choose_room_no_defaults_to_lowest() {
        let nights = (day(10), day(12));
        assert_eq!(
            choose_room_no(None, &room(&[203, 201, 202]), nights, &[]).unwrap(),
            Some(201)
        );
        assert_eq!(choose_room_no(None, &room(&[]), nights, &[]).unwrap(), None);
    }

    #[test]
    fn test_choose_room_no_checks_membership() {
        let r = room(&[201, 202]);
        let nights = (day(10), day(12));
        assert_eq!(choose_room_no(Some(202), &r, nights, &[]).unwrap(), Some(202));
        assert!(matches!(
            choose_room_no(Some(999), &r, nights, &[]),
            Err(BookingError::Validation(_))
        ));
        // a type without declared rooms accepts any number
        assert_eq!(
            choose_room_no(Some(999), &room(&[]), nights, &[]).unwrap(),
            Some(999)
        );
    }

    #[test]
    fn test_same_night_guests_get_distinct_rooms() {
        let r = room(&[201, 202, 203]);
        let nights = (day(10), day(11));
        let mut placed: Vec<Booking> = Vec::new();
        for id in 1..=3 {
            let no = choose_room_no(None, &r, nights, &placed).unwrap().unwrap();
            placed.push(stay(id, no, 10, 11, "confirmed"));
        }
        let rooms: Vec<Option<i64>> = placed.iter().map(|b| b.room_no).collect();
        assert_eq!(rooms, vec![Some(201), Some(202), Some(203)]);

        assert!(matches!(
            choose_room_no(None, &r, nights, &placed),
            Err(BookingError::Conflict(_))
        ));
    }

    #[test]
    fn test_requested_room_must_be_free() {
        let r = room(&[201, 202]);
        let existing = vec![stay(1, 201, 10, 12, "confirmed")];

        assert!(matches!(
            choose_room_no(Some(201), &r, (day(12), day(14)), &existing),
            Err(BookingError::Conflict(_))
        ));
        assert_eq!(
            choose_room_no(Some(201), &r, (day(13), day(14)), &existing).unwrap(),
            Some(201)
        );
        assert_eq!(
            choose_room_no(None, &r, (day(11), day(11)), &existing).unwrap(),
            Some(202)
        );
    }

    #[test]
    fn test_cancelled_stays_free_their_room() {
        let r = room(&[201]);
        let existing = vec![stay(1, 201, 10, 12, "cancelled")];
        assert_eq!(
            choose_room_no(None, &r, (day(10), day(12)), &existing).unwrap(),
            Some(201)
        );
    }

    #[test]
    fn test_new_booking_copies_pricing() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let b = new_booking(9, &room(&[201]), &request(None), Some(201), date);
        assert_eq!(b.booking_id, 9);
        assert_eq!(b.room_id, 4);
        assert_eq!(b.room_name, "Deluxe");
        assert_eq!(b.total_price, 112.0);
        assert_eq!(b.currency, "INR");
        assert_eq!(b.booking_date, "2024-03-01");
        assert_eq!(b.status(), BookingStatus::Confirmed);
        assert_eq!(b.check_in_date.as_deref(), Some("2024-03-10"));
        assert_eq!(b.user_name, "Asha Rao");
        assert!(b.validate().is_ok());
    }
}
