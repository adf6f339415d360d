use contracts::domain::a001_room_type::aggregate::RoomType;
use contracts::domain::a002_booking::aggregate::Booking;

use crate::domain::{a001_room_type, a002_booking};

/// Room types and bookings of one refresh; fails unless both arrive
pub async fn fetch_snapshot() -> Result<(Vec<RoomType>, Vec<Booking>), String> {
    let room_types = a001_room_type::api::fetch_all().await?;
    let bookings = a002_booking::api::fetch_all().await?;
    Ok((room_types, bookings))
}
