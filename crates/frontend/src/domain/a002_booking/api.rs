use contracts::domain::a002_booking::aggregate::{
    Booking, BookingDto, BookingRequest, BookingResponse, MessageResponse,
};

use crate::shared::api_utils::{get_json, request_json, send_empty, send_json, Method};

pub async fn fetch_all() -> Result<Vec<Booking>, String> {
    get_json("/api/bookings").await
}

pub async fn fetch_by_id(id: i64) -> Result<Booking, String> {
    get_json(&format!("/api/bookings/{}", id)).await
}

/// Book a room of type `room_id` through the guest booking endpoint
pub async fn book_room(room_id: i64, request: &BookingRequest) -> Result<BookingResponse, String> {
    send_json(Method::Post, &format!("/api/rooms/{}/book", room_id), request).await
}

pub async fn update(dto: &BookingDto) -> Result<Booking, String> {
    let id = dto
        .booking_id
        .ok_or_else(|| "Booking id is missing".to_string())?;
    send_json(Method::Put, &format!("/api/bookings/{}", id), dto).await
}

pub async fn cancel(id: i64) -> Result<String, String> {
    let response: MessageResponse =
        request_json(Method::Delete, &format!("/api/bookings/{}/cancel", id)).await?;
    Ok(response.message)
}

pub async fn delete(id: i64) -> Result<(), String> {
    send_empty(Method::Delete, &format!("/api/bookings/{}", id)).await
}
