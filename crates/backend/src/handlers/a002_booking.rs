use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a002_booking::aggregate::{
    Booking, BookingDto, BookingRequest, BookingResponse, MessageResponse,
};

use crate::domain::a002_booking;
use crate::domain::a002_booking::error::BookingError;
use crate::shared::api_error::{from_anyhow, ApiError};

fn map_err(e: anyhow::Error) -> ApiError {
    from_anyhow::<BookingError>(e)
}

/// POST /api/rooms/:id/book
pub async fn book_room(
    Path(room_id): Path<i64>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = a002_booking::service::book_room(room_id, request)
        .await
        .map_err(map_err)?;

    Ok(Json(BookingResponse::booked(booking)))
}

/// GET /api/bookings
pub async fn list_all() -> Result<Json<Vec<Booking>>, ApiError> {
    a002_booking::service::list_all()
        .await
        .map(Json)
        .map_err(map_err)
}

/// GET /api/bookings/:id
pub async fn get_by_id(Path(id): Path<i64>) -> Result<Json<Booking>, ApiError> {
    a002_booking::service::get_by_id(id)
        .await
        .map(Json)
        .map_err(map_err)
}

/// PUT /api/bookings/:id
pub async fn update(
    Path(id): Path<i64>,
    Json(mut dto): Json<BookingDto>,
) -> Result<Json<Booking>, ApiError> {
    if dto.booking_id.is_some_and(|body_id| body_id != id) {
        return Err(ApiError::bad_request("Booking id does not match the path"));
    }
    dto.booking_id = Some(id);

    a002_booking::service::update(dto).await.map_err(map_err)?;
    a002_booking::service::get_by_id(id)
        .await
        .map(Json)
        .map_err(map_err)
}

/// DELETE /api/bookings/:id/cancel
pub async fn cancel(Path(id): Path<i64>) -> Result<Json<MessageResponse>, ApiError> {
    a002_booking::service::cancel(id).await.map_err(map_err)?;
    Ok(Json(MessageResponse::cancelled()))
}

/// DELETE /api/bookings/:id
pub async fn delete(Path(id): Path<i64>) -> Result<StatusCode, ApiError> {
    a002_booking::service::delete(id).await.map_err(map_err)?;
    Ok(StatusCode::OK)
}
