use thiserror::Error;

use crate::shared::api_error::ApiError;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Booking not found")]
    NotFound,
    /// The room type a booking refers to does not exist
    #[error("Room not found")]
    RoomNotFound,
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Validation(String),
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::NotFound | BookingError::RoomNotFound => {
                ApiError::not_found(err.to_string())
            }
            BookingError::Conflict(_) | BookingError::Validation(_) => {
                ApiError::bad_request(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::from(BookingError::NotFound).status, StatusCode::NOT_FOUND);
        let e = ApiError::from(BookingError::RoomNotFound);
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.detail, "Room not found");
        let e = ApiError::from(BookingError::Conflict("Already cancelled".into()));
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.detail, "Already cancelled");
    }

    #[test]
    fn test_from_anyhow_downcasts_domain_errors() {
        use crate::shared::api_error::from_anyhow;

        let err: anyhow::Error = BookingError::Conflict("Room is fully booked".into()).into();
        let api = from_anyhow::<BookingError>(err);
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.detail, "Room is fully booked");

        let api = from_anyhow::<BookingError>(anyhow::anyhow!("disk full"));
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
