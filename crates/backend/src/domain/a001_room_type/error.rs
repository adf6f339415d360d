use thiserror::Error;

use crate::shared::api_error::ApiError;

#[derive(Debug, Error)]
pub enum RoomTypeError {
    #[error("Room type not found")]
    NotFound,
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Validation(String),
}

impl From<RoomTypeError> for ApiError {
    fn from(err: RoomTypeError) -> Self {
        match err {
            RoomTypeError::NotFound => ApiError::not_found(err.to_string()),
            RoomTypeError::Conflict(_) | RoomTypeError::Validation(_) => {
                ApiError::bad_request(err.to_string())
            }
        }
    }
}
