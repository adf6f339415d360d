use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::api_error::ApiErrorBody;

/// Handler error: a status code plus the `{"detail"}` body
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    /// Unexpected failure; the cause is logged, the client gets a generic body
    pub fn internal(err: anyhow::Error) -> Self {
        tracing::error!("Internal error: {:#}", err);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiErrorBody::new(self.detail))).into_response()
    }
}

/// Map an `anyhow` error to a response, recognizing the domain error `E`
pub fn from_anyhow<E>(err: anyhow::Error) -> ApiError
where
    E: std::error::Error + Send + Sync + 'static,
    ApiError: From<E>,
{
    match err.downcast::<E>() {
        Ok(domain) => domain.into(),
        Err(other) => ApiError::internal(other),
    }
}
