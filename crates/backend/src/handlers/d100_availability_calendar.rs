use axum::{extract::Query, Json};
use contracts::dashboards::d100_availability_calendar::{AvailabilityRequest, AvailabilityResponse};

use crate::dashboards::d100_availability_calendar::service;
use crate::shared::api_error::ApiError;

/// GET /api/d100/availability?year=2024&month=3
pub async fn get_availability(
    Query(request): Query<AvailabilityRequest>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let view = service::month_view_from_request(&request).ok_or_else(|| {
        ApiError::bad_request(format!(
            "Invalid month: {}-{}",
            request.year, request.month
        ))
    })?;

    service::get_availability(view)
        .await
        .map(Json)
        .map_err(ApiError::internal)
}
